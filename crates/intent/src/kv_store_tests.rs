use super::*;
use lattice_core::{IntentKind, IntentSource, IntentState, SourceType};
use lattice_kv::InMemoryKvStore;

fn store() -> KvIntentStore {
    KvIntentStore::new(Arc::new(InMemoryKvStore::new()), Arc::new(EventBus::new()))
}

fn sample_intent() -> Intent {
    Intent::propose(
        IntentKind::Action,
        IntentSource::new(SourceType::Operator, "op-1"),
        "do the thing",
        serde_json::Map::new(),
        DateTime::UNIX_EPOCH,
    )
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();

    store.create(intent.clone()).await.unwrap();
    let loaded = store.get(&id).await.unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.state, IntentState::Proposed);
}

#[tokio::test]
async fn create_twice_is_a_collision() {
    let store = store();
    let intent = sample_intent();

    store.create(intent.clone()).await.unwrap();
    let err = store.create(intent).await.unwrap_err();

    assert!(matches!(err, IntentError::Collision(_)));
}

#[tokio::test]
async fn create_rejects_terminal_intent() {
    let store = store();
    let mut intent = sample_intent();
    intent.state = IntentState::Canceled;

    let err = store.create(intent).await.unwrap_err();

    assert!(matches!(err, IntentError::Terminal(_)));
}

#[tokio::test]
async fn get_missing_intent_is_not_found() {
    let store = store();
    let err = store.get(&IntentId::new()).await.unwrap_err();
    assert!(matches!(err, IntentError::NotFound(_)));
}

#[tokio::test]
async fn update_with_to_state_transitions_and_publishes() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();
    store.create(intent).await.unwrap();

    let mut sub = store.bus.subscribe(lattice_eventbus::topic::intent_topic(id.as_str()));

    let update = IntentUpdate::to_state(IntentState::Classified).with_classification(lattice_core::Classification::Safe);
    let updated = store.update(&id, update, "pipeline", None, DateTime::UNIX_EPOCH).await.unwrap();

    assert_eq!(updated.state, IntentState::Classified);
    assert_eq!(updated.classification, Some(lattice_core::Classification::Safe));

    let event = sub.recv().await.unwrap();
    match event {
        Event::IntentTransitioned { intent, from, to } => {
            assert_eq!(intent.id, id);
            assert_eq!(from, IntentState::Proposed);
            assert_eq!(to, IntentState::Classified);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn update_without_to_state_patches_fields_only() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();
    store.create(intent).await.unwrap();

    let update = IntentUpdate { plan: Some("do the plan".to_string()), ..Default::default() };
    let updated = store.update(&id, update, "pipeline", None, DateTime::UNIX_EPOCH).await.unwrap();

    assert_eq!(updated.state, IntentState::Proposed);
    assert_eq!(updated.plan.as_deref(), Some("do the plan"));
}

#[tokio::test]
async fn update_rejects_illegal_transition_and_leaves_intent_unchanged() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();
    store.create(intent).await.unwrap();

    let update = IntentUpdate::to_state(IntentState::Running);
    let err = store.update(&id, update, "pipeline", None, DateTime::UNIX_EPOCH).await.unwrap_err();
    assert!(matches!(err, IntentError::InvalidTransition { .. }));

    let unchanged = store.get(&id).await.unwrap();
    assert_eq!(unchanged.state, IntentState::Proposed);
}

#[tokio::test]
async fn update_rejects_field_only_patch_on_terminal_intent() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();
    store.create(intent).await.unwrap();

    store.update(&id, IntentUpdate::to_state(IntentState::Classified), "pipeline", None, DateTime::UNIX_EPOCH).await.unwrap();
    store
        .update(&id, IntentUpdate::to_state(IntentState::Rejected), "pipeline", Some("policy_denied".into()), DateTime::UNIX_EPOCH)
        .await
        .unwrap();

    let update = IntentUpdate { plan: Some("too late".to_string()), ..Default::default() };
    let err = store.update(&id, update, "pipeline", None, DateTime::UNIX_EPOCH).await.unwrap_err();

    assert!(matches!(err, IntentError::Terminal(_)));
    let unchanged = store.get(&id).await.unwrap();
    assert_eq!(unchanged.plan, None);
}

#[tokio::test]
async fn list_applies_filters() {
    let store = store();
    let action = sample_intent();
    let inquiry = Intent::propose(
        IntentKind::Inquiry,
        IntentSource::new(SourceType::Operator, "op-1"),
        "what's up",
        serde_json::Map::new(),
        DateTime::UNIX_EPOCH,
    );
    store.create(action.clone()).await.unwrap();
    store.create(inquiry.clone()).await.unwrap();

    let filters = IntentFilters { kind: Some(IntentKind::Inquiry), ..Default::default() };
    let results = store.list(&filters).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, inquiry.id);
}

#[tokio::test]
async fn delete_removes_intent() {
    let store = store();
    let intent = sample_intent();
    let id = intent.id.clone();
    store.create(intent).await.unwrap();

    store.delete(&id).await.unwrap();
    let err = store.get(&id).await.unwrap_err();
    assert!(matches!(err, IntentError::NotFound(_)));
}
