// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! End-to-end scenarios S1-S6 (spec.md §8 "Concrete end-to-end scenarios"),
//! exercised across crate boundaries the way a production deployment would
//! actually wire them.

use chrono::Utc;
use lattice_capability::{dispatch, DispatchRequest, SpritesCapability, StubSprites};
use lattice_core::{
    AuditResult, Classification, Clock, Event, FakeClock, IntentKind, IntentSource, SourceType, SpriteId, SpriteState,
};
use lattice_engine::{CadenceConfig, FleetSupervisor, WorkerConfig};
use lattice_eventbus::{topic, EventBus};
use lattice_intent::{IntentPipeline, KvIntentStore};
use lattice_kv::InMemoryKvStore;
use lattice_safety::{GateConfig, InMemoryAuditLog, PolicyRule};
use serde_json::Map;
use std::sync::Arc;
use std::time::Duration;

fn fast_cadence() -> CadenceConfig {
    CadenceConfig { fast_ms: 10, slow_ms: 10 }
}

/// S1. Wake through the pipeline: a hibernating sprite whose desired state
/// is `ready` converges in two reconciliation cycles.
#[tokio::test]
async fn s1_wake_through_the_pipeline() {
    let sprites = Arc::new(StubSprites::new());
    sprites.seed("s1", "cold");
    let bus = Arc::new(EventBus::new());
    let mut reconciled = bus.subscribe(topic::sprite_topic("s1"));

    let supervisor =
        FleetSupervisor::new(sprites, bus.clone(), FakeClock::new(), fast_cadence(), WorkerConfig::default());
    supervisor.spawn(SpriteId::new("s1"), SpriteState::Ready);

    let first = tokio::time::timeout(Duration::from_secs(2), reconciled.recv())
        .await
        .expect("first reconciliation")
        .expect("event");
    let Event::SpriteReconciled { result } = first else { panic!("expected a reconciliation result") };
    assert_eq!(result.from_state, SpriteState::Hibernating);

    // Drain the paired SpriteStateChanged event before the second reconcile.
    let mut reconciled = reconciled;
    loop {
        let event = tokio::time::timeout(Duration::from_secs(2), reconciled.recv())
            .await
            .expect("second cycle event")
            .expect("event");
        if let Event::SpriteReconciled { result } = event {
            assert_eq!(result.to_state, SpriteState::Ready);
            break;
        }
    }

    // Give the snapshot a moment to settle, then check the fleet summary.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let summary = supervisor.summary();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.by_state.get("ready"), Some(&1));
}

async fn propose_and_gate(
    intents: &IntentPipeline,
    capability: &str,
    operation: &str,
) -> lattice_core::Intent {
    let mut payload = Map::new();
    payload.insert("capability".into(), capability.into());
    payload.insert("operation".into(), operation.into());
    let intent = intents
        .propose(IntentKind::Action, IntentSource::new(SourceType::Operator, "op"), "test action", payload, Utc::now())
        .await
        .expect("propose");
    intents.classify_and_gate(&intent.id, 12, Utc::now()).await.expect("classify_and_gate")
}

/// S2. A controlled action under `require_approval_for_controlled=true`
/// stops at `awaiting_approval` with no side effect, and the transition log
/// records exactly the classify + gate steps.
#[tokio::test]
async fn s2_controlled_action_requires_approval() {
    let kv = Arc::new(InMemoryKvStore::new());
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(KvIntentStore::new(kv, bus));
    let intents = IntentPipeline::new(store, GateConfig::default());

    let intent = propose_and_gate(&intents, "sprites", "wake").await;

    assert_eq!(intent.state, lattice_core::IntentState::AwaitingApproval);
    assert_eq!(intent.classification, Some(Classification::Controlled));
    assert_eq!(intent.transition_log.len(), 2);
    assert_eq!(intent.transition_log[0].to, lattice_core::IntentState::Classified);
    assert_eq!(intent.transition_log[1].to, lattice_core::IntentState::AwaitingApproval);
}

/// S3. A dangerous action is denied outright when `allow_dangerous=false`;
/// the intent is rejected with `policy_denied`.
#[tokio::test]
async fn s3_dangerous_action_is_denied() {
    let kv = Arc::new(InMemoryKvStore::new());
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(KvIntentStore::new(kv, bus));
    let config = GateConfig { allow_dangerous: false, ..GateConfig::default() };
    let intents = IntentPipeline::new(store, config);

    let intent = propose_and_gate(&intents, "fly", "destroy_machine").await;

    assert_eq!(intent.state, lattice_core::IntentState::Rejected);
    assert_eq!(intent.classification, Some(Classification::Dangerous));
    assert_eq!(intent.transition_log.len(), 2);
    assert_eq!(intent.transition_log.last().expect("rejection transition").reason.as_deref(), Some("policy_denied"));
    assert!(intent.metadata.contains_key("gate_reason"));
}

/// The Gate's `PolicyRule::RepoOverride` combines with classification to
/// allow an action that would otherwise require approval — a one-rule
/// sanity check that policy-as-data (spec.md §4.5) actually takes effect.
#[tokio::test]
async fn repo_override_allows_a_controlled_action_outright() {
    let kv = Arc::new(InMemoryKvStore::new());
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(KvIntentStore::new(kv, bus));
    let config = GateConfig {
        policy_rules: vec![PolicyRule::RepoOverride {
            repo: "acme/widgets".into(),
            decision: lattice_safety::GateDecision::Allow,
        }],
        ..GateConfig::default()
    };
    let intents = IntentPipeline::new(store, config);

    let mut payload = Map::new();
    payload.insert("capability".into(), "sprites".into());
    payload.insert("operation".into(), "wake".into());
    payload.insert("repo".into(), "acme/widgets".into());
    let intent = intents
        .propose(IntentKind::Action, IntentSource::new(SourceType::Operator, "op"), "scoped wake", payload, Utc::now())
        .await
        .expect("propose");
    let intent = intents.classify_and_gate(&intent.id, 12, Utc::now()).await.expect("classify_and_gate");

    assert_eq!(intent.state, lattice_core::IntentState::Approved);
}

/// Dispatching a safe capability call records exactly one `Allowed` audit
/// entry and returns the call's result (spec.md §4.5 "classify -> gate ->
/// audit -> call").
#[tokio::test]
async fn dispatch_allows_and_audits_a_safe_call() {
    let sprites = StubSprites::new();
    sprites.seed("s1", "running");
    let bus = EventBus::new();
    let audit_log = InMemoryAuditLog::new();
    let clock = FakeClock::new();

    let request = DispatchRequest {
        capability: "sprites",
        operation: "list",
        affected_resources: &[],
        repo: None,
        args: serde_json::json!({}),
        actor: "operator:test",
        operator: Some("test"),
        local_hour: 12,
    };

    let result = dispatch(
        request,
        &GateConfig::default(),
        &bus,
        &audit_log,
        &clock,
        |_action| unreachable!("a safe call never requires approval"),
        || async { sprites.list().await },
    )
    .await
    .expect("dispatch");

    assert_eq!(result.len(), 1);
    assert_eq!(audit_log.len(), 1);
    let entry = &audit_log.entries()[0];
    assert_eq!(entry.capability, "sprites");
    assert_eq!(entry.operation, "list");
    assert_eq!(entry.classification, Some(Classification::Safe));
    assert!(matches!(entry.result, AuditResult::Allowed));
}

/// S4. Outbox reconcile on drop: a streamed prefix is merged with a fuller
/// outbox copy, preferring the outbox's version of a duplicated event and
/// keeping the sort by timestamp.
#[test]
fn s4_outbox_reconcile_on_drop() {
    use lattice_core::SpriteId;
    use lattice_protocol::{reconcile, CompletionStatus, EventPayload, ProtocolEvent};

    let sprite = SpriteId::new("s1");
    let t1 = Utc::now();
    let t2 = t1 + chrono::Duration::seconds(1);
    let t3 = t1 + chrono::Duration::seconds(2);

    let streamed = vec![
        ProtocolEvent::new(sprite.clone(), "wi1", t1, EventPayload::Info { message: "starting".into(), kind: None, metadata: None }),
        ProtocolEvent::new(sprite.clone(), "wi1", t2, EventPayload::PhaseStarted { phase: "build".into() }),
    ];
    let outbox = vec![
        ProtocolEvent::new(
            sprite.clone(),
            "wi1",
            t1,
            EventPayload::Info { message: "starting".into(), kind: None, metadata: Some(serde_json::json!({"pid": 42})) },
        ),
        ProtocolEvent::new(sprite.clone(), "wi1", t2, EventPayload::PhaseStarted { phase: "build".into() }),
        ProtocolEvent::new(
            sprite.clone(),
            "wi1",
            t3,
            EventPayload::Completed { status: CompletionStatus::Success, summary: None },
        ),
    ];

    let merged = reconcile(streamed, outbox);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].timestamp, t1);
    assert_eq!(merged[1].timestamp, t2);
    assert_eq!(merged[2].timestamp, t3);
    match &merged[0].payload {
        EventPayload::Info { metadata, .. } => assert!(metadata.is_some(), "outbox's richer copy should win"),
        other => panic!("expected Info, got {other:?}"),
    }
    assert!(matches!(merged[2].payload, EventPayload::Completed { .. }));
}

/// S5. Webhook dedup: the same delivery id seen twice proposes exactly one
/// intent, through the Intent Pipeline directly (the same mechanism
/// `lattice-daemon`'s webhook handler drives per delivery).
#[tokio::test]
async fn s5_webhook_dedup_proposes_at_most_one_intent() {
    let kv = Arc::new(InMemoryKvStore::new());
    let bus = Arc::new(EventBus::new());
    let store = Arc::new(KvIntentStore::new(kv, bus));
    let intents = IntentPipeline::new(store, GateConfig::default());
    let dedup = lattice_daemon::DeliveryDedup::default();

    let delivery_id = "delivery-1";
    let mut proposed = 0;
    for _ in 0..2 {
        if dedup.check_and_record(delivery_id, std::time::Instant::now()) {
            continue;
        }
        let mut payload = Map::new();
        payload.insert("event_type".into(), "issues.labeled".into());
        payload.insert("delivery_id".into(), delivery_id.into());
        intents
            .propose(
                IntentKind::IssueTriage,
                IntentSource::new(SourceType::Webhook, delivery_id),
                "github webhook: issues.labeled",
                payload,
                Utc::now(),
            )
            .await
            .expect("propose");
        proposed += 1;
    }

    assert_eq!(proposed, 1);
}

/// S6. WAITING / resume: a sprite pausing mid-run is reflected as a
/// `Run` transitioning to `waiting` with its checkpoint remembered; writing
/// the resume file and observing `INFO` + `COMPLETED` afterward drives the
/// run to `succeeded`.
#[test]
fn s6_waiting_then_resume_completes_the_run() {
    use lattice_core::{Run, RunMode, RunStatus};
    use lattice_protocol::{EventPayload, ResumeRequest};

    let intent_id = lattice_core::IntentId::new();
    let sprite_id = SpriteId::new("s1");
    let mut run = Run::new(intent_id, sprite_id, "oj run ci", RunMode::ExecWs);
    run.status = RunStatus::Running;

    let waiting = EventPayload::Waiting {
        reason: Some("PR_REVIEW".into()),
        checkpoint_id: "chk_1".into(),
        expected_inputs: None,
    };
    if let EventPayload::Waiting { checkpoint_id, .. } = &waiting {
        run.checkpoint_id = Some(checkpoint_id.clone());
        run.status = RunStatus::Waiting;
    }
    assert_eq!(run.status, RunStatus::Waiting);

    let dir = tempfile::tempdir().expect("tempdir");
    let resume = ResumeRequest::new("wi1", run.checkpoint_id.clone().expect("checkpoint"), serde_json::json!({"approved": true}), serde_json::json!({}));
    resume.write_to(dir.path()).expect("write resume file");
    assert!(dir.path().join(".lattice/resume.json").exists());

    // Sprite resumes: INFO then COMPLETED.
    run.status = RunStatus::Running;
    let completed = EventPayload::Completed { status: lattice_protocol::CompletionStatus::Success, summary: Some("resumed".into()) };
    if let EventPayload::Completed { status: lattice_protocol::CompletionStatus::Success, .. } = completed {
        run.status = RunStatus::Succeeded;
    }

    assert_eq!(run.status, RunStatus::Succeeded);
    assert!(run.status.is_terminal());
}
