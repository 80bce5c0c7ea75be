use super::*;
use lattice_core::{IntentKind, IntentSource, SourceType};

fn sample_intent() -> Intent {
    Intent::propose(
        IntentKind::Action,
        IntentSource::new(SourceType::Operator, "op-1"),
        "do the thing",
        serde_json::Map::new(),
        DateTime::UNIX_EPOCH,
    )
}

#[test]
fn legal_transition_updates_state_and_log() {
    let mut intent = sample_intent();
    let now = DateTime::UNIX_EPOCH + chrono::Duration::seconds(5);

    apply_transition(&mut intent, IntentState::Classified, "pipeline", None, now).unwrap();

    assert_eq!(intent.state, IntentState::Classified);
    assert_eq!(intent.classified_at, Some(now));
    assert_eq!(intent.updated_at, now);
    assert_eq!(intent.transition_log.len(), 1);
    assert_eq!(intent.transition_log[0].from, IntentState::Proposed);
    assert_eq!(intent.transition_log[0].to, IntentState::Classified);
}

#[test]
fn illegal_transition_is_rejected_and_intent_is_unchanged() {
    let mut intent = sample_intent();
    let before = intent.clone();

    let err = apply_transition(&mut intent, IntentState::Running, "pipeline", None, DateTime::UNIX_EPOCH).unwrap_err();

    assert!(matches!(err, IntentError::InvalidTransition { from: IntentState::Proposed, to: IntentState::Running }));
    assert_eq!(intent.state, before.state);
    assert!(intent.transition_log.is_empty());
}

#[test]
fn terminal_intent_can_never_transition_again() {
    let mut intent = sample_intent();
    apply_transition(&mut intent, IntentState::Classified, "p", None, DateTime::UNIX_EPOCH).unwrap();
    apply_transition(&mut intent, IntentState::Rejected, "p", None, DateTime::UNIX_EPOCH).unwrap();

    let err = apply_transition(&mut intent, IntentState::Canceled, "p", None, DateTime::UNIX_EPOCH).unwrap_err();
    assert!(matches!(err, IntentError::Terminal(_)));
}

#[test]
fn running_from_waiting_for_input_sets_resumed_at_not_started_at() {
    let mut intent = sample_intent();
    let t1 = DateTime::UNIX_EPOCH + chrono::Duration::seconds(1);
    let t2 = DateTime::UNIX_EPOCH + chrono::Duration::seconds(2);
    let t3 = DateTime::UNIX_EPOCH + chrono::Duration::seconds(3);

    apply_transition(&mut intent, IntentState::Classified, "p", None, t1).unwrap();
    apply_transition(&mut intent, IntentState::Approved, "p", None, t1).unwrap();
    apply_transition(&mut intent, IntentState::Running, "p", None, t1).unwrap();
    assert_eq!(intent.started_at, Some(t1));

    apply_transition(&mut intent, IntentState::WaitingForInput, "p", None, t2).unwrap();
    apply_transition(&mut intent, IntentState::Running, "p", None, t3).unwrap();

    assert_eq!(intent.started_at, Some(t1));
    assert_eq!(intent.resumed_at, Some(t3));
}

#[test]
fn transition_log_length_equals_number_of_state_changes() {
    let mut intent = sample_intent();
    for to in [IntentState::Classified, IntentState::Approved, IntentState::Running, IntentState::Completed] {
        apply_transition(&mut intent, to, "p", None, DateTime::UNIX_EPOCH).unwrap();
    }
    assert_eq!(intent.transition_log.len(), 4);
}
