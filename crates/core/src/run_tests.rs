use super::*;
use crate::intent::IntentId;
use crate::sprite::SpriteId;

#[test]
fn new_run_starts_pending_with_no_artifacts() {
    let run = Run::new(IntentId::new(), SpriteId::new("s1"), "echo hi", RunMode::ExecPost);
    assert_eq!(run.status, RunStatus::Pending);
    assert!(run.artifacts.is_empty());
    assert!(!run.status.is_terminal());
}

#[test]
fn record_artifact_inserts_under_kind() {
    let mut run = Run::new(IntentId::new(), SpriteId::new("s1"), "echo hi", RunMode::ExecWs);
    run.record_artifact("pr", serde_json::json!({"number": 42}));
    assert_eq!(run.artifacts["pr"]["number"], 42);
}

#[test]
fn record_artifact_overwrites_same_kind() {
    let mut run = Run::new(IntentId::new(), SpriteId::new("s1"), "echo hi", RunMode::ExecWs);
    run.record_artifact("log", serde_json::json!("first"));
    run.record_artifact("log", serde_json::json!("second"));
    assert_eq!(run.artifacts["log"], serde_json::json!("second"));
}

#[test]
fn terminal_statuses() {
    assert!(RunStatus::Succeeded.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert!(RunStatus::Canceled.is_terminal());
    assert!(!RunStatus::Waiting.is_terminal());
    assert!(!RunStatus::Blocked.is_terminal());
}
