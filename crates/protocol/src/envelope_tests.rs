use super::*;

fn ts() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

#[test]
fn info_event_round_trips_through_json() {
    let event = ProtocolEvent::new(
        SpriteId::new("sprite-a"),
        "run_1",
        ts(),
        EventPayload::Info { message: "starting".into(), kind: None, metadata: None },
    );

    let json = serde_json::to_string(&event).expect("serialize failed");
    assert!(json.contains("\"event_type\":\"INFO\""));

    let back: ProtocolEvent = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(back, event);
}

#[test]
fn waiting_event_requires_checkpoint_id() {
    let json = r#"{
        "protocol_version": "v1",
        "sprite_id": "sprite-a",
        "work_item_id": "run_1",
        "timestamp": "1970-01-01T00:00:00Z",
        "event_type": "WAITING",
        "payload": { "reason": "PR_REVIEW" }
    }"#;

    let err = serde_json::from_str::<ProtocolEvent>(json).unwrap_err();
    assert!(err.to_string().contains("checkpoint_id"));
}

#[test]
fn environment_proposal_round_trips_allowlisted_and_custom_adjustment() {
    let allowlisted = EventPayload::EnvironmentProposal {
        observed_failure: "timeout calling sprite API".into(),
        suggested_adjustment: SuggestedAdjustment { kind: AdjustmentType::Timeout, detail: None },
        confidence: 0.8,
        evidence: vec!["observed 5 consecutive timeouts".into()],
        scope: ProposalScope::RepoSpecific,
    };
    let event = ProtocolEvent::new(SpriteId::new("sprite-a"), "run_1", ts(), allowlisted);
    let json = serde_json::to_value(&event).expect("serialize failed");
    assert_eq!(json["payload"]["suggested_adjustment"]["type"], "timeout");

    let custom_json = r#"{
        "protocol_version": "v1",
        "sprite_id": "sprite-a",
        "work_item_id": "run_1",
        "timestamp": "1970-01-01T00:00:00Z",
        "event_type": "ENVIRONMENT_PROPOSAL",
        "payload": {
            "observed_failure": "x",
            "suggested_adjustment": { "type": "rotate_credentials" },
            "confidence": 0.5,
            "evidence": [],
            "scope": "global_candidate"
        }
    }"#;
    let decoded: ProtocolEvent = serde_json::from_str(custom_json).expect("deserialize failed");
    match decoded.payload {
        EventPayload::EnvironmentProposal { suggested_adjustment, .. } => {
            assert_eq!(suggested_adjustment.kind, AdjustmentType::Custom("rotate_credentials".into()));
        }
        other => panic!("expected environment proposal, got {other:?}"),
    }
}

#[test]
fn reconcile_key_uses_event_type_and_timestamp() {
    let event = ProtocolEvent::new(
        SpriteId::new("sprite-a"),
        "run_1",
        ts(),
        EventPayload::PhaseStarted { phase: "build".into() },
    );
    assert_eq!(event.reconcile_key(), ("PHASE_STARTED", ts()));
}
