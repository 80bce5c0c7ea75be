use super::*;
use lattice_capability::StubSprites;
use lattice_core::FakeClock;
use std::time::Duration;

fn supervisor(capability: StubSprites) -> FleetSupervisor<FakeClock> {
    FleetSupervisor::new(
        Arc::new(capability),
        Arc::new(EventBus::new()),
        FakeClock::new(),
        CadenceConfig { fast_ms: 20, slow_ms: 20 },
        WorkerConfig::default(),
    )
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(60)).await;
}

#[tokio::test]
async fn list_reflects_spawned_workers_without_touching_their_channel() {
    let capability = StubSprites::new();
    capability.seed("s1", "cold");
    let sup = supervisor(capability);
    sup.spawn(SpriteId::new("s1"), SpriteState::Hibernating);
    settle().await;

    let snapshots = sup.list();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].id, SpriteId::new("s1"));
}

#[tokio::test]
async fn wake_sets_desired_state_and_converges() {
    let capability = StubSprites::new();
    capability.seed("s1", "cold");
    let sup = supervisor(capability);
    sup.spawn(SpriteId::new("s1"), SpriteState::Hibernating);

    let results = sup.wake(&[SpriteId::new("s1")]).await;
    assert!(results[&SpriteId::new("s1")].is_ok());
    settle().await;

    let snapshot = sup.lookup(&SpriteId::new("s1")).expect("spawned worker");
    assert_eq!(snapshot.desired, SpriteState::Ready);
    assert_eq!(snapshot.observed, SpriteState::Ready);
}

#[tokio::test]
async fn wake_on_unknown_sprite_reports_not_found() {
    let sup = supervisor(StubSprites::new());
    let results = sup.wake(&[SpriteId::new("ghost")]).await;
    assert!(matches!(results[&SpriteId::new("ghost")], Err(EngineError::NotFound(_))));
}

#[tokio::test]
async fn summary_counts_by_observed_state() {
    let capability = StubSprites::new();
    capability.seed("s1", "running");
    capability.seed("s2", "cold");
    let sup = supervisor(capability);
    sup.spawn(SpriteId::new("s1"), SpriteState::Ready);
    sup.spawn(SpriteId::new("s2"), SpriteState::Hibernating);
    settle().await;

    let summary = sup.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.by_state.get("ready").copied().unwrap_or(0), 1);
    assert_eq!(summary.by_state.get("hibernating").copied().unwrap_or(0), 1);
}

#[tokio::test]
async fn run_audit_waits_for_every_worker_ack_before_publishing_summary() {
    let capability = StubSprites::new();
    capability.seed("s1", "running");
    let sup = supervisor(capability);
    sup.spawn(SpriteId::new("s1"), SpriteState::Ready);
    settle().await;

    let summary = sup.run_audit().await;
    assert_eq!(summary.total, 1);
}

#[tokio::test]
async fn spawn_is_a_no_op_for_an_already_running_sprite() {
    let capability = StubSprites::new();
    capability.seed("s1", "cold");
    let sup = supervisor(capability);
    sup.spawn(SpriteId::new("s1"), SpriteState::Hibernating);
    sup.spawn(SpriteId::new("s1"), SpriteState::Ready);
    settle().await;

    assert_eq!(sup.list().len(), 1);
}
