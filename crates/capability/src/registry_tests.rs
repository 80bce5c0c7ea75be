use super::*;
use crate::fly::StubFly;
use crate::github::StubGitHub;
use crate::secret_store::StubSecretStore;
use crate::sprites::StubSprites;

fn sample_registry() -> CapabilityRegistry {
    CapabilityRegistry::new(
        Arc::new(StubSprites::new()),
        Arc::new(StubGitHub::new()),
        Arc::new(StubFly::new()),
        Arc::new(StubSecretStore::new()),
    )
}

#[tokio::test]
async fn readers_see_the_swapped_implementation() {
    let registry = sample_registry();
    let new_sprites = StubSprites::new();
    new_sprites.seed("sprite-a", "running");
    registry.set_sprites(Arc::new(new_sprites));

    let sprites = registry.sprites();
    assert_eq!(sprites.get("sprite-a").await.unwrap().status, "running");
}

#[tokio::test]
async fn snapshot_reference_is_stable_across_a_swap() {
    let registry = sample_registry();
    let snapshot = registry.github();
    registry.set_github(Arc::new(StubGitHub::new()));

    // The snapshot taken before the swap still answers calls normally; it
    // just isn't the implementation future readers will get.
    assert!(snapshot.list_issues("org/repo").await.unwrap().is_empty());
}
