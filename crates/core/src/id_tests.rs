use super::*;

crate::define_id! {
    pub struct TestId("tst_");
}

#[test]
fn new_ids_carry_the_prefix_and_fixed_length() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst_"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn distinct_ids_are_not_equal() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn from_string_round_trips() {
    let id = TestId::from_string("tst_abc");
    assert_eq!(id.as_str(), "tst_abc");
    assert_eq!(id.suffix(), "abc");
}

#[test]
fn short_truncates_the_suffix() {
    let id = TestId::from_string("tst_abcdefgh");
    assert_eq!(id.short(3), "abc");
    assert_eq!(id.short(100), "abcdefgh");
}

#[test]
fn serde_round_trips_through_json() {
    let id = TestId::new();
    let json = serde_json::to_string(&id).expect("serialize");
    let back: TestId = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(id, back);
}
