use super::*;

#[test]
fn known_pairs_classify() {
    assert_eq!(classify("sprites", "list"), Some(Classification::Safe));
    assert_eq!(classify("sprites", "delete"), Some(Classification::Dangerous));
    assert_eq!(classify("github", "merge_pr"), Some(Classification::Dangerous));
}

#[test]
fn unknown_pair_is_none_not_safe() {
    assert_eq!(classify("sprites", "teleport"), None);
    assert_eq!(classify("unknown_capability", "list"), None);
}
