use super::*;

#[test]
fn missing_policy_file_falls_back_to_default_gate_config() {
    let config = load_gate_config(Path::new("/nonexistent/lattice.toml")).expect("default on missing file");
    assert!(config.allow_controlled);
}

#[test]
fn policy_file_is_parsed_into_gate_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lattice.toml");
    std::fs::write(
        &path,
        r#"
        allow_controlled = true
        allow_dangerous = false
        require_approval_for_controlled = false
        policy_rules = []
        "#,
    )
    .expect("write policy file");

    let config = load_gate_config(&path).expect("parse policy file");
    assert!(!config.allow_dangerous);
    assert!(!config.require_approval_for_controlled);
}

#[test]
fn malformed_policy_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lattice.toml");
    std::fs::write(&path, "not valid toml {{{").expect("write policy file");

    let result = load_gate_config(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
