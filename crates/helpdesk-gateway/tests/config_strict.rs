#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use helpdesk_core::{Role, UserId};
use helpdesk_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
users:
  - id: 1
    name: "Admin"
    role: MANAGER
    tokn: "abc" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
users:
  - id: 7
    name: "Sam"
    role: SUPPORT
    token: "t-7"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.users[0].id, UserId(7));
    assert_eq!(cfg.users[0].role, Role::Support);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.max_title_len, 200);
}

#[test]
fn unknown_role_is_rejected() {
    let bad = r#"
version: 1
users:
  - id: 1
    name: "Root"
    role: ADMIN
    token: "root"
"#;
    let err = config::load_from_str(bad).expect_err("closed role set");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn wrong_version_is_unsupported() {
    let bad = r#"
version: 2
users:
  - { id: 1, name: "A", role: USER, token: "a" }
"#;
    let err = config::load_from_str(bad).expect_err("version gate");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn duplicate_ids_and_tokens_fail_validation() {
    let dup_id = r#"
version: 1
users:
  - { id: 1, name: "A", role: USER, token: "a" }
  - { id: 1, name: "B", role: USER, token: "b" }
"#;
    assert!(config::load_from_str(dup_id).is_err());

    let dup_token = r#"
version: 1
users:
  - { id: 1, name: "A", role: USER, token: "same" }
  - { id: 2, name: "B", role: SUPPORT, token: "same" }
"#;
    assert!(config::load_from_str(dup_token).is_err());
}

#[test]
fn empty_users_and_out_of_range_limits_fail() {
    assert!(config::load_from_str("version: 1\nusers: []\n").is_err());

    let bad_limit = r#"
version: 1
server:
  max_body_len: 0
users:
  - { id: 1, name: "A", role: USER, token: "a" }
"#;
    let err = config::load_from_str(bad_limit).expect_err("range check");
    assert!(err.to_string().contains("max_body_len"));
}

#[test]
fn file_errors_name_the_path() {
    let sample = concat!(env!("CARGO_MANIFEST_DIR"), "/../../helpdesk.yaml");
    let cfg = config::load_from_file(sample).unwrap();
    assert!(!cfg.users.is_empty());

    let missing = "/nonexistent/helpdesk.yaml";
    let err = config::load_from_file(missing).expect_err("must fail");
    assert!(err.to_string().contains(missing), "{err}");
}
