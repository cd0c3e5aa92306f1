mod common;

use common::{JtWorkspace, OFFLINE_CONFIG, error_code, error_record, run_jt};

#[test]
fn e2e_missing_config_is_a_structured_record() {
    let workspace = JtWorkspace::new();

    let run = run_jt(&workspace, ["list"]);
    assert!(!run.status.success());
    assert_eq!(run.status.code(), Some(2));

    let record = error_record(&run);
    assert_eq!(record["error"]["code"], "CONFIG_ERROR");
    assert!(
        record["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("config.json")),
        "message should name the missing file: {record}"
    );
}

#[test]
fn e2e_missing_credentials() {
    let workspace = JtWorkspace::new();
    workspace.write_config(
        r#"{ "jira": { "site": "http://127.0.0.1:9", "project": "AS" } }"#,
    );

    let run = run_jt(&workspace, ["list"]);
    assert!(!run.status.success());
    assert_eq!(run.status.code(), Some(3));
    assert_eq!(error_code(&run), "AUTH_MISSING");

    // The record carries a hint as detail text.
    let record = error_record(&run);
    assert!(
        record["error"]["details"]
            .as_str()
            .is_some_and(|d| d.contains("JIRA_API_TOKEN"))
    );
}

#[test]
fn e2e_malformed_config() {
    let workspace = JtWorkspace::new();
    workspace.write_config("{ not json");

    let run = run_jt(&workspace, ["list"]);
    assert_eq!(run.status.code(), Some(2));
    assert_eq!(error_code(&run), "CONFIG_ERROR");
}

#[test]
fn e2e_unreachable_tracker_is_a_network_error() {
    let workspace = JtWorkspace::new();
    workspace.write_config(OFFLINE_CONFIG);

    let run = run_jt(&workspace, ["list", "--mine"]);
    assert!(!run.status.success());
    assert_eq!(run.status.code(), Some(6));
    assert_eq!(error_code(&run), "NETWORK_ERROR");

    // Errors are the only stdout payload; nothing partial precedes them.
    assert!(run.stdout.trim_start().starts_with('{'));
}

#[test]
fn e2e_update_requires_a_change() {
    let workspace = JtWorkspace::new();
    workspace.write_config(OFFLINE_CONFIG);

    let run = run_jt(&workspace, ["update", "AS-1"]);
    assert_eq!(run.status.code(), Some(5));
    assert_eq!(error_code(&run), "INVALID_ARGS");
}

#[test]
fn e2e_fields_requires_a_field() {
    let workspace = JtWorkspace::new();
    workspace.write_config(OFFLINE_CONFIG);

    let run = run_jt(&workspace, ["fields", "AS-1"]);
    assert_eq!(run.status.code(), Some(5));
    assert_eq!(error_code(&run), "INVALID_ARGS");
}

#[test]
fn e2e_update_without_key_outside_git() {
    let workspace = JtWorkspace::new();
    workspace.write_config(OFFLINE_CONFIG);

    // No key, no --from-branch: rejected before any lookup.
    let run = run_jt(&workspace, ["update", "--status", "Done"]);
    assert_eq!(run.status.code(), Some(5));
    assert_eq!(error_code(&run), "INVALID_ARGS");
}

#[test]
fn e2e_conflicting_sprint_and_backlog_flags_rejected() {
    let workspace = JtWorkspace::new();
    workspace.write_config(OFFLINE_CONFIG);

    let run = run_jt(&workspace, ["list", "--sprint", "current", "--backlog"]);
    assert!(!run.status.success());
}
