//! Shared harness for end-to-end tests.
//!
//! Every test runs the real binary inside a throwaway workspace with a
//! scrubbed environment, so the offline flows (config resolution,
//! argument validation, branch parsing, error records) behave the same
//! on any machine.

#![allow(dead_code)]

use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug)]
pub struct JtRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

pub struct JtWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl JtWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Drop a config file into the workspace root.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.root.join("config.json");
        fs::write(&path, contents).expect("write config");
        path
    }
}

/// A config with credentials but an unreachable site, for exercising
/// everything up to (and including) the first connection attempt.
pub const OFFLINE_CONFIG: &str = r#"{
    "auth": { "email": "dev@example.com", "apiToken": "token-1" },
    "jira": {
        "site": "http://127.0.0.1:9",
        "project": "AS",
        "statusMapping": {
            "todo": ["To Do"],
            "in_progress": ["In Progress"],
            "done": ["Done"]
        }
    },
    "team": { "members": [
        { "name": "이승우", "aliases": ["승우"], "accountId": "acc-lee" }
    ]},
    "list": { "excludeStatuses": ["Done"] }
}"#;

pub fn run_jt<I, S>(workspace: &JtWorkspace, args: I) -> JtRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jt"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("HOME", &workspace.root);
    // Scrub ambient credentials and config so tests are hermetic.
    cmd.env_remove("JIRA_EMAIL");
    cmd.env_remove("JIRA_API_TOKEN");
    cmd.env_remove("JT_CONFIG");
    cmd.env_remove("XDG_CONFIG_HOME");

    let output = cmd.output().expect("run jt");
    JtRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}

/// Parse the structured error record a failing invocation prints.
pub fn error_record(run: &JtRun) -> serde_json::Value {
    let record: serde_json::Value =
        serde_json::from_str(&run.stdout).expect("stdout is one JSON record");
    assert_eq!(record["success"], false, "record: {record}");
    record
}

/// Error code of a failing invocation.
pub fn error_code(run: &JtRun) -> String {
    error_record(run)["error"]["code"]
        .as_str()
        .expect("error code")
        .to_string()
}
