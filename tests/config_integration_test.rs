//! Integration tests for configuration loading and validation
//!
//! Every test takes ENV_MUTEX because the CYCLETIME_* overrides are read from
//! the process environment on each load.

use cycletime::config::load_config;
use cycletime::domain::{AttributeField, CycleTimeError};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("CYCLETIME_DOMAIN");
    std::env::remove_var("CYCLETIME_USERNAME");
    std::env::remove_var("CYCLETIME_PASSWORD");
    std::env::remove_var("TEST_V1_PASSWORD");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const COMPLETE: &str = r#"---
# Team Phoenix
Connection:
    Domain: https://www7.v1host.com/Acme/
    Username: analyst
    Password: hunter2
Criteria:
    Scopes: Mobile App, Web Portal
    Timeboxes: Sprint 1
    Themes: Checkout
Workflow:
    Backlog: (None), Future, (Created)
    In Progress: In Progress
    Done: Done, Accepted
Attributes:
    Project: Scope
    Sprint: Timebox
    Feature: Theme
    Risk: Custom_Risk
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.connection.domain, "https://www7.v1host.com/Acme");
    assert_eq!(config.connection.username, "analyst");
    assert_eq!(
        config.connection.password.as_ref().unwrap().expose_secret().as_ref(),
        "hunter2"
    );

    assert_eq!(config.criteria.scopes, vec!["Mobile App", "Web Portal"]);
    assert_eq!(config.criteria.timeboxes, vec!["Sprint 1"]);
    assert_eq!(config.criteria.themes, vec!["Checkout"]);

    assert_eq!(config.stages.names(), ["Backlog", "In Progress", "Done"]);
    assert!(config.stages.created_in_first_stage());
    assert_eq!(config.stages.stage_for("(None)"), Some(0));
    assert_eq!(config.stages.stage_for("Accepted"), Some(2));
    assert_eq!(config.stages.stage_for("Blocked"), None);

    let fields: Vec<&AttributeField> = config.attributes.iter().map(|a| &a.field).collect();
    assert_eq!(
        fields,
        vec![
            &AttributeField::Scope,
            &AttributeField::Timebox,
            &AttributeField::Theme,
            &AttributeField::Custom("Custom_Risk".to_string()),
        ]
    );
}

#[test]
fn test_password_is_redacted_in_debug() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    let debug = format!("{:?}", config.connection);
    assert!(!debug.contains("hunter2"));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_V1_PASSWORD", "from-env");

    let file = write_config(
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\n    Password: ${TEST_V1_PASSWORD}\nWorkflow:\n    Done: Done\n",
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(
        config.connection.password.as_ref().unwrap().expose_secret().as_ref(),
        "from-env"
    );
    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\n    Password: ${TEST_V1_PASSWORD}\nWorkflow:\n    Done: Done\n",
    );
    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, CycleTimeError::Configuration(_)));
    assert!(err.to_string().contains("TEST_V1_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CYCLETIME_DOMAIN", "https://other.example.com/");
    std::env::set_var("CYCLETIME_USERNAME", "robot");
    std::env::set_var("CYCLETIME_PASSWORD", "override");

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.connection.domain, "https://other.example.com");
    assert_eq!(config.connection.username, "robot");
    assert_eq!(
        config.connection.password.as_ref().unwrap().expose_secret().as_ref(),
        "override"
    );
    cleanup_env_vars();
}

#[test]
fn test_invalid_configs() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        // Unknown section
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\nSettings:\n    X: 1\nWorkflow:\n    Done: Done\n",
        // Unknown connection key
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\n    Port: 80\nWorkflow:\n    Done: Done\n",
        // Unknown attribute kind
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\nWorkflow:\n    Done: Done\nAttributes:\n    Owner: Owners\n",
        // (Created) outside the first stage
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\nWorkflow:\n    Open: Future\n    Done: Done, (Created)\n",
        // Label in two stages
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\nWorkflow:\n    Open: Future\n    Done: Future\n",
        // No stages
        "Connection:\n    Domain: https://v1.example.com\n    Username: u\n",
        // Missing username
        "Connection:\n    Domain: https://v1.example.com\nWorkflow:\n    Done: Done\n",
        // Not a URL
        "Connection:\n    Domain: v1.example.com\n    Username: u\nWorkflow:\n    Done: Done\n",
        // Line without a colon
        "Connection:\n    Domain https://v1.example.com\n",
        // Indented key before any section
        "    Domain: https://v1.example.com\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, CycleTimeError::Configuration(_)),
            "expected configuration error for {contents:?}, got {err:?}"
        );
    }
}

#[test]
fn test_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let err = load_config("/nonexistent/cycletime.yaml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
