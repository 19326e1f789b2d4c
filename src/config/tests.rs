//! Tests for config functionality.

use crate::config::{Config, Messages, ReleaseMode};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.ping_seconds, 15);
    assert_eq!(config.api_base_url, "/locking/api/lock");
    assert!(config.api_url.is_none());
    assert!(config.host_url.is_none());
    assert_eq!(config.release_mode, ReleaseMode::Delete);
    assert_eq!(config.cookie_jar, ".formlock/cookies.json");
    assert_eq!(config.controls, vec!["content".to_string()]);
    assert!(config.admin_notice);
    assert_eq!(config.messages, Messages::default());
    assert_eq!(config.ping_interval(), Duration::from_secs(15));
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    assert_eq!(config.ping_seconds, 15);
    assert_eq!(config.timeout_seconds, 10);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
host_url: https://cms.example.com
ping_seconds: 5
release_mode: beacon
messages:
  locked_by_user: Gesperrt von
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.host_url.as_deref(), Some("https://cms.example.com"));
    assert_eq!(config.ping_seconds, 5);
    assert_eq!(config.release_mode, ReleaseMode::Beacon);
    assert_eq!(config.messages.locked_by_user, "Gesperrt von");
    // Unspecified messages keep their defaults
    assert_eq!(config.messages.take_lock, "Take over lock");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
ping_seconds: 20
some_future_setting: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.ping_seconds, 20);
}

#[test]
fn test_zero_ping_is_rejected() {
    let err = Config::from_yaml("ping_seconds: 0").unwrap_err();
    assert!(err.to_string().contains("ping_seconds"));
}

#[test]
fn test_missing_endpoint_is_rejected() {
    let err = Config::from_yaml("api_base_url: ''").unwrap_err();
    assert!(err.to_string().contains("api_base_url"));

    // An explicit api_url makes an empty base acceptable
    let config = Config::from_yaml("api_base_url: ''\napi_url: /locks/blog/post/").unwrap();
    assert_eq!(
        config.endpoint().api_url.as_deref(),
        Some("/locks/blog/post/")
    );
}

#[test]
fn test_empty_control_is_rejected() {
    let err = Config::from_yaml("controls: [title, '']").unwrap_err();
    assert!(err.to_string().contains("controls"));
}

#[test]
fn test_yaml_round_trip_preserves_values() {
    let mut config = Config::default();
    config.ping_seconds = 30;
    config.current_user = "alice".to_string();

    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.ping_seconds, 30);
    assert_eq!(parsed.current_user, "alice");
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("formlock.yaml");
    std::fs::write(&path, "ping_seconds: 7\ncurrent_user: carol\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.ping_seconds, 7);
    assert_eq!(config.current_user, "carol");
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_unknown_release_mode_is_rejected() {
    let err = Config::from_yaml("release_mode: post").unwrap_err();
    assert!(err.to_string().contains("failed to parse YAML"));
}
