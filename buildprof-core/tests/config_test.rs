use std::fs;

use buildprof_core::config::{ClockKind, ProfilerConfig};
use buildprof_core::{Clock, SortKey};
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let toml = r#"
clock = "monotonic"

[report]
sort = "waiting"
top = 10
"#;

    let config = ProfilerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.clock, ClockKind::Monotonic);
    assert_eq!(config.report.sort, SortKey::WaitingTime);
    assert_eq!(config.report.top, Some(10));
}

#[test]
fn test_parse_config_defaults() {
    let config = ProfilerConfig::from_toml_str("").unwrap();
    assert_eq!(config, ProfilerConfig::default());
    assert_eq!(config.clock, ClockKind::System);
    assert_eq!(config.report.sort, SortKey::SelfTime);
    assert_eq!(config.report.top, None);
}

#[test]
fn test_invalid_sort_key() {
    let toml = r#"
[report]
sort = "fastest"
"#;

    assert!(ProfilerConfig::from_toml_str(toml).is_err());
}

#[test]
fn test_zero_top_is_rejected() {
    let toml = r#"
[report]
top = 0
"#;

    let err = ProfilerConfig::from_toml_str(toml).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ProfilerConfig::load(temp_dir.path().join("buildprof.toml")).unwrap();
    assert_eq!(config, ProfilerConfig::default());
}

#[test]
fn test_load_reports_path_on_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("buildprof.toml");
    fs::write(&path, "clock = 3").unwrap();

    let err = ProfilerConfig::load(&path).unwrap_err().to_string();
    assert!(err.contains("buildprof.toml"));
}

#[test]
fn test_clock_kind_builds_clock() {
    let clock = ClockKind::Monotonic.build();
    assert!(clock.now() >= 0);
    assert!(ClockKind::System.build().now() > 0);
}
