//! Configuration layering: file, environment and CLI flags.

use fleetdash::cli::Args;
use fleetdash::config::{
    ConfigError, DashConfig, ScreenKind, ENV_BASE_URL, ENV_POLL_MS, ENV_TIMEOUT_MS,
};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn clear_env() {
    for key in [ENV_BASE_URL, ENV_POLL_MS, ENV_TIMEOUT_MS] {
        std::env::remove_var(key);
    }
}

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_file_then_env_then_cli() {
    clear_env();
    let file = toml_file(
        r#"
        base_url = "http://from-file:5000"
        interval_ms = 2000
        "#,
    );
    std::env::set_var(ENV_POLL_MS, "750");

    let config = DashConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.base_url, "http://from-file:5000");
    assert_eq!(config.interval, Duration::from_millis(750));

    let args = Args::try_parse_from(["fleetdash", "--interval-ms", "300"]).unwrap();
    let config = args.apply(config).unwrap();
    assert_eq!(config.interval, Duration::from_millis(300));
    assert_eq!(config.base_url, "http://from-file:5000");
    clear_env();
}

#[test]
#[serial]
fn test_env_base_url_and_timeout() {
    clear_env();
    std::env::set_var(ENV_BASE_URL, "http://from-env:8080/");
    std::env::set_var(ENV_TIMEOUT_MS, "1500");

    let config = DashConfig::default().apply_env().unwrap();
    assert_eq!(config.base_url, "http://from-env:8080/");
    assert_eq!(config.http_timeout, Some(Duration::from_millis(1500)));

    let trucks = config.screen("trucks").unwrap();
    assert_eq!(
        config.poll_config(trucks).unwrap().url(),
        "http://from-env:8080/trucks.json"
    );
    clear_env();
}

#[test]
#[serial]
fn test_env_zero_interval_rejected() {
    clear_env();
    std::env::set_var(ENV_POLL_MS, "0");
    let err = DashConfig::default().apply_env().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroInterval(_)));
    clear_env();
}

#[test]
#[serial]
fn test_file_adds_screen_after_builtins() {
    clear_env();
    let file = toml_file(
        r#"
        [[screens]]
        id = "routes"
        title = "Routes"
        url = "http://other-host/routes.txt"
        kind = "text"
        interval_ms = 5000
        "#,
    );

    let config = DashConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.screen_ids(), vec!["trucks", "dumpsters", "map", "routes"]);

    let routes = config.screen("routes").unwrap();
    assert_eq!(routes.kind, ScreenKind::Text);
    let poll = config.poll_config(routes).unwrap();
    assert_eq!(poll.url(), "http://other-host/routes.txt");
    assert_eq!(poll.interval(), Duration::from_secs(5));
}

#[test]
#[serial]
fn test_cli_selects_mount_points() {
    clear_env();
    let file = toml_file("");
    let config = DashConfig::load(Some(file.path())).unwrap();
    let args = Args::try_parse_from(["fleetdash", "-s", "map", "-s", "dumpsters"]).unwrap();
    let config = args.apply(config).unwrap();
    assert_eq!(config.screen_ids(), vec!["map", "dumpsters"]);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let err = DashConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
#[serial]
fn test_bad_toml_is_an_error() {
    clear_env();
    let file = toml_file("interval_ms = \"fast\"");
    let err = DashConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("invalid config file"));
}
