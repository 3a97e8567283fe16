//! Configuration loading: defaults, file layering and validation.

use std::fs;

use configuration::error::ConfigError;
use configuration::{ServerOverrides, load_config};
use tempfile::TempDir;

#[test]
fn missing_file_yields_the_documented_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.analytics.volatility_window, 30);
    assert_eq!(config.analytics.trading_days_per_year, 252);
    assert_eq!(config.analytics.event_window_days, 30);
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.data.prices_path.to_str(), Some("data/brent_daily.csv"));
    assert!(config.logging.directory.is_none());
}

#[test]
fn file_values_override_defaults_section_by_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[data]
prices_path = "/srv/brent.csv"

[analytics]
event_window_days = 14

[server]
port = 8080
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.data.prices_path.to_str(), Some("/srv/brent.csv"));
    assert_eq!(config.data.events_path.to_str(), Some("data/events.csv"));
    assert_eq!(config.analytics.event_window_days, 14);
    assert_eq!(config.analytics.volatility_window, 30);
    assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
}

#[test]
fn degenerate_windows_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[analytics]\nvolatility_window = 1\n").unwrap();

    match load_config(&path) {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("volatility_window")),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn command_line_overrides_win() {
    let dir = TempDir::new().unwrap();
    let server = load_config(&dir.path().join("absent.toml"))
        .unwrap()
        .server
        .with_overrides(&ServerOverrides {
            host: Some("127.0.0.1".parse().unwrap()),
            port: None,
        });

    assert_eq!(server.socket_addr().to_string(), "127.0.0.1:5000");
}
