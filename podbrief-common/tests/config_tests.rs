//! Configuration loading tests
//!
//! Tests touching process environment variables are marked #[serial] so
//! they never run in parallel with each other.

use podbrief_common::config::{load_config, read_toml_config, resolve_config_path, CONFIG_PATH_ENV};
use podbrief_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ENV_VARS: [&str; 5] = [
    CONFIG_PATH_ENV,
    "OPENAI_API_KEY",
    "PODBRIEF_DB_PATH",
    "DB_PATH",
    "PODBRIEF_PORT",
];

fn clear_env() {
    for name in ENV_VARS {
        env::remove_var(name);
    }
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("podbrief.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_explicit_file_is_loaded() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        [server]
        port = 8123

        [database]
        path = "/tmp/briefs.db"

        [completion]
        api_key = "sk-file"
        requests_per_minute = 30
        "#,
    );

    let config = load_config(Some(&path)).unwrap();

    assert_eq!(config.server.port, 8123);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.database.path, PathBuf::from("/tmp/briefs.db"));
    assert_eq!(config.completion.api_key.as_deref(), Some("sk-file"));
    assert_eq!(config.completion.requests_per_minute, 30);
}

#[test]
#[serial]
fn test_env_overrides_file_values() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        [server]
        port = 8123

        [completion]
        api_key = "sk-file"
        "#,
    );

    env::set_var("OPENAI_API_KEY", "sk-env");
    env::set_var("DB_PATH", "/tmp/legacy.db");
    env::set_var("PODBRIEF_PORT", "9000");

    let config = load_config(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.completion.api_key.as_deref(), Some("sk-env"));
    assert_eq!(config.database.path, PathBuf::from("/tmp/legacy.db"));
    assert_eq!(config.server.port, 9000);
}

#[test]
#[serial]
fn test_podbrief_db_path_wins_over_db_path() {
    clear_env();
    env::set_var("PODBRIEF_DB_PATH", "/tmp/preferred.db");
    env::set_var("DB_PATH", "/tmp/legacy.db");

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "");
    let config = load_config(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.database.path, PathBuf::from("/tmp/preferred.db"));
}

#[test]
#[serial]
fn test_invalid_port_env_is_ignored() {
    clear_env();
    env::set_var("PODBRIEF_PORT", "not-a-port");

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 7000\n");
    let config = load_config(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.server.port, 7000);
}

#[test]
#[serial]
fn test_config_path_from_env() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"debug\"\n");
    env::set_var(CONFIG_PATH_ENV, &path);

    assert_eq!(resolve_config_path(None), Some(path.clone()));
    let config = load_config(None).unwrap();
    clear_env();

    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env();
    let result = load_config(Some(std::path::Path::new("/nonexistent/podbrief.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server\nport = ");

    match read_toml_config(&path) {
        Err(Error::ConfigParse { path: reported, .. }) => {
            assert!(reported.ends_with("podbrief.toml"));
        }
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[fetch]\ntimeout_secs = 0\n");

    assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
}
