use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_path(name: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("catalog_admin_{name}_{suffix}.toml"))
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_with(&temp_path("missing"), no_env).expect("defaults");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_path("file");
    fs::write(
        &path,
        "api_url = \"https://shop.example/\"\nrequest_timeout_secs = 5\n",
    )
    .expect("write config");

    let settings = load_settings_with(&path, no_env).expect("settings");
    assert_eq!(settings.api_url, "https://shop.example/");
    assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    assert_eq!(settings.log_filter, "info");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_path("env");
    fs::write(&path, "api_url = \"https://file.example\"\n").expect("write config");
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ADMIN_API_URL", "https://admin.example"),
        ("APP__API_URL", "https://app.example"),
        ("ADMIN_REQUEST_TIMEOUT_SECS", "not-a-number"),
        ("APP__LOG_FILTER", "debug"),
    ]);

    let settings =
        load_settings_with(&path, |key| vars.get(key).map(|v| v.to_string())).expect("settings");
    assert_eq!(settings.api_url, "https://app.example");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.log_filter, "debug");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_file_is_reported() {
    let path = temp_path("broken");
    fs::write(&path, "request_timeout_secs = \"soon\"\n").expect("write config");

    let err = load_settings_with(&path, no_env).expect_err("type mismatch");
    assert!(err.to_string().contains("invalid config file"));

    fs::remove_file(path).expect("cleanup");
}
