use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("ragbot_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("ragbot.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_local_service() {
    let settings = Settings::default();
    let endpoints = settings.endpoints().expect("endpoints");
    assert_eq!(endpoints.upload.as_str(), "http://localhost:8000/api/upload");
    assert_eq!(
        endpoints.query.as_str(),
        "http://localhost:8000/api/query_stream"
    );
    assert_eq!(endpoints.health.as_str(), "http://localhost:8000/");
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        r#"
server_url = "http://rag.internal:9000"
request_timeout_secs = 30
"#,
    );

    let settings = load_settings_from(Some(&path), Some(HashMap::new())).expect("load");
    assert_eq!(settings.server_url, "http://rag.internal:9000");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(settings.query_path, DEFAULT_QUERY_PATH);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_overrides_file() {
    let path = temp_config("server_url = \"http://from-file:9000\"\n");
    let env = HashMap::from([
        (
            "RAGBOT__SERVER_URL".to_string(),
            "http://from-env:7000".to_string(),
        ),
        ("RAGBOT__MAX_UPLOAD_BYTES".to_string(), "1024".to_string()),
    ]);

    let settings = load_settings_from(Some(&path), Some(env)).expect("load");
    assert_eq!(settings.server_url, "http://from-env:7000");
    assert_eq!(settings.max_upload_bytes, 1024);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn command_line_flag_overrides_environment_and_file() {
    let path = temp_config("server_url = \"http://from-file:9000\"\nrequest_timeout_secs = 5\n");
    let env = HashMap::from([(
        "RAGBOT__SERVER_URL".to_string(),
        "http://from-env:7000".to_string(),
    )]);

    let settings = load_settings_from(Some(&path), Some(env))
        .expect("load")
        .with_server_url_override(Some("http://from-flag:6000".to_string()));
    assert_eq!(settings.server_url, "http://from-flag:6000");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(
        settings.endpoints().expect("endpoints").query.as_str(),
        "http://from-flag:6000/api/query_stream"
    );

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn absent_or_blank_flag_keeps_loaded_url() {
    let env = HashMap::from([(
        "RAGBOT__SERVER_URL".to_string(),
        "http://from-env:7000".to_string(),
    )]);
    let loaded = load_settings_from(None, Some(env)).expect("load");

    let unchanged = loaded.clone().with_server_url_override(None);
    assert_eq!(unchanged.server_url, "http://from-env:7000");
    let blank = loaded.with_server_url_override(Some("  ".to_string()));
    assert_eq!(blank.server_url, "http://from-env:7000");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = env::temp_dir().join("ragbot_config_test_missing").join("nope.toml");
    let err = load_settings_from(Some(&path), Some(HashMap::new())).expect_err("must fail");
    assert!(matches!(err, SettingsError::Load(_)));
}

#[test]
fn rejects_unparseable_server_url() {
    let settings = Settings {
        server_url: "not a url".into(),
        ..Settings::default()
    };
    let err = settings.endpoints().expect_err("must fail");
    assert!(matches!(err, SettingsError::InvalidUrl { .. }));
}
