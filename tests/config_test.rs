//! 設定ファイルの読み書きテスト

use label_scan::config::Config;
use label_scan_common::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use tempfile::tempdir;

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.endpoint, GEMINI_API_BASE);
    assert_eq!(config.timeout_seconds, 60);
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("label-scan").join("config.json");

    let mut config = Config::default();
    config.set_api_key("stored-key".to_string());
    config.model = "gemini-1.5-pro".to_string();
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).expect("設定読み込み失敗");
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"model": "gemini-1.5-flash"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.model, "gemini-1.5-flash");
    assert_eq!(config.api_key, None);
    assert_eq!(config.timeout_seconds, 60);
}

#[test]
fn test_broken_config_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}
