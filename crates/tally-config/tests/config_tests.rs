use std::fs;

use tally_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.currency_symbol, "$");
    assert!(cfg.ui_color_enabled);
    assert!(cfg.confirm_destructive);
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency_symbol = "€".to_string();
    cfg.ui_color_enabled = false;
    cfg.data_dir = Some(dir.path().join("ledger"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.resolve_data_dir(), dir.path().join("ledger"));
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "currency_symbol": "£" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency_symbol, "£");
    assert!(loaded.confirm_destructive);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn malformed_config_names_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{").expect("write");

    let err = ConfigManager::new(path.clone()).load().expect_err("malformed");
    assert!(matches!(err, ConfigError::Malformed { path: ref bad, .. } if *bad == path));
    assert!(err.to_string().contains("config.json"));
}
