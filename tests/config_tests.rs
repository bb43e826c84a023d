use contract_fields::{
    config::{ConfigManager, FormatterConfig},
    dates::MonthOverflow,
    form::PageMode,
};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let config = manager.load().expect("load defaults");

    assert_eq!(config, FormatterConfig::default());
    assert_eq!(config.page_mode, PageMode::Create);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));

    let mut config = FormatterConfig::for_mode(PageMode::Edit);
    config.month_overflow = MonthOverflow::Clamp;
    config.money_class = "campo-moneda".to_string();

    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, config);
    assert!(!manager.path().with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    assert!(ConfigManager::new(path).load().is_err());
}
