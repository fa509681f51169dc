use std::fs;

use artmark::config::{Config, CONFIG_FILE};
use artmark::error::Error;
use artmark::storage::Storage;

#[test]
fn config_defaults_when_sections_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(CONFIG_FILE), "").expect("write config");
    let config = Config::load(&dir.path().join(CONFIG_FILE)).expect("load");

    assert_eq!(config.store.file, "store.json");
    assert!(config.reminders.enabled);
    assert_eq!(config.reminders.file, "reminders.json");
    assert!(config.notifications.enabled);
    assert_eq!(config.tasks.due_format, "%Y-%m-%d %H:%M");
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let toml = r#"
[store]
file = "artmark.json"

[reminders]
enabled = false

[tasks]
due_format = "%d/%m/%Y %H:%M"
"#;
    fs::write(dir.path().join(CONFIG_FILE), toml)?;

    let config = Config::load(&dir.path().join(CONFIG_FILE))?;
    assert_eq!(config.store.file, "artmark.json");
    assert!(!config.reminders.enabled);
    assert_eq!(config.reminders.file, "reminders.json");
    assert!(config.notifications.enabled);
    assert_eq!(config.tasks.due_format, "%d/%m/%Y %H:%M");
    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[store]\nfile = \"../escape.json\"\n",
    )
    .expect("write config");

    let err = Config::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn init_writes_loadable_default_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::new(dir.path().join("data"));
    assert!(!storage.is_initialized());
    assert!(matches!(
        storage.require_initialized(),
        Err(Error::NotInitialized(_))
    ));

    assert!(storage.init().expect("init"));
    assert!(!storage.init().expect("second init"));

    let config = Config::load(&storage.config_file()).expect("load");
    assert_eq!(storage.store_file(&config), dir.path().join("data/store.json"));
}
