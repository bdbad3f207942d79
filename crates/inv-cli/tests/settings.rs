//! Tests for settings loading and saving.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use inv_cli::settings::Settings;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.toml"));

    assert_eq!(settings, Settings::default());
    assert!(settings.export.escape_markup);
    assert_eq!(settings.export.date_format, "%d/%m/%Y");
}

#[test]
fn invalid_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[export\ntitle = ").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "[storage]\ndata_dir = \"/srv/inventory\"\n\n[export]\ndate_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();

    let settings = Settings::load_from(&path);

    assert_eq!(
        settings.storage.resolved_data_dir(),
        Path::new("/srv/inventory")
    );
    assert_eq!(settings.export.date_format, "%Y-%m-%d");
    assert_eq!(settings.export.title, "Inventory Report");
    assert_eq!(
        settings.export.resolved_output_dir(Path::new("/srv/inventory")),
        Path::new("/srv/inventory/exports")
    );
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let mut settings = Settings::default();
    settings.export.utc_offset_minutes = -180;
    settings.export.escape_markup = false;

    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn export_options_follow_settings() {
    let mut settings = Settings::default();
    settings.export.utc_offset_minutes = 120;
    let options = settings.export.to_options();
    assert_eq!(options.utc_offset_minutes, Some(120));
    assert!(options.escape_markup);

    settings.export.use_local_time = true;
    assert_eq!(settings.export.to_options().utc_offset_minutes, None);
}

#[test]
fn default_settings_serialize_without_paths() {
    let content = toml::to_string_pretty(&Settings::default()).unwrap();

    assert!(!content.contains("data_dir"));
    assert!(!content.contains("output_dir"));
    assert!(content.contains("title = \"Inventory Report\""));
    assert!(content.contains("escape_markup = true"));
}
