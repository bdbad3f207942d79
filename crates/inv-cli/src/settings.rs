//! User settings stored as TOML in the config directory.
//!
//! Missing or unreadable files fall back to defaults; command-line flags
//! override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use inv_export::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, ExportOptions};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "BoatInventory";
const APPLICATION: &str = "boat-inventory";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

impl Settings {
    /// Load settings from `path`, or defaults if the file is missing or
    /// cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no settings file, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Self::default()
        })
    }

    /// Save settings to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, content).with_context(|| format!("write {}", path.display()))
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

/// Where the inventory data lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the store files. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// How exported documents look and where they go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Defaults to an `exports` folder in the data directory.
    pub output_dir: Option<PathBuf>,
    pub title: String,
    /// chrono strftime pattern.
    pub date_format: String,
    /// chrono strftime pattern.
    pub time_format: String,
    /// Offset from UTC for printed timestamps. Ignored with `use_local_time`.
    pub utc_offset_minutes: i32,
    pub use_local_time: bool,
    pub escape_markup: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            output_dir: None,
            title: options.title,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            utc_offset_minutes: 0,
            use_local_time: false,
            escape_markup: options.escape_markup,
        }
    }
}

impl ExportSettings {
    pub fn resolved_output_dir(&self, data_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("exports"))
    }

    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            title: self.title.clone(),
            date_format: self.date_format.clone(),
            time_format: self.time_format.clone(),
            utc_offset_minutes: (!self.use_local_time).then_some(self.utc_offset_minutes),
            escape_markup: self.escape_markup,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("boat-inventory-data"))
}
