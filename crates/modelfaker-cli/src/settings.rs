use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File picked up from the working directory when `--settings` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "modelfaker.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml parse error in {}: {}", .path.display(), .source)]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// CLI defaults; command-line flags take precedence over every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliSettings {
    pub default_locale: Option<String>,
    pub seed: Option<u64>,
    pub cycle_guard: Option<i64>,
    pub run_dir: Option<PathBuf>,
    pub pretty: bool,
}

impl CliSettings {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load `explicit`, or the default file when it exists, or defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<CliSettings, SettingsError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.exists() {
                return Ok(CliSettings::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    CliSettings::from_toml(&content, &path)
}
