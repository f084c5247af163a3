//! Application settings (settings.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::navigator::WINDOW_SIZE;
use crate::platform::RebootMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root for quicklang/config.json and quicklang/registry.toml
    pub data_dir: PathBuf,
    /// Rows shown at once
    pub window_size: usize,
    pub reboot: RebootMode,
    /// Log destination while the menu owns the terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            window_size: WINDOW_SIZE,
            reboot: RebootMode::default(),
            log_file: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Settings {
    /// `<config_dir>/quicklang/settings.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("quicklang/settings.toml")
    }

    /// Load settings; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::TomlDecode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.window_size == 0 {
            errors.push("window_size must be at least 1".to_string());
        }

        if self.data_dir.as_os_str().is_empty() {
            errors.push("data_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidSettings(errors))
        }
    }

    /// Copy with invalid values replaced by defaults
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: if self.data_dir.as_os_str().is_empty() {
                defaults.data_dir
            } else {
                self.data_dir.clone()
            },
            window_size: if self.window_size == 0 {
                defaults.window_size
            } else {
                self.window_size
            },
            reboot: self.reboot,
            log_file: self.log_file.clone(),
        }
    }
}
