//! Platform services: system language registry and reboot
//!
//! On the console these are the registry manager and the power service.
//! `SystemPlatform` is the desktop stand-in: the registry key lives in a
//! small TOML file and rebooting either only logs or calls `reboot(2)`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{lang, Catalog};
use crate::error::{Error, Result};

/// Language reported when nothing else is known
pub const DEFAULT_LANGUAGE: i32 = lang::ENGLISH_US;

pub const REGISTRY_FILE: &str = "registry.toml";

pub trait Platform {
    /// Currently active system language id
    fn current_language(&self) -> Result<i32>;

    /// Set the system language; takes effect after a reboot
    fn set_language(&mut self, id: i32) -> Result<()>;

    /// Reboot the device. Only returns in dry-run mode or on failure.
    fn request_reboot(&mut self) -> Result<()>;
}

/// What `request_reboot` actually does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RebootMode {
    /// Log the request and return
    #[default]
    DryRun,
    /// sync + reboot(2)
    System,
}

/// Contents of registry.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Registry {
    /// Mirrors the /CONFIG/SYSTEM registry node
    #[serde(default)]
    system: SystemNode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SystemNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<i32>,
}

pub struct SystemPlatform {
    registry_path: PathBuf,
    reboot: RebootMode,
}

impl SystemPlatform {
    /// Platform with its registry at `<data_dir>/quicklang/registry.toml`
    pub fn new(data_dir: &Path, reboot: RebootMode) -> Self {
        Self {
            registry_path: data_dir.join(crate::favorites::CONFIG_DIR).join(REGISTRY_FILE),
            reboot,
        }
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    fn read_registry(&self) -> Result<Registry> {
        if !self.registry_path.exists() {
            return Ok(Registry::default());
        }
        let content = std::fs::read_to_string(&self.registry_path)
            .map_err(|e| Error::io(&self.registry_path, e))?;
        toml::from_str(&content).map_err(|source| Error::TomlDecode {
            path: self.registry_path.clone(),
            source,
        })
    }

    fn language_with_fallback(&self, locale: Option<&str>) -> Result<i32> {
        let from_locale = locale.and_then(language_from_locale);
        match self.read_registry() {
            Ok(registry) => Ok(registry
                .system
                .language
                .or(from_locale)
                .unwrap_or(DEFAULT_LANGUAGE)),
            Err(e) => match from_locale {
                Some(id) => {
                    warn!("Registry read failed, using locale {}: {}", id, e);
                    Ok(id)
                }
                None => Err(e),
            },
        }
    }

    fn write_registry(&self, registry: &Registry) -> Result<()> {
        if let Some(dir) = self.registry_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let content = toml::to_string_pretty(registry)?;
        std::fs::write(&self.registry_path, content)
            .map_err(|e| Error::io(&self.registry_path, e))
    }
}

impl Platform for SystemPlatform {
    /// Registry value, falling back to the process locale like the console
    /// falls back to the application layer. A registry error only surfaces
    /// when the locale gives no answer either.
    fn current_language(&self) -> Result<i32> {
        let locale = std::env::var("LANG").ok();
        self.language_with_fallback(locale.as_deref())
    }

    fn set_language(&mut self, id: i32) -> Result<()> {
        if Catalog::default().index_of(id).is_none() {
            return Err(Error::UnknownLanguage(id));
        }

        // A corrupt registry file is replaced rather than preserved
        let mut registry = self.read_registry().unwrap_or_default();
        registry.system.language = Some(id);
        self.write_registry(&registry)?;

        info!("System language set to {}", id);
        Ok(())
    }

    fn request_reboot(&mut self) -> Result<()> {
        match self.reboot {
            RebootMode::DryRun => {
                info!("Reboot requested (dry run)");
                Ok(())
            }
            RebootMode::System => {
                info!("Rebooting system...");
                system_reboot()
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn system_reboot() -> Result<()> {
    use nix::sys::reboot::{reboot, RebootMode};

    nix::unistd::sync();
    match reboot(RebootMode::RB_AUTOBOOT) {
        Ok(never) => match never {},
        Err(e) => Err(Error::Reboot(e.to_string())),
    }
}

#[cfg(not(target_os = "linux"))]
fn system_reboot() -> Result<()> {
    Err(Error::Reboot("not supported on this platform".to_string()))
}

/// Map a POSIX locale name (`de_DE.UTF-8`) to a language id.
pub fn language_from_locale(locale: &str) -> Option<i32> {
    let name = locale.split(['.', '@']).next().unwrap_or_default();
    let (language, region) = match name.split_once('_') {
        Some((language, region)) => (language, Some(region)),
        None => (name, None),
    };
    debug!("Mapping locale {} ({}, {:?})", locale, language, region);

    let id = match (language, region) {
        ("en", Some("GB")) => lang::ENGLISH_GB,
        ("en", _) => lang::ENGLISH_US,
        ("de", _) => lang::GERMAN,
        ("fr", _) => lang::FRENCH,
        ("es", _) => lang::SPANISH,
        ("it", _) => lang::ITALIAN,
        ("nl", _) => lang::DUTCH,
        ("pt", Some("BR")) => lang::PORTUGUESE_BR,
        ("pt", _) => lang::PORTUGUESE_PT,
        ("ru", _) => lang::RUSSIAN,
        ("tr", _) => lang::TURKISH,
        ("pl", _) => lang::POLISH,
        ("fi", _) => lang::FINNISH,
        ("sv", _) => lang::SWEDISH,
        ("da", _) => lang::DANISH,
        ("nb" | "nn" | "no", _) => lang::NORWEGIAN,
        ("ja", _) => lang::JAPANESE,
        ("ko", _) => lang::KOREAN,
        ("zh", Some("TW" | "HK" | "MO")) => lang::CHINESE_T,
        ("zh", _) => lang::CHINESE_S,
        _ => return None,
    };
    Some(id)
}
