//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/vditree/vditree.toml`
//! 3. Environment variables: `VDITREE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("configuration error: {message}")]
pub struct SettingsError {
    pub message: String,
}

/// Unified configuration for vditree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base directory where file SRs are mounted
    pub sr_mount_dir: PathBuf,
    /// Volume group name prefix for LVM SRs
    pub vg_prefix: String,
    /// vhd-util binary (name or absolute path)
    pub vhd_util: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sr_mount_dir: PathBuf::from("/var/run/sr-mount"),
            vg_prefix: "VG_XenStorage-".to_string(),
            vhd_util: "vhd-util".to_string(),
        }
    }
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vditree").map(|dirs| dirs.config_dir().join("vditree.toml"))
}

impl Settings {
    /// Load settings with layered precedence: defaults, then the global
    /// config file if present, then `VDITREE_*` environment variables.
    pub fn load() -> Result<Self, SettingsError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default(
                "sr_mount_dir",
                defaults.sr_mount_dir.to_string_lossy().to_string(),
            )
            .map_err(config_err)?
            .set_default("vg_prefix", defaults.vg_prefix.clone())
            .map_err(config_err)?
            .set_default("vhd_util", defaults.vhd_util.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("VDITREE"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert_eq!(settings.vg_prefix, "VG_XenStorage-");
        assert!(!settings.vhd_util.is_empty());
    }

    #[test]
    fn given_settings_when_serializing_then_toml_roundtrips() {
        let settings = Settings::default();
        let toml_str = settings.to_toml().expect("serialize");
        assert!(toml_str.contains("sr_mount_dir"));
        assert!(toml_str.contains("VG_XenStorage-"));
    }
}
