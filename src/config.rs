//! Persistent configuration
//!
//! Defaults for digit count, method and margin live in a TOML file under
//! the user's home directory and are created on first load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calculator::Method;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calculation: CalculationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Decimal digits computed when the command line gives none
    pub default_digits: u64,

    /// Method used when the command line gives none
    pub default_method: Method,

    /// Guard digits computed beyond the requested precision
    pub default_margin: u64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            default_digits: 50,
            default_method: Method::GaussLegendre,
            default_margin: 5,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating the file with
    /// defaults if it does not exist yet
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, toml_string).context("Failed to write config file")?;
        Ok(())
    }

    /// Path of the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".pilab").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            calculation: CalculationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.calculation.default_digits, 50);
        assert_eq!(config.calculation.default_method, Method::GaussLegendre);
        assert_eq!(config.calculation.default_margin, 5);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.calculation.default_digits = 200;
        config.calculation.default_method = Method::Machin;
        config.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded.calculation.default_digits, 200);
        assert_eq!(loaded.calculation.default_method, Method::Machin);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).expect("load should succeed");
        assert!(path.exists());
        assert_eq!(config.calculation.default_digits, 50);
    }

    #[test]
    fn test_method_serializes_kebab_case() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).expect("serialize");
        assert!(text.contains("gauss-legendre"));
    }
}
