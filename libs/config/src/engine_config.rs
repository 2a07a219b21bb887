//! Engine Configuration Module
//!
//! Provides loading and validation of the engine tunables.
//! Supports loading from TOML files with environment variable overrides.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub twos_complement: TwosComplementConfig,
    pub non_restoring: NonRestoringConfig,
    pub newton_raphson: NewtonRaphsonConfig,
    pub vedic: VedicConfig,
    pub kahan: KahanConfig,
    pub logging: LoggingConfig,
}

/// What two's-complement subtraction does when a value leaves the register range
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    /// Report the calculation as invalid
    #[default]
    Reject,
    /// Return the wrapped value, as hardware would
    Wrap,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TwosComplementConfig {
    pub bit_width: u32,
    pub overflow: OverflowMode,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NonRestoringConfig {
    pub min_bit_width: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NewtonRaphsonConfig {
    pub iterations: u32,
    pub tolerance: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct VedicConfig {
    pub nikhilam_tolerance_pct: u32,
    pub paravartya_tolerance_pct: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct KahanConfig {
    pub tolerance: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for TwosComplementConfig {
    fn default() -> Self {
        Self {
            bit_width: defaults::TWOS_COMPLEMENT_BITS,
            overflow: OverflowMode::Reject,
        }
    }
}

impl Default for NonRestoringConfig {
    fn default() -> Self {
        Self {
            min_bit_width: defaults::NON_RESTORING_MIN_BITS,
        }
    }
}

impl Default for NewtonRaphsonConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::NEWTON_RAPHSON_ITERATIONS,
            tolerance: defaults::NEWTON_RAPHSON_TOLERANCE,
        }
    }
}

impl Default for VedicConfig {
    fn default() -> Self {
        Self {
            nikhilam_tolerance_pct: defaults::NIKHILAM_TOLERANCE_PCT,
            paravartya_tolerance_pct: defaults::PARAVARTYA_TOLERANCE_PCT,
        }
    }
}

impl Default for KahanConfig {
    fn default() -> Self {
        Self {
            tolerance: defaults::KAHAN_TOLERANCE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// `GANITA__SECTION__KEY` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&EngineConfig::default())
                .context("Failed to seed configuration defaults")?,
        );

        if let Some(path) = path {
            let expanded = expand_path(path)?;
            if expanded.exists() {
                info!("Loading engine config: {:?}", expanded);
                builder = builder.add_source(File::from(expanded).required(true));
            } else {
                warn!("Engine config not found, using defaults: {:?}", expanded);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator(defaults::ENV_SEPARATOR)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: EngineConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    /// Reject values the methods cannot run with
    pub fn validate(&self) -> Result<()> {
        let register = defaults::MIN_REGISTER_BITS..=defaults::MAX_REGISTER_BITS;

        if !register.contains(&self.twos_complement.bit_width) {
            bail!(
                "twos_complement.bit_width must be in {:?}, got {}",
                register,
                self.twos_complement.bit_width
            );
        }
        if !register.contains(&self.non_restoring.min_bit_width) {
            bail!(
                "non_restoring.min_bit_width must be in {:?}, got {}",
                register,
                self.non_restoring.min_bit_width
            );
        }
        if self.newton_raphson.iterations == 0
            || self.newton_raphson.iterations > defaults::NEWTON_RAPHSON_MAX_ITERATIONS
        {
            bail!(
                "newton_raphson.iterations must be in 1..={}, got {}",
                defaults::NEWTON_RAPHSON_MAX_ITERATIONS,
                self.newton_raphson.iterations
            );
        }
        if !(self.newton_raphson.tolerance.is_finite() && self.newton_raphson.tolerance > 0.0) {
            bail!(
                "newton_raphson.tolerance must be a positive number, got {}",
                self.newton_raphson.tolerance
            );
        }
        if !(self.kahan.tolerance.is_finite() && self.kahan.tolerance >= 0.0) {
            bail!(
                "kahan.tolerance must be a non-negative number, got {}",
                self.kahan.tolerance
            );
        }
        if self.vedic.nikhilam_tolerance_pct > 100 || self.vedic.paravartya_tolerance_pct > 100 {
            bail!("vedic tolerances are percentages and must not exceed 100");
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Expand `~` and `$VAR` references in a config path
fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).context("Failed to expand config path")?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Convenience function to load configuration from an optional path
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.twos_complement.bit_width, 8);
        assert_eq!(config.twos_complement.overflow, OverflowMode::Reject);
        assert_eq!(config.newton_raphson.iterations, 6);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("engine.toml");

        let config_content = r#"
[twos_complement]
bit_width = 16
overflow = "wrap"

[logging]
level = "debug"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = EngineConfig::load(Some(&config_path)).unwrap();

        assert_eq!(config.twos_complement.bit_width, 16);
        assert_eq!(config.twos_complement.overflow, OverflowMode::Wrap);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.non_restoring.min_bit_width, defaults::NON_RESTORING_MIN_BITS);
        assert_eq!(config.vedic, VedicConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.newton_raphson, NewtonRaphsonConfig::default());
    }

    #[test]
    fn test_invalid_width_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("engine.toml");
        fs::write(&config_path, "[twos_complement]\nbit_width = 64\n").unwrap();

        let err = EngineConfig::load(Some(&config_path)).unwrap_err();
        assert!(err.to_string().contains("bit_width"));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut config = EngineConfig::default();
        config.newton_raphson.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[twos_complement]"));

        let parsed: EngineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
