//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mlmsim/mlmsim.toml`
//! 3. Local config: `--config <file>`, else `./mlmsim.toml` when present
//! 4. Environment variables: `MLMSIM_*` prefix, `__` between nested keys
//!    (e.g. `MLMSIM_STRATEGY__KIND=batch`)
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{StrategySpec, DEFAULT_FRONT_LINE_TARGET};
use crate::infrastructure::OutputFormat;

/// Name of the local config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mlmsim.toml";

const ENV_PREFIX: &str = "MLMSIM";

/// Growth policy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// One recruit per month
    #[default]
    Single,
    /// `batch_size` recruits per month
    Batch,
    /// One recruit per month with `probability`
    Probabilistic,
}

impl StrategyKind {
    fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Single => "single",
            StrategyKind::Batch => "batch",
            StrategyKind::Probabilistic => "probabilistic",
        }
    }
}

/// Recruiting strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrategySettings {
    pub kind: StrategyKind,
    /// Recruits per month for `batch`
    pub batch_size: usize,
    /// Chance of a recruit per month for `probabilistic`
    pub probability: f64,
    /// Seed for `probabilistic`; unset draws from entropy
    pub seed: Option<u64>,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            kind: StrategyKind::Single,
            batch_size: 2,
            probability: 0.5,
            seed: None,
        }
    }
}

impl StrategySettings {
    /// The strategy these settings select; parameters of other kinds are ignored.
    pub fn to_spec(&self) -> StrategySpec {
        match self.kind {
            StrategyKind::Single => StrategySpec::Single,
            StrategyKind::Batch => StrategySpec::Batch {
                size: self.batch_size,
            },
            StrategyKind::Probabilistic => StrategySpec::Probabilistic {
                probability: self.probability,
                seed: self.seed,
            },
        }
    }
}

/// Unified configuration for mlmsim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Months to simulate; zero or negative runs no tick
    pub months: i64,
    /// Quota of direct recruits per marketer
    pub front_line_target: usize,
    /// Report rendering
    pub output: OutputFormat,
    /// Recruiting strategy
    pub strategy: StrategySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            months: 3,
            front_line_target: DEFAULT_FRONT_LINE_TARGET,
            output: OutputFormat::Summary,
            strategy: StrategySettings::default(),
        }
    }
}

/// Get the XDG config directory for mlmsim.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mlmsim").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mlmsim.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit config file; must exist when given. Without it
    ///   `./mlmsim.toml` is used if present.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(local, None)
    }

    /// Like [`Settings::load`], reading `MLMSIM_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        local: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();

        // 1. Compiled defaults
        let mut builder = Config::builder()
            .set_default("months", defaults.months)
            .map_err(config_err)?
            .set_default("front_line_target", defaults.front_line_target as u64)
            .map_err(config_err)?
            .set_default("strategy.kind", defaults.strategy.kind.as_str())
            .map_err(config_err)?
            .set_default("strategy.batch_size", defaults.strategy.batch_size as u64)
            .map_err(config_err)?
            .set_default("strategy.probability", defaults.strategy.probability)
            .map_err(config_err)?
            .set_default("output", "summary")
            .map_err(config_err)?;

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        // 3. Local config
        match local {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                builder = builder
                    .add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        // 4. Environment variables
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Render as TOML, as a config file would contain it.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_inspected_then_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.months, 3);
        assert_eq!(settings.front_line_target, 5);
        assert_eq!(settings.strategy.kind, StrategyKind::Single);
        assert_eq!(settings.output, OutputFormat::Summary);
    }

    #[test]
    fn given_batch_kind_when_to_spec_then_carries_batch_size() {
        let strategy = StrategySettings {
            kind: StrategyKind::Batch,
            batch_size: 4,
            ..StrategySettings::default()
        };
        assert_eq!(strategy.to_spec(), StrategySpec::Batch { size: 4 });
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_kind_names() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("months = 3"));
        assert!(toml.contains("kind = \"single\""));
        assert!(toml.contains("output = \"summary\""));
    }
}
