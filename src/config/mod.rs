//! Application configuration.
//!
//! Loads tree options from YAML files and environment variables.

use serde::Deserialize;
use thiserror::Error;

use redblack_tree::{RbTree, TreeConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "redblack.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "REDBLACK_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "REDBLACK";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "REDBLACK_LOG";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options applied to every tree built from this configuration.
    pub tree: TreeConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `redblack.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `REDBLACK__TREE__SELF_CHECK=true`
    pub fn load(path: Option<&str>) -> Result<Self> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        tracing::debug!(
            self_check = config.tree.self_check,
            initial_capacity = config.tree.initial_capacity,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Create config for testing: every mutation is re-validated.
    pub fn for_test() -> Self {
        Self {
            tree: TreeConfig::checked(),
        }
    }

    /// Empty tree carrying this configuration's options
    pub fn build_tree<K, V>(&self) -> RbTree<K, V> {
        RbTree::with_config(self.tree.clone())
    }
}
