//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

pub const SEED_VAR: &str = "KOKATON_SEED";
pub const LOG_VAR: &str = "KOKATON_LOG";
const DEFAULT_LOG_FILE: &str = "kokaton_musou.log";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("KOKATON_SEED must be an unsigned integer, got {0:?}")]
    InvalidSeed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Where the tracing output goes.  The terminal belongs to the game.
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            log_path: env::temp_dir().join(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_vars(env::var(SEED_VAR).ok(), env::var(LOG_VAR).ok())
    }

    /// Build from raw variable values; empty values count as unset.
    pub fn from_vars(seed: Option<String>, log_path: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(raw) = seed.filter(|raw| !raw.trim().is_empty()) {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?;
            config.seed = Some(parsed);
        }
        if let Some(path) = log_path.filter(|path| !path.is_empty()) {
            config.log_path = PathBuf::from(path);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vars_give_defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn blank_seed_counts_as_unset() {
        let config = Config::from_vars(Some("  ".into()), None).unwrap();
        assert_eq!(config.seed, None);
    }
}
