//! Process configuration loaded from `TRE_*` environment variables.
//!
//! | Variable        | Field       | Default                  |
//! |-----------------|-------------|--------------------------|
//! | `TRE_ID`        | `id`        | required, non-empty      |
//! | `TRE_DB_PATH`   | `db_path`   | `tre.sqlite3`            |
//! | `TRE_LOG_LEVEL` | `log_level` | `debug`/`info` per build |
//! | `TRE_LOG_DIR`   | `log_dir`   | unset (logging disabled) |

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENV_PREFIX: &str = "TRE_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreConfig {
    /// TRE deployment id, injected into every new resource as `tre_id`.
    pub id: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_db_path() -> String {
    "tre.sqlite3".to_string()
}

impl TreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .map_err(ConfigError::Env)?
            .validated()
    }

    /// Reads configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Self>(vars)
            .map_err(ConfigError::Env)?
            .validated()
    }

    /// Configured log level, or the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.id = self.id.trim().to_string();
        if self.id.is_empty() {
            return Err(ConfigError::EmptyTreId);
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Env(envy::Error),
    EmptyTreId,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(err) => write!(f, "failed to load TRE_* configuration: {err}"),
            Self::EmptyTreId => write!(f, "TRE_ID must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Env(err) => Some(err),
            Self::EmptyTreId => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TreConfig};
    use crate::logging::default_log_level;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn loads_prefixed_variables_with_defaults() {
        let config = TreConfig::from_vars(vars(&[("TRE_ID", "9876")])).unwrap();
        assert_eq!(config.id, "9876");
        assert_eq!(config.db_path, "tre.sqlite3");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = TreConfig::from_vars(vars(&[("TRE_ID", "9876")])).unwrap();
        assert!(config.log_level.is_none());
        assert_eq!(config.effective_log_level(), default_log_level());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = TreConfig::from_vars(vars(&[
            ("TRE_ID", "mytre"),
            ("TRE_DB_PATH", "/var/lib/tre/store.db"),
            ("TRE_LOG_LEVEL", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/var/lib/tre/store.db");
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn missing_tre_id_is_an_env_error() {
        let err = TreConfig::from_vars(vars(&[("TRE_DB_PATH", "x.db")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn blank_tre_id_is_rejected() {
        let err = TreConfig::from_vars(vars(&[("TRE_ID", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTreId));
    }
}
