//! Application services orchestrating configuration loading.
pub mod config;

use crate::domain::{EnvKey, TypeConstraintError};

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Coarse classification of [`ConfigError`] for callers that only branch on kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidConfigValue,
    EnvFile,
}

/// Errors surfaced while materializing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfigValue {
        key: EnvKey,
        value: String,
        #[source]
        reason: TypeConstraintError,
    },
    #[error("failed to read env file: {0}")]
    EnvFile(#[source] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: EnvKey, raw: &str, reason: TypeConstraintError) -> Self {
        let value = if key.is_secret() {
            "[REDACTED]".to_string()
        } else {
            raw.to_string()
        };
        ConfigError::InvalidConfigValue { key, value, reason }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::InvalidConfigValue { .. } => ErrorKind::InvalidConfigValue,
            ConfigError::EnvFile(_) => ErrorKind::EnvFile,
        }
    }

    /// Offending key, when the error is about a single value.
    pub fn key(&self) -> Option<EnvKey> {
        match self {
            ConfigError::InvalidConfigValue { key, .. } => Some(*key),
            ConfigError::EnvFile(_) => None,
        }
    }
}
