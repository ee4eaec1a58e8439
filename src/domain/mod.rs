//! Strongly-typed building blocks for reading configuration from the environment.
use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Environment variables understood by the loader.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EnvKey {
    Port,
    MongoUri,
    DbName,
    JwtSecretKey,
    JwtExpirationHours,
    EnableCache,
    RedisAddr,
    RedisPassword,
    LogLevel,
    LogFormat,
    CookieDomains,
    SecureCookie,
    AllowedOrigins,
}

impl EnvKey {
    pub const ALL: [EnvKey; 13] = [
        EnvKey::Port,
        EnvKey::MongoUri,
        EnvKey::DbName,
        EnvKey::JwtSecretKey,
        EnvKey::JwtExpirationHours,
        EnvKey::EnableCache,
        EnvKey::RedisAddr,
        EnvKey::RedisPassword,
        EnvKey::LogLevel,
        EnvKey::LogFormat,
        EnvKey::CookieDomains,
        EnvKey::SecureCookie,
        EnvKey::AllowedOrigins,
    ];

    /// Variable name as it appears in the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::Port => "PORT",
            EnvKey::MongoUri => "MONGO_URI",
            EnvKey::DbName => "DB_NAME",
            EnvKey::JwtSecretKey => "JWT_SECRET_KEY",
            EnvKey::JwtExpirationHours => "JWT_EXPIRATION_HOURS",
            EnvKey::EnableCache => "ENABLE_CACHE",
            EnvKey::RedisAddr => "REDIS_ADDR",
            EnvKey::RedisPassword => "REDIS_PASSWORD",
            EnvKey::LogLevel => "LOG_LEVEL",
            EnvKey::LogFormat => "LOG_FORMAT",
            EnvKey::CookieDomains => "COOKIE_DOMAINS",
            EnvKey::SecureCookie => "SECURE_COOKIE",
            EnvKey::AllowedOrigins => "ALLOWED_ORIGINS",
        }
    }

    /// Case-sensitive lookup by variable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Keys whose values must never end up in logs or error messages.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            EnvKey::JwtSecretKey | EnvKey::RedisPassword | EnvKey::MongoUri
        )
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of the known variables.
///
/// Built once from the process environment (or injected by tests) and passed
/// to the loader explicitly. Unknown names are dropped on construction.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct EnvSnapshot {
    vars: BTreeMap<EnvKey, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the known variables from the current process environment.
    /// Values that are not valid unicode are converted lossily.
    pub fn from_process() -> Self {
        EnvKey::ALL
            .into_iter()
            .filter_map(|key| {
                std::env::var_os(key.as_str())
                    .map(|value| (key, value.to_string_lossy().into_owned()))
            })
            .collect()
    }

    pub fn set(&mut self, key: EnvKey, value: impl Into<String>) {
        self.vars.insert(key, value.into());
    }

    /// Value for `key`. Empty values are reported as absent.
    pub fn get(&self, key: EnvKey) -> Option<&str> {
        self.vars
            .get(&key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Merge `self` on top of `base`: non-empty values here win.
    pub fn layered_over(self, mut base: EnvSnapshot) -> EnvSnapshot {
        base.vars
            .extend(self.vars.into_iter().filter(|(_, value)| !value.is_empty()));
        base
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.vars.iter().map(|(key, value)| {
                let shown = if key.is_secret() && !value.is_empty() {
                    "[REDACTED]"
                } else {
                    value.as_str()
                };
                (key.as_str(), shown)
            }))
            .finish()
    }
}

impl FromIterator<(EnvKey, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (EnvKey, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .filter_map(|(name, value)| {
                EnvKey::from_name(name).map(|key| (key, value.to_string()))
            })
            .collect()
    }
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`t`/`f`, any case).
pub fn parse_flag(raw: &str) -> Result<bool, TypeConstraintError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(TypeConstraintError::InvalidBool),
    }
}

/// Parse a signed decimal integer.
pub fn parse_integer(raw: &str) -> Result<i64, TypeConstraintError> {
    raw.trim()
        .parse::<i64>()
        .map_err(TypeConstraintError::InvalidInteger)
}

/// Split a comma-separated list, trimming segments and dropping empty ones.
///
/// `"a,,b"` yields `["a", "b"]`; empty entries are not kept as `""`.
pub fn split_list(raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(TypeConstraintError::EmptyList);
    }
    Ok(items)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("expected a boolean (true/false/1/0)")]
    InvalidBool,
    #[error("expected a decimal integer")]
    InvalidInteger(#[source] ParseIntError),
    #[error("list has no entries")]
    EmptyList,
}
