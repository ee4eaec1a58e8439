//! Materializes [`AppConfig`] from an environment snapshot.
use std::path::{Path, PathBuf};

use crate::domain::{
    EnvKey, EnvSnapshot, TypeConstraintError, parse_flag, parse_integer, split_list,
};
use crate::models::config::{
    AppConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_COOKIE_DOMAINS, DEFAULT_PORT,
};
use crate::services::{ConfigError, ConfigResult};

const DEFAULT_ENV_FILE_NAME: &str = ".env";

type Apply = fn(&mut AppConfig, &str) -> Result<(), TypeConstraintError>;

/// One environment key, its default text and how it lands in [`AppConfig`].
struct Binding {
    key: EnvKey,
    default: Option<&'static str>,
    apply: Apply,
}

const BINDINGS: [Binding; 13] = [
    Binding {
        key: EnvKey::Port,
        default: Some(DEFAULT_PORT),
        apply: |c, raw| {
            c.server_port = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::MongoUri,
        default: None,
        apply: |c, raw| {
            c.mongo_uri = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::DbName,
        default: None,
        apply: |c, raw| {
            c.db_name = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::JwtSecretKey,
        default: None,
        apply: |c, raw| {
            c.jwt_secret_key = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::JwtExpirationHours,
        default: Some("72"),
        apply: |c, raw| {
            c.jwt_expiration_hours = parse_integer(raw)?;
            Ok(())
        },
    },
    Binding {
        key: EnvKey::EnableCache,
        default: Some("false"),
        apply: |c, raw| {
            c.enable_cache = parse_flag(raw)?;
            Ok(())
        },
    },
    Binding {
        key: EnvKey::RedisAddr,
        default: None,
        apply: |c, raw| {
            c.redis_addr = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::RedisPassword,
        default: None,
        apply: |c, raw| {
            c.redis_password = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::LogLevel,
        default: None,
        apply: |c, raw| {
            c.log_level = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::LogFormat,
        default: None,
        apply: |c, raw| {
            c.log_format = raw.to_string();
            Ok(())
        },
    },
    Binding {
        key: EnvKey::CookieDomains,
        default: Some(DEFAULT_COOKIE_DOMAINS),
        apply: |c, raw| {
            c.cookie_domains = split_list(raw)?;
            Ok(())
        },
    },
    Binding {
        key: EnvKey::SecureCookie,
        default: Some("false"),
        apply: |c, raw| {
            c.secure_cookie = parse_flag(raw)?;
            Ok(())
        },
    },
    Binding {
        key: EnvKey::AllowedOrigins,
        default: Some(DEFAULT_ALLOWED_ORIGINS),
        apply: |c, raw| {
            c.allowed_origins = split_list(raw)?;
            Ok(())
        },
    },
];

/// Builds the configuration from an explicitly passed snapshot.
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    snapshot: EnvSnapshot,
}

impl ConfigLoader {
    pub fn new(snapshot: EnvSnapshot) -> Self {
        Self { snapshot }
    }

    /// Loader over the process environment layered on top of an env file.
    ///
    /// `path` may name the file itself or a directory holding `.env`. A missing
    /// file is ignored.
    pub fn with_env_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::layered(EnvSnapshot::from_process(), path)
    }

    /// Same as [`ConfigLoader::with_env_file`] with an injected top layer.
    pub fn layered(top: EnvSnapshot, path: impl AsRef<Path>) -> ConfigResult<Self> {
        let file = read_env_file(path.as_ref())?;
        Ok(Self::new(top.layered_over(file)))
    }

    pub fn snapshot(&self) -> &EnvSnapshot {
        &self.snapshot
    }

    /// Apply every binding in order. The first coercion failure aborts the load.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        let mut config = AppConfig::unset();

        for binding in &BINDINGS {
            let Some(raw) = self.snapshot.get(binding.key).or(binding.default) else {
                continue;
            };

            match ((binding.apply)(&mut config, raw), binding.default) {
                (Ok(()), _) => {}
                // Lists made only of separators fall back like an empty value.
                (Err(TypeConstraintError::EmptyList), Some(default)) => {
                    (binding.apply)(&mut config, default)
                        .map_err(|err| ConfigError::invalid(binding.key, default, err))?;
                }
                (Err(err), _) => return Err(ConfigError::invalid(binding.key, raw, err)),
            }
        }

        Ok(config)
    }
}

/// Load the configuration for this process.
///
/// Variables from the process environment override the env file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<AppConfig> {
    ConfigLoader::with_env_file(path)?.load()
}

fn env_file_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_ENV_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Read the known keys from a dotenv file without touching the process environment.
fn read_env_file(path: &Path) -> ConfigResult<EnvSnapshot> {
    let iter = match dotenvy::from_path_iter(env_file_path(path)) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return Ok(EnvSnapshot::new()),
        Err(err) => return Err(ConfigError::EnvFile(err)),
    };

    let mut snapshot = EnvSnapshot::new();
    for item in iter {
        let (name, value) = item.map_err(ConfigError::EnvFile)?;
        if let Some(key) = EnvKey::from_name(&name) {
            snapshot.set(key, value);
        }
    }
    Ok(snapshot)
}
