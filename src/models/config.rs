//! Configuration model materialized from the environment.
use std::fmt;

pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 72;
pub const DEFAULT_COOKIE_DOMAINS: &str = "localhost";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

const REDACTED: &str = "[REDACTED]";

/// Settings shared across the application for its whole lifetime.
///
/// Built by [`crate::services::config::ConfigLoader`] and never mutated
/// afterwards. `cookie_domains` and `allowed_origins` are never empty.
#[derive(Clone, Eq, PartialEq)]
pub struct AppConfig {
    /// Listening port. Kept as text; binding reports bad values.
    pub server_port: String,
    pub mongo_uri: String,
    pub db_name: String,
    pub jwt_secret_key: String,
    pub jwt_expiration_hours: i64,
    pub enable_cache: bool,
    pub redis_addr: String,
    pub redis_password: String,
    pub log_level: String,
    pub log_format: String,
    pub cookie_domains: Vec<String>,
    pub secure_cookie: bool,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Every field at its type's zero value, before any binding is applied.
    pub(crate) fn unset() -> Self {
        Self {
            server_port: String::new(),
            mongo_uri: String::new(),
            db_name: String::new(),
            jwt_secret_key: String::new(),
            jwt_expiration_hours: 0,
            enable_cache: false,
            redis_addr: String::new(),
            redis_password: String::new(),
            log_level: String::new(),
            log_format: String::new(),
            cookie_domains: Vec::new(),
            secure_cookie: false,
            allowed_origins: Vec::new(),
        }
    }

    /// Address for `HttpServer::bind`.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }

    /// Cache endpoint, only when caching is switched on and an address is set.
    pub fn cache_address(&self) -> Option<&str> {
        if self.enable_cache && !self.redis_addr.is_empty() {
            Some(&self.redis_addr)
        } else {
            None
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT.to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            cookie_domains: vec![DEFAULT_COOKIE_DOMAINS.to_string()],
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            ..Self::unset()
        }
    }
}

fn redact(value: &str) -> &str {
    if value.is_empty() { value } else { REDACTED }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server_port", &self.server_port)
            .field("mongo_uri", &redact(&self.mongo_uri))
            .field("db_name", &self.db_name)
            .field("jwt_secret_key", &redact(&self.jwt_secret_key))
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("enable_cache", &self.enable_cache)
            .field("redis_addr", &self.redis_addr)
            .field("redis_password", &redact(&self.redis_password))
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("cookie_domains", &self.cookie_domains)
            .field("secure_cookie", &self.secure_cookie)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}
