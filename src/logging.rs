//! Logger setup driven by `LOG_LEVEL` and `LOG_FORMAT`.
use std::io::Write;

use log::Record;

use crate::models::config::AppConfig;

const DEFAULT_FILTER: &str = "info";

/// Output format of log records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unknown or empty values fall back to text.
    pub fn from_config(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &AppConfig) -> &str {
    let level = config.log_level.trim();
    if level.is_empty() { DEFAULT_FILTER } else { level }
}

/// One JSON object per record.
pub fn render_json_line(timestamp: &str, record: &Record<'_>) -> String {
    serde_json::json!({
        "timestamp": timestamp,
        "level": record.level().to_string(),
        "target": record.target(),
        "message": record.args().to_string(),
    })
    .to_string()
}

/// Install the global logger. Must be called once, before the server starts.
pub fn init(config: &AppConfig) {
    let env = env_logger::Env::default().default_filter_or(default_filter(config));
    let mut builder = env_logger::Builder::from_env(env);

    if LogFormat::from_config(&config.log_format) == LogFormat::Json {
        builder.format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            writeln!(buf, "{}", render_json_line(&timestamp, record))
        });
    }

    builder.init();
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn format_parsing_is_lenient() {
        assert_eq!(LogFormat::from_config("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_config(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::from_config("text"), LogFormat::Text);
        assert_eq!(LogFormat::from_config(""), LogFormat::Text);
        assert_eq!(LogFormat::from_config("pretty"), LogFormat::Text);
    }

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(default_filter(&AppConfig::default()), "info");

        let config = AppConfig {
            log_level: "debug".into(),
            ..AppConfig::default()
        };
        assert_eq!(default_filter(&config), "debug");
    }

    #[test]
    fn json_line_carries_record_fields() {
        let line = render_json_line(
            "2026-01-01T00:00:00Z",
            &Record::builder()
                .args(format_args!("listening on 8080"))
                .level(Level::Warn)
                .target("muchtodo_api")
                .build(),
        );

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["timestamp"], "2026-01-01T00:00:00Z");
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "muchtodo_api");
        assert_eq!(value["message"], "listening on 8080");
    }
}
