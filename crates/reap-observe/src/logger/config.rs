use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::logger::object::{LoggerFormat, LoggerLevel};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "info", "reap_core=debug,info").
    pub level: LoggerLevel,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build a config from the textual format and level, keeping other defaults.
    ///
    /// # Examples
    /// ```rust
    /// use reap_observe::{LoggerConfig, LoggerFormat};
    ///
    /// let config = LoggerConfig::from_parts("json", "reap_core=debug,info").unwrap();
    /// assert_eq!(config.format, LoggerFormat::Json);
    /// ```
    pub fn from_parts(format: &str, level: &str) -> Result<Self, crate::LoggerError> {
        Ok(Self {
            format: format.parse()?,
            level: level.parse()?,
            ..Default::default()
        })
    }

    /// Determines whether colored output should be used.
    ///
    /// Color is enabled only if `use_color` is set and stdout is a terminal.
    /// Call during logger initialization, not during config parsing.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn from_parts_parses_both_values() {
        let config = LoggerConfig::from_parts("JSON", "warn").unwrap();
        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "warn");
        assert!(config.with_targets);
    }

    #[test]
    fn from_parts_rejects_bad_values() {
        assert!(LoggerConfig::from_parts("xml", "info").is_err());
        assert!(LoggerConfig::from_parts("text", "reap_core=loud").is_err());
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.level.as_str(), LoggerLevel::default().as_str());
        assert_eq!(config.format, LoggerFormat::default());
        assert!(config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn partial_deserialization() {
        let json = r#"{"format": "json", "level": "debug", "use_color": false}"#;
        let config: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "debug");
        assert!(!config.use_color);
    }
}
