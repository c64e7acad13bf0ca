use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{LoggerError, LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Environment variable overriding [`LoggerConfig::level`].
pub const ENV_LOG_LEVEL: &str = "BCSYNC_LOG";

/// Environment variable overriding [`LoggerConfig::format`].
pub const ENV_LOG_FORMAT: &str = "BCSYNC_LOG_FORMAT";

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter directive (e.g. `"info"`, `"bcsync_core=debug,info"`).
    pub level: LoggerLevel,
    /// Timezone of timestamps.
    pub tz: LoggerTimeZone,
    /// Include event targets (module paths).
    pub with_targets: bool,
    /// Color text output when writing to a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Apply [`ENV_LOG_LEVEL`] and [`ENV_LOG_FORMAT`] on top of this config.
    ///
    /// Unset or empty variables leave the field untouched; invalid values are errors.
    pub fn with_env_overrides(self) -> Result<Self, LoggerError> {
        self.with_overrides(
            std::env::var(ENV_LOG_LEVEL).ok(),
            std::env::var(ENV_LOG_FORMAT).ok(),
        )
    }

    /// Apply explicit level and format values on top of this config.
    ///
    /// Same rules as [`LoggerConfig::with_env_overrides`]; apply it last to give these
    /// values precedence over the environment.
    pub fn with_overrides(
        mut self,
        level: Option<String>,
        format: Option<String>,
    ) -> Result<Self, LoggerError> {
        if let Some(level) = level.filter(|s| !s.trim().is_empty()) {
            self.level = level.parse()?;
        }
        if let Some(format) = format.filter(|s| !s.trim().is_empty()) {
            self.format = format.parse()?;
        }
        Ok(self)
    }

    /// Color is used only when enabled and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = LoggerConfig::default();

        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
        assert_eq!(cfg.level.as_str(), "info");
        assert!(cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let json = r#"{"format": "json", "level": "bcsync_core=debug,info", "withTargets": false}"#;
        let cfg: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level.as_str(), "bcsync_core=debug,info");
        assert!(!cfg.with_targets);
        assert!(cfg.use_color);
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
    }

    #[test]
    fn empty_object_is_default() {
        let cfg: LoggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LoggerConfig::default());
    }

    #[test]
    fn overrides_replace_level_and_format() {
        let cfg = LoggerConfig::default()
            .with_overrides(Some("debug".into()), Some("json".into()))
            .unwrap();

        assert_eq!(cfg.level.as_str(), "debug");
        assert_eq!(cfg.format, LoggerFormat::Json);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let cfg = LoggerConfig::default()
            .with_overrides(Some("  ".into()), None)
            .unwrap();
        assert_eq!(cfg, LoggerConfig::default());
    }

    #[test]
    fn later_overrides_win() {
        let cfg = LoggerConfig::default()
            .with_overrides(Some("warn".into()), Some("json".into()))
            .unwrap()
            .with_overrides(Some("debug".into()), None)
            .unwrap();

        assert_eq!(cfg.level.as_str(), "debug");
        assert_eq!(cfg.format, LoggerFormat::Json);
    }

    #[test]
    fn invalid_override_is_an_error() {
        let err = LoggerConfig::default()
            .with_overrides(None, Some("xml".into()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));
    }

    #[test]
    fn disabled_color_stays_disabled() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        assert!(!cfg.should_use_color());
    }
}
