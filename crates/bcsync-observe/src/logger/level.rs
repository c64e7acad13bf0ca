use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `EnvFilter` directive string (e.g. `"info"`, `"bcsync_core=debug,info"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// Parse and validate a filter directive.
    ///
    /// # Examples
    /// ```
    /// use bcsync_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("bcsync_kube=trace,warn").unwrap();
    /// assert_eq!(lvl.as_str(), "bcsync_kube=trace,warn");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    /// Raw directive string as configured.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter.
    ///
    /// Directives were validated on construction, so this falls back to `info`
    /// only if the filter syntax changed between versions.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::LoggerLevel;

    #[test]
    fn accepts_plain_and_per_crate_directives() {
        for lvl in ["info", "trace", "bcsync_core=debug,bcsync_kube=trace,warn"] {
            assert!(lvl.parse::<LoggerLevel>().is_ok(), "expected {lvl} to be valid");
        }
    }

    #[test]
    fn rejects_unknown_level_names() {
        for lvl in ["bcsync_core=loud", "kube=verbose,info"] {
            assert!(lvl.parse::<LoggerLevel>().is_err(), "expected {lvl} to be rejected");
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().as_str(), "info");
    }

    #[test]
    fn deserialization_validates() {
        let ok: LoggerLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(ok.as_str(), "debug");
        assert!(serde_json::from_str::<LoggerLevel>(r#""x=nope""#).is_err());
    }
}
