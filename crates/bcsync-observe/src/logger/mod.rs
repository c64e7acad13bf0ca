mod config;
mod error;
mod format;
mod init;
mod level;
mod timezone;

pub use config::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timezone::{LoggerTimeZone, init_local_offset};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Can be called once per process; later calls return [`LoggerError::AlreadyInitialized`].
///
/// For [`LoggerTimeZone::Local`] call [`init_local_offset`] first, before any threads
/// (including the tokio runtime) are started.
///
/// # Examples
/// ```rust
/// use bcsync_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("logger must initialize once");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::text(cfg),
        LoggerFormat::Json => init::json(cfg),
        LoggerFormat::Journald => init::journald(cfg),
    }
}
