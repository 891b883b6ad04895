//! Tracing setup and the client-facing log sink.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// Install the global subscriber: INFO by default, overridable via `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();
}

/// Severity of a message submitted by a client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    None,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(LogLevel::None),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::None => "NONE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// Routes client log messages into the adapter's tracing output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSvc;

impl LogSvc {
    /// Emit `"{client_name},{message}"` at the tracing level matching `level`.
    ///
    /// `None` is dropped; `Fatal` is logged as an error tagged `fatal = true`.
    /// Returns whether anything was emitted.
    pub fn log_message(client_name: &str, level: LogLevel, message: &str) -> bool {
        let line = format!("{},{}", client_name, message);
        match level {
            LogLevel::None => return false,
            LogLevel::Debug => debug!(target: "taxbridge::client", "{}", line),
            LogLevel::Info => info!(target: "taxbridge::client", "{}", line),
            LogLevel::Warning => warn!(target: "taxbridge::client", "{}", line),
            LogLevel::Error => error!(target: "taxbridge::client", "{}", line),
            LogLevel::Fatal => error!(target: "taxbridge::client", fatal = true, "{}", line),
        }
        true
    }
}
