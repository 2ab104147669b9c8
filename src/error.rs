//! Error type for host-facing UI operations.
//!
//! Formatting never fails; only DOM, dialog, and config interaction return
//! `Result`. Malformed numbers and dates degrade to display sentinels instead.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced when talking to the UI host.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A required host capability (window, document, body, dialog) is missing.
    #[error("host capability unavailable: {0}")]
    HostUnavailable(&'static str),

    /// The host raised an exception while performing an operation.
    #[error("host call failed: {0}")]
    Host(String),

    /// Panel configuration could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl UiError {
    /// Stable machine-readable code for logs and telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::HostUnavailable(_) => "E_HOST_UNAVAILABLE",
            Self::Host(_) => "E_HOST",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
