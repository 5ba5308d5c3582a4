//! # CLI Error Type
//!
//! Everything that can stop a checkout run before the table is printed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AppConfig::from_env ──── bad CHECKOUT_* value ───► AppError::Config    │
//! │                                                                         │
//! │  Action::parse ────────── not "+ID" / "-ID" ──────► AppError::InvalidAction
//! │                                                                         │
//! │  CheckoutSession::start ─ provider / validation ──► AppError::Load      │
//! │                                                                         │
//! │  main() logs with tracing::error! and exits with exit_code()            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_loader::{ProviderError, StartError};
use thiserror::Error;

/// Errors surfaced by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds a value we cannot use.
    #[error("Invalid configuration {var}={value:?}: {reason}")]
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The product catalog could not be loaded.
    #[error("Failed to load products: {0}")]
    Load(#[from] StartError<ProviderError>),

    /// A command line action is not of the form `+ID` or `-ID`.
    #[error("Invalid action {0:?}: expected +ID or -ID")]
    InvalidAction(String),

    /// Writing the rendered table failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode view: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Usage errors (bad config, bad actions) use 2, like clap does for bad
    /// arguments; everything else uses 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config { .. } | AppError::InvalidAction(_) => 2,
            AppError::Load(_) | AppError::Output(_) | AppError::Encode(_) => 1,
        }
    }

    pub(crate) fn config(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        AppError::Config {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for the CLI.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AppError::config("CHECKOUT_LOAD_TIMEOUT_MS", "soon", "not a number");
        assert_eq!(
            err.to_string(),
            "Invalid configuration CHECKOUT_LOAD_TIMEOUT_MS=\"soon\": not a number"
        );

        let err = AppError::InvalidAction("*3".into());
        assert_eq!(err.to_string(), "Invalid action \"*3\": expected +ID or -ID");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::InvalidAction("x".into()).exit_code(), 2);
        assert_eq!(AppError::config("CHECKOUT_STORE_NAME", "", "empty").exit_code(), 2);
        assert_eq!(AppError::Load(StartError::AlreadyStarted).exit_code(), 1);
    }
}
