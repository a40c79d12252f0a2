//! Top-level error type for a status run.

use thiserror::Error;

use crate::github::IntakeError;

/// Errors that abort a status run.
///
/// Configuration problems are detected before any network call is made;
/// upstream failures abort the run because a status cannot be trusted
/// without complete reviewer data. Webhook delivery failures never surface
/// here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// A configuration value was missing or malformed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A GitHub listing call failed.
    #[error(transparent)]
    Upstream(#[from] IntakeError),

    /// Local I/O failed, e.g. while reading the triggering event payload.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl RunError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
