//! Unified error types for `İpekButik`.
//!
//! One crate-wide error enum with a convenience `Result` alias. Failures the
//! storefront must never surface to shoppers (AI calls, malformed persisted
//! state) are absorbed and logged inside the modules that own them; everything
//! that reaches this type is a genuine operational error.

use thiserror::Error;

/// All error conditions the storefront can propagate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or content error
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serializing or deserializing durable state failed
    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Building the WhatsApp hand-off link failed
    #[error("Hand-off link error: {message}")]
    Handoff {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
