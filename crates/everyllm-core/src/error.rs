//! Unified error type exposed by **`everyllm-core`**.
//!
//! Provider crates convert their internal errors into
//! [`EveryLlmError::Provider`] before bubbling them up. The original error
//! stays reachable through [`std::error::Error::source`] or by downcasting
//! the boxed value, so nothing is lost on the way to the caller.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EveryLlmError>;

#[derive(Debug, Error)]
pub enum EveryLlmError {
    /// A required configuration value (usually an environment variable) is
    /// missing or unusable.
    #[error("{0}")]
    Configuration(String),

    /// Anything raised by the completion provider or the transport in front
    /// of it: network failures, auth, rate limits, malformed requests.
    #[error("provider returned an error: {0}")]
    Provider(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The provider answered, but the output does not fit the requested
    /// schema.
    #[error("structured output failed validation: {reason}")]
    SchemaValidation {
        reason: String,
        /// Raw text returned by the model, if there was any.
        raw: Option<String>,
    },

    /// Failure while serialising or deserialising JSON on our side of the
    /// wire.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EveryLlmError {
    /// Shorthand for the "environment variable is not set" case.
    pub fn missing_env(var: &str) -> Self {
        EveryLlmError::Configuration(format!("{var} is not set"))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, EveryLlmError::Configuration(_))
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, EveryLlmError::Provider(_))
    }

    pub fn is_schema_validation(&self) -> bool {
        matches!(self, EveryLlmError::SchemaValidation { .. })
    }
}
