use everyllm_core::error::EveryLlmError;
use reqwest::StatusCode;

/// Every failure mode of the gateway transport.
///
/// Converted into [`EveryLlmError::Provider`] at the adapter boundary; the
/// original value can be recovered with `downcast_ref::<LiteLlmError>()`.
#[derive(Debug, thiserror::Error)]
pub enum LiteLlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn't (de)serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("gateway returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("gateway format error: {0}")]
    Format(String),
}

impl From<LiteLlmError> for EveryLlmError {
    fn from(value: LiteLlmError) -> Self {
        EveryLlmError::Provider(Box::new(value))
    }
}
