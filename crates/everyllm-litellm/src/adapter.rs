use std::{env, sync::Arc, time::Duration};

use everyllm_core::{
    error::{EveryLlmError, Result},
    model::ChatModel,
    registry::resolve_model,
};

use crate::{
    api_v1::ChatCompletionRequest,
    client::LiteLlmClient,
    error::LiteLlmError,
};

pub const LITELLM_API_KEY_ENV: &str = "LITELLM_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A completion client bound to one resolved model string.
///
/// It implements the provider traits from [`everyllm_core::provider`]:
///
/// * `complete` – one non-streaming round-trip,
/// * `astream` – the same request with `stream = true`,
/// * `structured_complete` – a JSON-schema constrained request parsed into
///   a Rust type.
///
/// The API key is captured once by the builder and reused for every call.
pub struct LiteLlmAdapter {
    pub(crate) client: Arc<LiteLlmClient>,
    pub(crate) model: String,
}

impl LiteLlmAdapter {
    /// Provider model string every request is sent with.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_base(&self) -> &str {
        self.client.api_base()
    }

    pub(crate) fn request(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest::from_prompt(self.model.clone(), prompt)
    }
}

/// Builder for [`LiteLlmAdapter`].
///
/// ```rust,no_run
/// use everyllm_core::model::ChatModel;
/// use everyllm_litellm::LiteLlmAdapterBuilder;
///
/// let llm = LiteLlmAdapterBuilder::for_chat_model(ChatModel::Gpt4oMini)?
///     .with_api_base("http://localhost:4000")
///     .build()?;
/// # Ok::<(), everyllm_core::error::EveryLlmError>(())
/// ```
pub struct LiteLlmAdapterBuilder {
    pub(crate) model: String,
    pub(crate) api_base: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) http: Option<reqwest::Client>,
    pub(crate) timeout: Option<Duration>,
}

impl LiteLlmAdapterBuilder {
    /// Builder for an already resolved model string, without an API key.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: None,
            api_key: None,
            http: None,
            timeout: None,
        }
    }

    /// Like [`Self::new`], additionally capturing `LITELLM_API_KEY` from
    /// the environment. A missing key is not an error; requests are then
    /// sent without `Authorization`.
    pub fn new_from_env(model: impl Into<String>) -> Self {
        Self {
            api_key: env::var(LITELLM_API_KEY_ENV).ok(),
            ..Self::new(model)
        }
    }

    /// Resolve `model` against the current environment, then behave like
    /// [`Self::new_from_env`].
    ///
    /// # Errors
    ///
    /// Whatever [`resolve_model`] reports, i.e. a missing `CUSTOM_MODEL`.
    pub fn for_chat_model(model: ChatModel) -> Result<Self> {
        Ok(Self::new_from_env(resolve_model(model)?))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reuse an existing `reqwest::Client` (proxy settings, custom TLS, …).
    /// Takes precedence over [`Self::with_timeout`].
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`EveryLlmError::Configuration`] – if the model string is empty.
    /// * [`EveryLlmError::Provider`] – if the HTTP client cannot be built.
    pub fn build(self) -> Result<LiteLlmAdapter> {
        if self.model.trim().is_empty() {
            return Err(EveryLlmError::Configuration(
                "model name must not be empty".into(),
            ));
        }

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .map_err(LiteLlmError::from)?,
        };

        Ok(LiteLlmAdapter {
            client: Arc::new(LiteLlmClient::new(http, self.api_key, self.api_base)),
            model: self.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model_is_rejected() {
        let err = LiteLlmAdapterBuilder::new("  ").build().err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn build_keeps_model_and_base() {
        let adapter = LiteLlmAdapterBuilder::new("azure/gpt-4o")
            .with_api_base("http://gateway:4000/")
            .with_api_key("sk-test")
            .build()
            .unwrap();

        assert_eq!(adapter.model(), "azure/gpt-4o");
        assert_eq!(adapter.api_base(), "http://gateway:4000");
        assert!(adapter.client.has_api_key());
    }

    #[test]
    fn request_wraps_prompt_verbatim() {
        let adapter = LiteLlmAdapterBuilder::new("gemma").build().unwrap();
        let request = adapter.request("Why is the sky blue?".into());

        assert_eq!(request.model, "gemma");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "Why is the sky blue?");
        assert!(!request.is_stream());
    }
}
