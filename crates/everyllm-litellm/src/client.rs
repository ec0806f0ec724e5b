use async_stream::try_stream;

use everyllm_core::provider::BoxFuture;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use crate::{
    api_v1::{ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse},
    error::LiteLlmError,
    sse::{DONE, SseDecoder},
};

/// Where a LiteLLM proxy listens when started without flags.
pub const DEFAULT_API_BASE: &str = "http://localhost:4000";

/// The one call shape every completion path goes through.
///
/// `complete` and `structured_complete` both hand a fully built request to
/// `create_completion`; nothing else about the transport leaks upward.
pub trait CompletionTransport: Send + Sync {
    fn create_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'_, Result<ChatCompletionResponse, LiteLlmError>>;
}

/// Minimal HTTP client for the gateway's *chat/completions* endpoint.
///
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning is cheap.
/// * Sends `Authorization: Bearer …` only when an API key is configured;
///   local gateways commonly run without one.
#[derive(Debug, Clone)]
pub struct LiteLlmClient {
    api_key: Option<String>,
    http: HttpClient,
    base: String,
}

impl LiteLlmClient {
    pub fn new(http: HttpClient, api_key: Option<String>, api_base: Option<String>) -> Self {
        let base = api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        Self {
            api_key,
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.base
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base)
    }

    fn headers(&self, streaming: bool) -> Result<HeaderMap, LiteLlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if streaming {
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        }

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| LiteLlmError::Format(format!("invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LiteLlmError> {
        let headers = self.headers(false)?;
        let url = self.endpoint();

        #[cfg(feature = "tracing")]
        tracing::debug!(model = %request.model, %url, "sending chat completion");

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// Perform a **streaming** chat completion.
    ///
    /// Every `data:` payload is parsed into one [`ChatCompletionChunk`] and
    /// yielded in arrival order. `data: [DONE]` ends the stream.
    pub fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<ChatCompletionChunk, LiteLlmError>> + Send + '_ {
        request.stream = Some(true);

        try_stream! {
            let headers = self.headers(true)?;
            let url = self.endpoint();

            #[cfg(feature = "tracing")]
            tracing::debug!(model = %request.model, %url, "opening chat completion stream");

            let resp = self.http.post(url).headers(headers).json(&request).send().await?;

            if !resp.status().is_success() {
                Err::<(), _>(api_error(resp).await)?;
                return;
            }

            let mut bytes_stream = resp.bytes_stream();
            let mut decoder = SseDecoder::default();

            while let Some(chunk) = bytes_stream.next().await {
                decoder.push(&chunk?);

                while let Some(data) = decoder.next_event()? {
                    if data.trim() == DONE {
                        return;
                    }

                    let parsed: ChatCompletionChunk = serde_json::from_str(&data)?;
                    yield parsed;
                }
            }

            if let Some(data) = decoder.finish()? {
                if data.trim() != DONE {
                    let parsed: ChatCompletionChunk = serde_json::from_str(&data)?;
                    yield parsed;
                }
            }
        }
    }
}

impl CompletionTransport for LiteLlmClient {
    fn create_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> BoxFuture<'_, Result<ChatCompletionResponse, LiteLlmError>> {
        Box::pin(self.chat_completion(request))
    }
}

async fn api_error(resp: reqwest::Response) -> LiteLlmError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    #[cfg(feature = "tracing")]
    tracing::warn!(%status, "gateway returned an error");

    LiteLlmError::Api { status, body }
}
