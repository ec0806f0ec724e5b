use everyllm_core::{
    error::{EveryLlmError, Result},
    provider::{BoxFuture, StructuredCompletionProvider},
    schema_util::json_schema_response_format,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{
    LiteLlmAdapter,
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    client::CompletionTransport,
};

impl StructuredCompletionProvider for LiteLlmAdapter {
    fn structured_complete<'p, T>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<T>>
    where
        T: JsonSchema + DeserializeOwned + Send + 'static,
    {
        let request = self.request(prompt.into());

        Box::pin(structured_completion(self.client.as_ref(), request))
    }
}

/// Ask `transport` for JSON matching `T` and parse the answer.
///
/// Transport failures surface as [`EveryLlmError::Provider`]; an answer
/// that is missing or does not deserialise into `T` surfaces as
/// [`EveryLlmError::SchemaValidation`].
pub async fn structured_completion<C, T>(transport: &C, request: ChatCompletionRequest) -> Result<T>
where
    C: CompletionTransport + ?Sized,
    T: JsonSchema + DeserializeOwned,
{
    let request = request.response_format(json_schema_response_format::<T>()?);
    let response = transport.create_completion(request).await?;

    parse_structured(&response)
}

fn parse_structured<T>(response: &ChatCompletionResponse) -> Result<T>
where
    T: DeserializeOwned,
{
    let Some(choice) = response.choices.first() else {
        return Err(EveryLlmError::SchemaValidation {
            reason: "response has no choices".into(),
            raw: None,
        });
    };

    if let Some(refusal) = &choice.message.refusal {
        return Err(EveryLlmError::SchemaValidation {
            reason: format!("model refused: {refusal}"),
            raw: None,
        });
    }

    let Some(text) = choice.message.content.as_deref() else {
        return Err(EveryLlmError::SchemaValidation {
            reason: "response has no content".into(),
            raw: None,
        });
    };

    serde_json::from_str(strip_code_fence(text)).map_err(|e| EveryLlmError::SchemaValidation {
        reason: e.to_string(),
        raw: Some(text.to_owned()),
    })
}

/// Local models behind the gateway like to wrap JSON in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .map(|inner| inner.strip_prefix("json").unwrap_or(inner).trim())
        .unwrap_or(trimmed)
}
