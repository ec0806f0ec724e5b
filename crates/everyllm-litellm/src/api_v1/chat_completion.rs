use std::collections::BTreeMap;

use everyllm_core::generic::{GenericMessage, GenericRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_builder_methods;

use super::common::Usage;

/// Request body for `POST {api_base}/chat/completions`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            response_format: None,
            stream: None,
        }
    }

    /// Single-message request carrying `prompt` as the user turn.
    pub fn from_prompt(model: String, prompt: String) -> Self {
        Self::new(model, vec![GenericMessage::user(prompt).into()])
    }

    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

impl_builder_methods!(
    ChatCompletionRequest,
    response_format: Value,
    stream: bool
);

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
    Function,
    Tool,
}

impl From<GenericRole> for MessageRole {
    fn from(value: GenericRole) -> Self {
        match value {
            GenericRole::System => MessageRole::System,
            GenericRole::Assistant => MessageRole::Assistant,
            GenericRole::User => MessageRole::User,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl From<GenericMessage> for ChatCompletionMessage {
    fn from(value: GenericMessage) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Set instead of `content` when the model declines to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Response of a non-streaming completion, exactly as the provider sent it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,

    /// Fields we don't model, kept so the response reaches the caller as sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

/// Why the model stopped. Reasons this crate does not know are kept as sent.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    FunctionCall,
    Other(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::ToolCalls => "tool_calls",
            FinishReason::FunctionCall => "function_call",
            FinishReason::Other(reason) => reason,
        }
    }
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            "tool_calls" => FinishReason::ToolCalls,
            "function_call" => FinishReason::FunctionCall,
            _ => FinishReason::Other(value),
        }
    }
}

impl From<FinishReason> for String {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Other(reason) => reason,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prompt_becomes_single_user_message() {
        let request =
            ChatCompletionRequest::from_prompt("gpt-4o".into(), "  What is a LLM?\n".into());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "  What is a LLM?\n"}],
            })
        );
    }

    #[test]
    fn stream_flag_is_serialised_when_set() {
        let request = ChatCompletionRequest::from_prompt("gemma".into(), "hi".into()).stream(true);
        assert!(request.is_stream());
        assert_eq!(serde_json::to_value(&request).unwrap()["stream"], true);
    }

    #[test]
    fn unknown_response_fields_are_retained() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hello"},
                "finish_reason": "eos"
            }],
            "_hidden_params": {"custom_llm_provider": "openai"}
        }))
        .unwrap();

        assert_eq!(response.text(), Some("hello"));
        assert_eq!(
            response.choices[0].finish_reason,
            Some(FinishReason::Other("eos".into()))
        );
        assert_eq!(
            response.extra["_hidden_params"]["custom_llm_provider"],
            "openai"
        );
    }

    #[test]
    fn nested_fields_survive_a_round_trip() {
        let sent = json!({
            "id": "chatcmpl-2",
            "object": "chat.completion",
            "created": 2,
            "model": "azure/gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hi"},
                "finish_reason": "stop",
                "logprobs": {"content": [{"token": "hi", "logprob": -0.1}]}
            }],
            "usage": {
                "prompt_tokens": 1,
                "completion_tokens": 2,
                "total_tokens": 3,
                "prompt_tokens_details": {"cached_tokens": 0}
            }
        });

        let response: ChatCompletionResponse = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), sent);
    }

    #[test]
    fn finish_reasons_keep_their_wire_form() {
        for raw in ["stop", "length", "content_filter", "tool_calls", "eos"] {
            let reason: FinishReason = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(reason.as_str(), raw);
            assert_eq!(serde_json::to_value(&reason).unwrap(), raw);
        }
    }
}
