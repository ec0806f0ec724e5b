use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    chat_completion::{FinishReason, MessageRole},
    common::Usage,
};

/// A delta message as sent when `stream = true`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatCompletionMessageDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single streaming choice payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionChunkChoice {
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub delta: ChatCompletionMessageDelta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The outermost object of every server-sent event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChunkChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Fields we don't model, kept so the chunk reaches the caller as sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ChatCompletionChunk {
    /// Text delta of the first choice, if this chunk carries one.
    pub fn delta_text(&self) -> Option<&str> {
        self.choices.first()?.delta.content.as_deref()
    }

    /// Finish reason of the first choice; `Some` only on the final chunk.
    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.choices.first()?.finish_reason.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn final_chunk_is_passed_through_as_sent() {
        let sent = json!({
            "id": "chatcmpl-3",
            "object": "chat.completion.chunk",
            "created": 3,
            "model": "gemma",
            "choices": [{
                "index": 0,
                "delta": {},
                "finish_reason": "eos",
                "logprobs": null
            }],
            "usage": {
                "prompt_tokens": 4,
                "completion_tokens": 5,
                "total_tokens": 9,
                "completion_tokens_details": {"reasoning_tokens": 0}
            }
        });

        let chunk: ChatCompletionChunk = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(chunk.delta_text(), None);
        assert_eq!(chunk.finish_reason().map(FinishReason::as_str), Some("eos"));
        assert_eq!(serde_json::to_value(&chunk).unwrap(), sent);
    }
}
