//! Logical model identifiers used throughout the **everyllm** workspace.
//!
//! Application code picks a [`ChatModel`] variant and never types literal
//! provider strings such as `"gpt-4o-mini"` itself. Turning a variant into
//! the string a provider expects is the job of
//! [`crate::registry::ModelRegistry`], which also applies the deployment
//! mode and the custom-model override.
//!
//! # Adding more models
//!
//! 1. Add the variant here together with its string form in
//!    [`ChatModel::as_str`] and the serde rename.
//! 2. If the provider expects a name that differs from the string form, add
//!    an entry to the fixed mapping in `registry.rs`.
//! 3. Add it to [`ChatModel::ALL`]; the tests iterate that list.
//!
//! # Example
//!
//! ```rust
//! use everyllm_core::model::ChatModel;
//!
//! let model: ChatModel = "phi3:14b".parse().unwrap();
//! assert_eq!(model, ChatModel::LocalPhi3_14b);
//! assert!(model.is_local());
//! ```
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::EveryLlmError;

/// Universal identifier for a chat model.
///
/// The serialized form is the string returned by [`ChatModel::as_str`], so
/// the enum can travel through JSON configs and HTTP payloads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatModel {
    #[serde(rename = "Claude 3.5 Sonnet")]
    Claude35Sonnet,
    /// Hosted flagship model.
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    /// Hosted economy model.
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "command-r")]
    CommandR,

    #[serde(rename = "llama3.1")]
    LocalLlama3,
    #[serde(rename = "gemma")]
    LocalGemma,
    #[serde(rename = "mistral")]
    LocalMistral,
    #[serde(rename = "phi3:14b")]
    LocalPhi3_14b,

    /// Whatever `CUSTOM_MODEL` names at resolution time.
    #[serde(rename = "custom")]
    Custom,
}

impl ChatModel {
    pub const ALL: [ChatModel; 9] = [
        ChatModel::Claude35Sonnet,
        ChatModel::Gpt4o,
        ChatModel::Gpt4oMini,
        ChatModel::CommandR,
        ChatModel::LocalLlama3,
        ChatModel::LocalGemma,
        ChatModel::LocalMistral,
        ChatModel::LocalPhi3_14b,
        ChatModel::Custom,
    ];

    /// The enumeration's own string form.
    ///
    /// For local models this already equals the name the provider expects.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Claude35Sonnet => "Claude 3.5 Sonnet",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::CommandR => "command-r",
            ChatModel::LocalLlama3 => "llama3.1",
            ChatModel::LocalGemma => "gemma",
            ChatModel::LocalMistral => "mistral",
            ChatModel::LocalPhi3_14b => "phi3:14b",
            ChatModel::Custom => "custom",
        }
    }

    /// Models served by a hosted provider.
    pub const fn is_cloud(&self) -> bool {
        matches!(
            self,
            ChatModel::Gpt4o | ChatModel::Gpt4oMini | ChatModel::Claude35Sonnet
        )
    }

    pub const fn is_local(&self) -> bool {
        !self.is_cloud()
    }

    /// Short label shown in model pickers, for the models that have one.
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            ChatModel::Gpt4oMini => Some("Fast"),
            ChatModel::Gpt4o => Some("Powerful"),
            ChatModel::Claude35Sonnet => Some("Hyper"),
            _ => None,
        }
    }

    pub const fn description(&self) -> Option<&'static str> {
        match self {
            ChatModel::Gpt4oMini => Some("OpenAI/GPT-4o-mini"),
            ChatModel::Gpt4o => Some("OpenAI/GPT-4o"),
            ChatModel::Claude35Sonnet => Some("anthropic/claude-3.5-sonnet"),
            _ => None,
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatModel {
    type Err = EveryLlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| EveryLlmError::Configuration(format!("unknown chat model `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_form_round_trips_through_from_str() {
        for model in ChatModel::ALL {
            assert_eq!(model.as_str().parse::<ChatModel>().unwrap(), model);
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&ChatModel::LocalPhi3_14b).unwrap();
        assert_eq!(json, "\"phi3:14b\"");

        let model: ChatModel = serde_json::from_str("\"Claude 3.5 Sonnet\"").unwrap();
        assert_eq!(model, ChatModel::Claude35Sonnet);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "gpt-5".parse::<ChatModel>().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn only_hosted_models_are_cloud() {
        let cloud: Vec<_> = ChatModel::ALL.into_iter().filter(ChatModel::is_cloud).collect();
        assert_eq!(
            cloud,
            vec![
                ChatModel::Claude35Sonnet,
                ChatModel::Gpt4o,
                ChatModel::Gpt4oMini
            ]
        );
        assert!(ChatModel::Custom.is_local());
    }

    #[test]
    fn picker_labels_exist_for_cloud_models_only() {
        for model in ChatModel::ALL {
            assert_eq!(model.label().is_some(), model.is_cloud());
            assert_eq!(model.description().is_some(), model.is_cloud());
        }
    }
}
