//! Provider-agnostic message types.
//!
//! Every request this workspace sends is a list of `{role, content}` pairs.
//! Provider crates convert [`GenericMessage`] into their wire format via a
//! plain `From` impl.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message, independent of any specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub role: GenericRole,
    pub content: String,
}

impl GenericMessage {
    /// Field order mirrors common HTTP APIs (`role`, then `content`).
    ///
    /// ```rust
    /// use everyllm_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new(GenericRole::System, "You are a helpful bot.");
    /// assert_eq!(sys.role.to_string(), "system");
    /// ```
    pub fn new(role: GenericRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A user turn carrying `prompt` unmodified.
    pub fn user(prompt: impl Into<String>) -> Self {
        Self::new(GenericRole::User, prompt)
    }
}

/// Chat roles recognised by most LLM providers.
///
/// `Display` renders the lowercase wire name.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    System,
    Assistant,
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}
