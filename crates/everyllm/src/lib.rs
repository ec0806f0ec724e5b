//! # `everyllm` – The umbrella crate
//!
//! One dependency line for the whole workspace:
//!
//! | Crate                  | What it provides                                                          |
//! |------------------------|---------------------------------------------------------------------------|
//! | **`everyllm-core`**    | `ChatModel`, the model registry, completion traits, generic client, errors |
//! | **`everyllm-litellm`** | HTTP adapter for a LiteLLM / OpenAI-compatible gateway *(optional)*       |
//!
//! The `litellm` feature (on by default) re-exports the adapter crate as
//! [`litellm`]. The `tracing` feature emits `tracing` events for model
//! resolution and outgoing requests.
//!
//! ## Configuration
//!
//! | Variable          | Effect                                                        |
//! |-------------------|---------------------------------------------------------------|
//! | `CUSTOM_MODEL`    | Model string used for [`model::ChatModel::Custom`]; required for it |
//! | `OPENAI_MODE`     | `openai` (default) or `azure`; `azure` renames GPT-4o models to `azure/…` |
//! | `LITELLM_API_KEY` | Bearer token sent to the gateway, captured when the adapter is built |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use everyllm::{
//!     EveryLlmClient,
//!     litellm::LiteLlmAdapterBuilder,
//!     model::ChatModel,
//!     provider::{CompletionProvider, StructuredCompletionProvider},
//! };
//!
//! #[derive(serde::Deserialize, schemars::JsonSchema)]
//! struct Answer { summary: String }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = LiteLlmAdapterBuilder::for_chat_model(ChatModel::Gpt4oMini)?.build()?;
//!     let client = EveryLlmClient::new(backend);
//!
//!     let response = client.complete("What is a LLM?").await?;
//!     println!("{}", response.text().unwrap_or_default());
//!
//!     let answer: Answer = client.structured_complete("Summarise Rust in one line.").await?;
//!     println!("{}", answer.summary);
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/everyllm/latest")]

pub use everyllm_core::*;

#[cfg(feature = "litellm")]
pub use everyllm_litellm as litellm;
