//! LiteLLM gateway backend for **everyllm**.
//!
//! [`LiteLlmAdapter`] forwards prompts to an OpenAI-compatible
//! `chat/completions` endpoint (a LiteLLM proxy by default) and implements
//! the completion traits of `everyllm-core`.
mod adapter;
mod provider_impl_complete;
mod provider_impl_stream;
mod provider_impl_structured;
mod sse;

pub use adapter::{LITELLM_API_KEY_ENV, LiteLlmAdapter, LiteLlmAdapterBuilder};
pub use client::{CompletionTransport, DEFAULT_API_BASE, LiteLlmClient};
pub use provider_impl_structured::structured_completion;
pub mod api_v1;
mod client;
pub mod error;
