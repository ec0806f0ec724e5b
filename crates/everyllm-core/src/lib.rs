//! Provider-agnostic building blocks for **everyllm**:
//!
//! * [`model::ChatModel`] – the closed set of logical model identifiers,
//! * [`registry`] – resolution of a model into the provider's literal name,
//! * [`provider`] – the completion capability traits,
//! * [`EveryLlmClient`] – a shareable handle over any provider,
//! * [`error::EveryLlmError`] – the one error type every crate converts into.
pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod provider;
pub mod registry;
pub mod schema_util;

pub use client::EveryLlmClient;
