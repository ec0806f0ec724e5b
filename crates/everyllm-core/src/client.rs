//! Generic, lightweight client bound to a single concrete provider.
//!
//! The client is **generic over the backend type `B`**: no dynamic dispatch
//! appears in user code, and the response and chunk types stay the
//! backend's own.
//!
//! ```rust,no_run
//! use everyllm_core::{EveryLlmClient, provider::CompletionProvider};
//!
//! async fn ask<B: CompletionProvider>(backend: B) -> everyllm_core::error::Result<B::Response> {
//!     let client = EveryLlmClient::new(backend);
//!     client.complete("What is a LLM?").await
//! }
//! ```
//!
//! Any backend crate (e.g. `everyllm-litellm`) implements the provider traits
//! and the same client works out of the box.
use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{
    error::Result,
    provider::{
        BoxFuture, CompletionProvider, StreamingCompletionProvider, StructuredCompletionProvider,
    },
};

/// A client bound to a single provider.
///
/// Cloning only bumps a reference count, so share it freely across tasks.
#[derive(Debug)]
pub struct EveryLlmClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for EveryLlmClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> EveryLlmClient<B>
where
    B: CompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to read provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CompletionProvider> CompletionProvider for EveryLlmClient<B> {
    type Response = B::Response;

    fn complete<'p>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<Self::Response>> {
        self.backend.complete(prompt)
    }
}

impl<B: StreamingCompletionProvider> StreamingCompletionProvider for EveryLlmClient<B> {
    type Chunk = B::Chunk;

    type ChunkStream<'s>
        = B::ChunkStream<'s>
    where
        Self: 's;

    fn astream<'s>(&'s self, prompt: impl Into<String>) -> Self::ChunkStream<'s> {
        self.backend.astream(prompt)
    }
}

impl<B: StructuredCompletionProvider> StructuredCompletionProvider for EveryLlmClient<B> {
    fn structured_complete<'p, T>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<T>>
    where
        T: JsonSchema + DeserializeOwned + Send + 'static,
    {
        self.backend.structured_complete(prompt)
    }
}
