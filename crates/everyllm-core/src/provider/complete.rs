use std::{future::Future, pin::Pin};

use futures_core::stream::Stream;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Boxed, `Send` future returned by the provider traits.
///
/// Returning a [`Pin<Box<dyn Future>>`] keeps the traits usable without
/// pulling in `async_trait`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A **provider** turns a prompt into a network call to a concrete backend
/// and hands back the backend's reply untouched.
///
/// The prompt always becomes a single user message. Building multi-turn
/// conversations is not the provider's business.
pub trait CompletionProvider: Send + Sync {
    /// Provider-native response object, returned as received.
    type Response: Send + 'static;

    /// One non-streaming round-trip.
    ///
    /// This is `async` like the other capabilities. Synchronous callers
    /// drive it on their own runtime, e.g. `Runtime::block_on`.
    fn complete<'p>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<Self::Response>>;
}

/// A provider that can deliver the model's answer **incrementally**.
///
/// Chunks are yielded in the order the backend emits them. The stream ends
/// when the backend signals completion or fails; it cannot be restarted.
pub trait StreamingCompletionProvider: CompletionProvider {
    /// Provider-native chunk object.
    type Chunk: Send + 'static;

    type ChunkStream<'s>: Stream<Item = Result<Self::Chunk>> + Send + 's
    where
        Self: 's;

    /// Start a streaming completion. Nothing is sent before the stream is
    /// first polled.
    fn astream<'s>(&'s self, prompt: impl Into<String>) -> Self::ChunkStream<'s>;
}

/// A provider that can constrain its answer to the JSON Schema of `T` and
/// parse the result.
///
/// Implementations must report unusable output as
/// [`crate::error::EveryLlmError::SchemaValidation`], never as a provider
/// error, so callers can tell "reachable but useless" from "unreachable".
pub trait StructuredCompletionProvider: CompletionProvider {
    fn structured_complete<'p, T>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<T>>
    where
        T: JsonSchema + DeserializeOwned + Send + 'static;
}

/// The full capability set: complete, stream and structured completion.
pub trait Llm: StreamingCompletionProvider + StructuredCompletionProvider {}

impl<T> Llm for T where T: StreamingCompletionProvider + StructuredCompletionProvider {}
