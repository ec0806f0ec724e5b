use std::pin::Pin;

use everyllm_core::{
    error::{EveryLlmError, Result},
    provider::StreamingCompletionProvider,
};
use futures_core::stream::Stream;
use futures_util::StreamExt;

use crate::{LiteLlmAdapter, api_v1::ChatCompletionChunk};

impl StreamingCompletionProvider for LiteLlmAdapter {
    type Chunk = ChatCompletionChunk;

    type ChunkStream<'s>
        = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk>> + Send + 's>>
    where
        Self: 's;

    fn astream<'s>(&'s self, prompt: impl Into<String>) -> Self::ChunkStream<'s> {
        let request = self.request(prompt.into()).stream(true);

        Box::pin(
            self.client
                .chat_completion_stream(request)
                .map(|chunk| chunk.map_err(EveryLlmError::from)),
        )
    }
}
