use everyllm_core::{
    error::{EveryLlmError, Result},
    provider::{BoxFuture, CompletionProvider},
};

use crate::{LiteLlmAdapter, api_v1::ChatCompletionResponse, client::CompletionTransport};

impl CompletionProvider for LiteLlmAdapter {
    type Response = ChatCompletionResponse;

    fn complete<'p>(&'p self, prompt: impl Into<String>) -> BoxFuture<'p, Result<Self::Response>> {
        let request = self.request(prompt.into());

        Box::pin(async move {
            self.client
                .create_completion(request)
                .await
                .map_err(EveryLlmError::from)
        })
    }
}
