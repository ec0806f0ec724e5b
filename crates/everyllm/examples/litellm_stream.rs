//! # Streaming completion
//!
//! Prints text deltas as the gateway emits them.
//!
//! ```bash
//! cargo run -p everyllm --example litellm_stream -- llama3.1
//! ```
use std::io::{self, Write};

use everyllm::{
    litellm::LiteLlmAdapterBuilder,
    model::ChatModel,
    provider::StreamingCompletionProvider as _,
};
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model: ChatModel = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or(ChatModel::Gpt4oMini.as_str())
        .parse()?;

    let backend = LiteLlmAdapterBuilder::for_chat_model(model)?.build()?;
    let mut stream = backend.astream("Tell me a short story about Rustaceans exploring space.");

    print!("Assistant: ");
    io::stdout().flush().ok();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                if let Some(text) = chunk.delta_text() {
                    print!("{text}");
                    io::stdout().flush().ok();
                }
            }
            Err(e) => {
                eprintln!("\n\nError while streaming: {e}");
                break;
            }
        }
    }

    println!("\n\nStream finished");
    Ok(())
}
