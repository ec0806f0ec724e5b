//! # Plain completion
//!
//! Resolves a [`ChatModel`] against the environment, sends one prompt to the
//! gateway and prints the reply together with the reported token usage.
//!
//! ```bash
//! export LITELLM_API_KEY=sk-…          # optional for local proxies
//! export OPENAI_MODE=azure             # optional, renames GPT-4o models
//! cargo run -p everyllm --example litellm_complete -- gpt-4o-mini
//! ```
use everyllm::{
    litellm::LiteLlmAdapterBuilder,
    model::ChatModel,
    provider::CompletionProvider as _,
};
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
    println!("Using `{}` via {}", backend.model(), backend.api_base());

    let response = backend.complete("Why is the Rust borrow checker important?").await?;

    match response.text() {
        Some(answer) => println!("Assistant: {answer}"),
        None => println!("Assistant returned no textual content"),
    }

    if let Some(usage) = response.usage {
        println!(
            "Tokens – prompt: {}, completion: {}, total: {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(())
}
