//! # Structured completion
//!
//! Asks for an answer shaped like [`RelatedQueries`]. The JSON schema is
//! derived from the struct and sent as `response_format`; the reply is
//! parsed back into the struct before it reaches us.
//!
//! ```bash
//! export CUSTOM_MODEL=ollama/qwen2.5:7b
//! cargo run -p everyllm --example litellm_structured -- custom
//! ```
use everyllm::{
    error::EveryLlmError,
    litellm::LiteLlmAdapterBuilder,
    model::ChatModel,
    provider::StructuredCompletionProvider as _,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Follow-up questions a user might ask next.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct RelatedQueries {
    related_questions: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model: ChatModel = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or(ChatModel::Gpt4o.as_str())
        .parse()?;

    let backend = LiteLlmAdapterBuilder::for_chat_model(model)?.build()?;

    let result = backend
        .structured_complete::<RelatedQueries>(
            "Suggest three follow-up questions to: Chandrayaan-3 landing?",
        )
        .await;

    match result {
        Ok(queries) => {
            for question in queries.related_questions {
                println!("- {question}");
            }
        }
        Err(EveryLlmError::SchemaValidation { reason, raw }) => {
            eprintln!("Model answered, but not in the requested shape: {reason}");
            if let Some(raw) = raw {
                eprintln!("Raw output:\n{raw}");
            }
        }
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
