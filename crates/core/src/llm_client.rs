//! Model-Driven Classification
//!
//! An [`IntentClassifier`] that delegates the routing decision to an
//! OpenAI-compatible chat model. The original design left classification to
//! the hosting voice model; this implementation keeps that option available
//! behind the same trait as the deterministic rules.

use crate::classify::{IntentClassifier, RequestClassification};
use crate::turn::Utterance;
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tracing::warn;

/// The fixed instruction that turns a chat model into a request router.
const ROUTING_INSTRUCTION: &str = "You route requests for a smart-home assistant. \
Reply with exactly one word. Reply SIMPLE when the user's request is a direct \
device command or a question about device state, such as turning something on \
or off or asking whether a door is locked. Reply COMPLEX when the request \
needs multiple steps, creates or changes a scene, routine, rule, or schedule, \
or when the intent is unclear. When in doubt, reply COMPLEX.";

/// An implementation of [`IntentClassifier`] for any OpenAI-compatible API.
pub struct LlmClassifier {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClassifier {
    /// Creates a new classifier backed by an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for the verdict (e.g., "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }

    /// Asks the model for a one-word verdict on a single utterance.
    async fn decide(&self, utterance: &Utterance) -> Result<RequestClassification> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(ROUTING_INSTRUCTION)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(utterance.as_str())
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let answer = response
            .choices
            .first()
            .context("No response choice from LLM")?
            .message
            .content
            .as_ref()
            .context("No content in LLM response")?;

        Ok(parse_verdict(answer))
    }
}

#[async_trait]
impl IntentClassifier for LlmClassifier {
    async fn classify(&self, utterance: &Utterance) -> RequestClassification {
        match self.decide(utterance).await {
            Ok(classification) => classification,
            Err(error) => {
                warn!(error = ?error, "LLM classification failed, taking the complex path");
                RequestClassification::Complex
            }
        }
    }
}

/// Maps the model's reply onto a classification.
///
/// Anything that is not an unambiguous SIMPLE verdict is complex.
fn parse_verdict(answer: &str) -> RequestClassification {
    if answer.trim().to_uppercase().starts_with("SIMPLE") {
        RequestClassification::Simple
    } else {
        RequestClassification::Complex
    }
}
