use std::sync::Arc;

use occam_config::EvaluatorConfig;
use occam_domain::{ChatMessage, CompletionOptions, FuzzyMatchJudge, TextGenerationService};
use tracing::debug;

use crate::prompt::{self, FUZZY_MATCH_SYSTEM_PROMPT, FUZZY_MATCH_TEMPLATE, FuzzyMatchPrompt};

/// [`FuzzyMatchJudge`] that asks an LLM to grade an observed value against a
/// reference as correct, partially correct or incorrect.
///
/// Only a plain "correct" verdict counts as a match; a partial match scores
/// the same as a miss.
pub struct LlmFuzzyJudge<T> {
    service: Arc<T>,
    options: CompletionOptions,
}

impl<T: TextGenerationService> LlmFuzzyJudge<T> {
    pub fn new(service: Arc<T>, config: &EvaluatorConfig) -> Self {
        let options = CompletionOptions::new(config.model.as_str())
            .temperature(config.temperature)
            .max_tokens(config.fuzzy_match_max_tokens);
        Self { service, options }
    }
}

#[async_trait::async_trait]
impl<T: TextGenerationService> FuzzyMatchJudge for LlmFuzzyJudge<T> {
    async fn score(&self, observed: &str, reference: &str, question: &str) -> anyhow::Result<f64> {
        let prompt = prompt::render(
            FUZZY_MATCH_TEMPLATE,
            &FuzzyMatchPrompt { question, reference, observed },
        )?;
        let messages = [
            ChatMessage::system(FUZZY_MATCH_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        let response = self
            .service
            .complete(&messages, &self.options)
            .await?
            .to_lowercase();
        debug!(reference, response = %response, "Fuzzy match verdict");

        parse_verdict(&response)
    }
}

fn parse_verdict(response: &str) -> anyhow::Result<f64> {
    if response.contains("partially correct") || response.contains("incorrect") {
        Ok(0.0)
    } else if response.contains("correct") {
        Ok(1.0)
    } else {
        anyhow::bail!("Fuzzy match response has no verdict: {response}")
    }
}
