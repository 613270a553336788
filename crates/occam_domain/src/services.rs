use crate::{ChatMessage, CompletionOptions};

/// Read access to the page the agent left behind.
#[async_trait::async_trait]
pub trait PageStateProvider: Send + Sync {
    async fn current_url(&self) -> anyhow::Result<String>;

    async fn current_title(&self) -> anyhow::Result<String>;

    /// Flattened visible text of the page body
    async fn visible_text(&self) -> anyhow::Result<String>;
}

/// Chat-style text generation backed by an LLM provider.
#[async_trait::async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends the conversation and returns the text of the reply.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> anyhow::Result<String>;
}

/// Semantic comparison of an observed value against a reference.
#[async_trait::async_trait]
pub trait FuzzyMatchJudge: Send + Sync {
    /// Returns how well `observed` answers `question` compared to `reference`,
    /// in `[0.0, 1.0]`.
    async fn score(&self, observed: &str, reference: &str, question: &str) -> anyhow::Result<f64>;
}
