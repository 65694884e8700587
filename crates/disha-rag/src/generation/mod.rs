//! Answer synthesis from retrieved context

pub mod parse;
pub mod prompt;

pub use parse::parse_json_completion;
pub use prompt::PromptBuilder;

use std::sync::Arc;

use crate::error::Result;
use crate::providers::GenerationProvider;
use crate::types::RetrievalMatch;

/// Builds the grounded prompt and invokes the generation service
pub struct AnswerSynthesizer {
    llm: Arc<dyn GenerationProvider>,
}

impl AnswerSynthesizer {
    pub fn new(llm: Arc<dyn GenerationProvider>) -> Self {
        Self { llm }
    }

    /// Answer `question` grounded in `matches`, returning the completion
    /// verbatim. With no matches the prompt still goes out with an empty
    /// context section; a best-effort answer is preferred over a refusal.
    pub async fn answer(&self, question: &str, matches: &[RetrievalMatch]) -> Result<String> {
        self.llm.ensure_configured()?;

        let context = PromptBuilder::build_context(matches);
        if context.is_empty() {
            tracing::debug!("answering without retrieved context");
        }

        let prompt = PromptBuilder::build_answer_prompt(question, &context);
        self.llm.complete(&prompt).await
    }
}
