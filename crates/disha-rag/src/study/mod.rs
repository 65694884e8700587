//! Flashcard and MCQ generation from document text
//!
//! These sibling features share the extractor and generation service with
//! the RAG pipeline but skip the index entirely: the document text goes
//! straight into a structured-output prompt, and the completion runs through
//! the fallback JSON parse chain.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::StudyConfig;
use crate::error::{Error, Result};
use crate::generation::{parse_json_completion, PromptBuilder};
use crate::ingestion::TextExtractor;
use crate::providers::GenerationProvider;
use crate::types::Source;

/// A question/answer study card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// A multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mcq {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Deserialize)]
struct FlashcardDeck {
    flashcards: Vec<Flashcard>,
}

/// Generates study material from a document source
pub struct StudyGenerator {
    extractor: Arc<dyn TextExtractor>,
    llm: Arc<dyn GenerationProvider>,
    max_prompt_chars: usize,
}

impl StudyGenerator {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn GenerationProvider>,
        config: &StudyConfig,
    ) -> Self {
        Self {
            extractor,
            llm,
            max_prompt_chars: config.max_prompt_chars,
        }
    }

    /// Generate 3-5 flashcards from the document at `source`
    pub async fn generate_flashcards(&self, source: &Source) -> Result<Vec<Flashcard>> {
        let text = self.extract_capped(source).await?;
        let prompt = PromptBuilder::build_flashcard_prompt(&text);
        let completion = self.llm.complete(&prompt).await?;

        let value = parse_json_completion(&completion)?;
        let deck: FlashcardDeck = serde_json::from_value(value)
            .map_err(|e| Error::parse_failure(format!("unexpected flashcard shape: {}", e), completion))?;
        Ok(deck.flashcards)
    }

    /// Generate multiple-choice questions from the document at `source`
    pub async fn generate_mcqs(&self, source: &Source) -> Result<Vec<Mcq>> {
        let text = self.extract_capped(source).await?;
        let prompt = PromptBuilder::build_mcq_prompt(&text);
        let completion = self.llm.complete(&prompt).await?;

        let value = parse_json_completion(&completion)?;
        serde_json::from_value(value)
            .map_err(|e| Error::parse_failure(format!("unexpected MCQ shape: {}", e), completion))
    }

    /// Extract text and truncate to the prompt budget at a character
    /// boundary; empty text is the same terminal condition as in ingestion.
    async fn extract_capped(&self, source: &Source) -> Result<String> {
        self.llm.ensure_configured()?;

        let text = self.extractor.extract(source).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyContent);
        }

        Ok(truncate_chars(trimmed, self.max_prompt_chars))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => text[..byte].to_string(),
        None => text.to_string(),
    }
}
