//! Prompt assembly for grounded answers and study-material generation

use crate::types::RetrievalMatch;

/// Persona and instruction preamble prefixed to every answer prompt
pub const PERSONA_PREAMBLE: &str = "You are Disha Mitra, an educational mentor who helps students \
     understand study material clearly and confidently. Answer concisely and supportively; when \
     relevant, indicate which part of the provided context supports your answer.";

/// Visual delimiter between context chunks
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Prompt builder for the RAG pipeline
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate match texts in descending-similarity order, separated by
    /// the context delimiter. Empty matches produce an empty context.
    pub fn build_context(matches: &[RetrievalMatch]) -> String {
        matches
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER)
    }

    /// The single grounded-answer prompt: preamble, context, question.
    ///
    /// Sent even when context is empty; a best-effort answer from the
    /// preamble and question alone beats refusing outright.
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            "{}\n\nCONTEXT:\n{}\n\nQUESTION: {}\n\nAnswer:",
            PERSONA_PREAMBLE, context, question
        )
    }

    /// Flashcard generation prompt: 3-5 question/answer pairs as strict JSON
    pub fn build_flashcard_prompt(text: &str) -> String {
        format!(
            r#"You are an expert educator tasked with creating flashcards from provided text. Analyze the text and generate 3-5 concise question-answer pairs focusing on key concepts, definitions, or facts. Return *only* valid JSON in the format: {{"flashcards": [{{"question": "", "answer": ""}}, ...]}}. Do not include any extra text, explanations, or code fences. Ensure the output is valid JSON.

Text: {}
Generate flashcards in JSON format."#,
            text
        )
    }

    /// MCQ generation prompt: a JSON array of four-option questions
    pub fn build_mcq_prompt(text: &str) -> String {
        format!(
            r#"You are an educational AI that generates MCQs. Return ONLY valid JSON - no explanations, no markdown, no headings.

Format:
[
  {{
    "question": "...",
    "options": ["...", "...", "...", "..."],
    "answer": "..."
  }},
  ...
]

IMPORTANT: Do not add extra text before or after the JSON.

Content:
{}"#,
            text
        )
    }
}
