//! Provider abstractions for the external embedding, generation, and vector
//! index services
//!
//! The pipeline talks to the outside world only through these traits; the
//! concrete clients live alongside them.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod pinecone;
pub mod vector_index;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::GenerationProvider;
pub use pinecone::PineconeIndex;
pub use vector_index::{IndexMatch, VectorIndexProvider};
