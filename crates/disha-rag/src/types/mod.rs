//! Core types shared across the pipeline

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, Document, IndexEntry, RetrievalMatch, Source};
