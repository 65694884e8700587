//! Boundary-seeking text chunker
//!
//! Walks the text in windows of at most `max_chars` characters and cuts each
//! chunk at the last newline inside the window, falling back to the last
//! space, then to the hard window boundary. Chunks near natural breakpoints
//! come out shorter than the window; that trade favors coherent chunks over
//! uniform ones.

use crate::types::Chunk;

/// Split `text` into trimmed, non-empty chunks of at most `max_chars`
/// characters each.
///
/// Deterministic, and always terminates: every cut point strictly advances
/// past the window start, with the hard cut as the degenerate fallback.
/// Empty or whitespace-only input yields an empty sequence.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    if max_chars == 0 {
        return Vec::new();
    }

    // Byte offsets of every character, so windows count characters while
    // slices stay on UTF-8 boundaries.
    let char_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total_chars = char_offsets.len();

    let mut chunks = Vec::new();
    let mut start = 0usize; // character index

    while start < total_chars {
        let window_end = (start + max_chars).min(total_chars);
        let start_byte = char_offsets[start];
        let end_byte = if window_end == total_chars {
            text.len()
        } else {
            char_offsets[window_end]
        };

        let window = &text[start_byte..end_byte];

        // Prefer the last newline in the window, then the last space, then
        // the hard boundary. A separator at the window start does not
        // advance, so it is rejected the same way the not-found case is.
        let cut_byte = window
            .rfind('\n')
            .filter(|&p| p > 0)
            .or_else(|| window.rfind(' ').filter(|&p| p > 0))
            .map(|p| start_byte + p)
            .unwrap_or(end_byte);

        let piece = text[start_byte..cut_byte].trim();
        if !piece.is_empty() {
            chunks.push(Chunk::new(chunks.len(), piece.to_string()));
        }

        start = if cut_byte >= text.len() {
            total_chars
        } else {
            // cut_byte is a char boundary; recover its character index
            char_offsets.partition_point(|&b| b < cut_byte)
        };
    }

    chunks
}
