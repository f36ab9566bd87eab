//! Chunking policies for splitting document text into indexable units
//!
//! The word-boundary policy is the default: it never fragments a word, which
//! keeps chunks semantically clean. A fixed character-window policy exists as
//! a configurable alternate for callers that want raw windows.

use serde::{Deserialize, Serialize};

/// How a document is split into chunks. No policy overlaps consecutive
/// chunks; cross-boundary continuity is a deliberate trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Greedy whole-word accumulation up to `max_words` tokens per chunk
    Words { max_words: usize },
    /// Fixed windows of `window` characters, on char boundaries
    Chars { window: usize },
}

impl Default for SplitPolicy {
    fn default() -> Self {
        SplitPolicy::Words { max_words: 100 }
    }
}

/// Split `text` according to `policy`
pub fn split(text: &str, policy: SplitPolicy) -> Vec<String> {
    match policy {
        SplitPolicy::Words { max_words } => split_words(text, max_words),
        SplitPolicy::Chars { window } => split_chars(text, window),
    }
}

/// Split on whitespace and greedily fill chunks of at most `max_words` words.
///
/// The final partial chunk is kept; whitespace-only input yields no chunks.
/// Words within a chunk are re-joined with single spaces.
pub fn split_words(text: &str, max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);
    let mut chunks = Vec::new();
    let mut current_chunk: Vec<&str> = Vec::with_capacity(max_words);

    for word in text.split_whitespace() {
        current_chunk.push(word);
        if current_chunk.len() >= max_words {
            chunks.push(current_chunk.join(" "));
            current_chunk.clear();
        }
    }

    if !current_chunk.is_empty() {
        chunks.push(current_chunk.join(" "));
    }

    chunks
}

/// Split into fixed windows of `window` characters, regardless of word
/// boundaries. Operates on chars, so a multi-byte code point is never cut.
pub fn split_chars(text: &str, window: usize) -> Vec<String> {
    let window = window.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0usize;

    for ch in text.chars() {
        current.push(ch);
        len += 1;
        if len >= window {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
