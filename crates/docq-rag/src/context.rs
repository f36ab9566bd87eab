//! Context assembly: turning retrieval results into one grounding string

use docq_core::RetrievedChunk;

/// One retrieval result unit. Stores that answer multi-vector queries hand
/// back one inner list per sub-query; single-vector queries hand back plain
/// texts. The assembler accepts both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieved {
    Text(String),
    Group(Vec<String>),
}

impl From<String> for Retrieved {
    fn from(text: String) -> Self {
        Retrieved::Text(text)
    }
}

impl From<&str> for Retrieved {
    fn from(text: &str) -> Self {
        Retrieved::Text(text.to_string())
    }
}

impl From<Vec<String>> for Retrieved {
    fn from(texts: Vec<String>) -> Self {
        Retrieved::Group(texts)
    }
}

impl From<&RetrievedChunk> for Retrieved {
    fn from(hit: &RetrievedChunk) -> Self {
        Retrieved::Text(hit.text.clone())
    }
}

/// Flatten exactly one level of nesting and space-join everything in
/// retrieval order. Pure formatting: no ranking, deduplication or
/// truncation happens here. Empty input yields an empty string.
pub fn assemble<I>(results: I) -> String
where
    I: IntoIterator<Item = Retrieved>,
{
    let mut parts: Vec<String> = Vec::new();
    for result in results {
        match result {
            Retrieved::Text(text) => parts.push(text),
            Retrieved::Group(texts) => parts.extend(texts),
        }
    }
    parts.join(" ")
}
