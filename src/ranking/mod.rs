//! Relevance scoring and sentence highlighting.

pub mod highlighter;
pub mod scorer;

pub use highlighter::{SentenceHighlighter, MIN_SENTENCE_CHARS};
pub use scorer::{cosine_similarity, rank_by_relevance, ScoredChunk};
