//! Sentence-level highlighting inside a selected chunk.
//!
//! Runs only for chunks that survive into the final result set, so the
//! embedding cost stays bounded by the result cap rather than the corpus size.

use anyhow::Result;

use crate::embedding::TextEncoder;
use crate::ranking::scorer::cosine_similarity;

/// Minimum sentence length in characters; shorter candidates are dropped
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Default number of sentences surfaced per chunk
const DEFAULT_TOP_K: usize = 2;

/// Picks the sentences of a chunk most similar to the query
#[derive(Debug, Clone)]
pub struct SentenceHighlighter {
    top_k: usize,
    min_chars: usize,
}

impl SentenceHighlighter {
    /// Create a highlighter with the default sentence cap
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_chars: MIN_SENTENCE_CHARS,
        }
    }

    /// Create a highlighter surfacing at most `top_k` sentences
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            top_k,
            min_chars: MIN_SENTENCE_CHARS,
        }
    }

    /// Create a highlighter with custom sentence cap and length floor
    pub fn with_limits(top_k: usize, min_chars: usize) -> Self {
        Self { top_k, min_chars }
    }

    /// Return the at most `top_k` sentences of `chunk_text` most similar to
    /// the query, most-similar first.
    ///
    /// Sentences are split on a period-plus-space boundary. The splitter is a
    /// deliberate heuristic: abbreviations and decimal numbers mis-split, and
    /// that is an accepted accuracy limitation rather than a bug. Candidates
    /// shorter than `MIN_SENTENCE_CHARS` are dropped; when no candidate
    /// remains the result is empty and the encoder is never invoked.
    pub fn highlight<E: TextEncoder + ?Sized>(
        &self,
        encoder: &E,
        chunk_text: &str,
        query_vector: &[f32],
    ) -> Result<Vec<String>> {
        let sentences: Vec<&str> = chunk_text
            .split(". ")
            .map(str::trim)
            .filter(|s| s.chars().count() >= self.min_chars)
            .collect();

        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = encoder.encode_batch(&sentences)?;

        let mut ranked: Vec<(&str, f32)> = sentences
            .iter()
            .zip(vectors.iter())
            .map(|(sentence, vector)| (*sentence, cosine_similarity(vector, query_vector)))
            .collect();

        // Stable sort: tied sentences keep their order inside the chunk
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(ranked
            .into_iter()
            .take(self.top_k)
            .map(|(sentence, _)| sentence.to_string())
            .collect())
    }
}

impl Default for SentenceHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic encoder for tests: a letter-frequency vectorizer, so
    /// texts sharing words land close together under cosine similarity
    struct LetterFrequencyEncoder;

    impl TextEncoder for LetterFrequencyEncoder {
        fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|text| {
                    let mut v = vec![0.0f32; 26];
                    for c in text.to_lowercase().chars() {
                        if c.is_ascii_lowercase() {
                            v[(c as u8 - b'a') as usize] += 1.0;
                        }
                    }
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            26
        }
    }

    /// Encoder that panics when called - for asserting no-encode paths
    struct PanickingEncoder;

    impl TextEncoder for PanickingEncoder {
        fn encode_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            panic!("encoder must not be invoked");
        }

        fn dimension(&self) -> usize {
            0
        }
    }

    fn query_vector(text: &str) -> Vec<f32> {
        LetterFrequencyEncoder.encode(text).unwrap()
    }

    #[test]
    fn test_no_sentence_boundary_yields_empty() {
        let highlighter = SentenceHighlighter::new();
        // Single short clause without a period-space boundary
        let result = highlighter
            .highlight(&PanickingEncoder, "no boundary here", &[1.0])
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_short_candidates_are_dropped() {
        let highlighter = SentenceHighlighter::new();
        // Both fragments shorter than ten characters
        let result = highlighter
            .highlight(&PanickingEncoder, "tiny. bits", &[1.0])
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_at_most_top_k_sentences() {
        let highlighter = SentenceHighlighter::new();
        let text = "cycling routes wind through vineyards. \
                    the castle overlooks the harbor town. \
                    local markets sell lavender and honey.";
        let result = highlighter
            .highlight(&LetterFrequencyEncoder, text, &query_vector("vineyards"))
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_most_similar_sentence_first() {
        let highlighter = SentenceHighlighter::with_top_k(1);
        let text = "zzz qqq xxx jjj kkk www. the quick brown fox jumps over fences.";
        let query = query_vector("quick brown fox");

        let result = highlighter
            .highlight(&LetterFrequencyEncoder, text, &query)
            .unwrap();

        assert_eq!(result.len(), 1);
        assert!(result[0].contains("quick brown fox"));
    }

    #[test]
    fn test_tied_sentences_keep_chunk_order() {
        let highlighter = SentenceHighlighter::new();
        // Same letters in both sentences - identical vectors, tied scores
        let text = "first tied sentence here. here sentence tied first.";
        let query = query_vector("anything else");

        let result = highlighter
            .highlight(&LetterFrequencyEncoder, text, &query)
            .unwrap();

        assert_eq!(result[0], "first tied sentence here");
        assert_eq!(result[1], "here sentence tied first.");
    }

    #[test]
    fn test_sentences_are_trimmed() {
        let highlighter = SentenceHighlighter::new();
        let text = "a sentence with enough length.   another padded sentence follows here.";
        let result = highlighter
            .highlight(&LetterFrequencyEncoder, text, &query_vector("sentence"))
            .unwrap();
        for sentence in &result {
            assert_eq!(sentence.trim(), sentence);
        }
    }
}
