//! Cosine-similarity relevance scoring over extracted chunks.

use serde::{Deserialize, Serialize};

use crate::extract::Chunk;

/// A chunk annotated with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Cosine similarity to the query vector, in [-1, 1]
    pub score: f32,
}

/// Cosine similarity between two vectors, clamped to [-1, 1].
///
/// Mismatched lengths and zero-norm vectors score 0.0 rather than erroring;
/// a degenerate vector simply carries no relevance signal.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Score every chunk against the query vector and order by relevance.
///
/// `chunk_vectors` must be 1:1 with `chunks` in the same order. All chunks
/// participate - no score threshold is applied, so a relevant passage that
/// happens to share no keywords with the query is never silently excluded.
/// The sort is stable: ties keep original extraction order, which makes the
/// output deterministic across runs on identical inputs.
pub fn rank_by_relevance(
    chunks: Vec<Chunk>,
    chunk_vectors: &[Vec<f32>],
    query_vector: &[f32],
) -> Vec<ScoredChunk> {
    debug_assert_eq!(chunks.len(), chunk_vectors.len());

    let mut scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .zip(chunk_vectors.iter())
        .map(|(chunk, vector)| ScoredChunk {
            chunk,
            score: cosine_similarity(vector, query_vector),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored
}
