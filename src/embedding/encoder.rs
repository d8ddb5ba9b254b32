//! Narrow encoder interface between the pipeline and the embedding model.
//!
//! Scoring and highlighting only ever see this trait, so they can be exercised
//! against a deterministic fake without loading model weights.

use anyhow::Result;

/// Deterministic mapping from strings to fixed-dimension vectors.
///
/// Implementations must return one vector per input, in input order, and the
/// same vectors for the same inputs within a run. Multi-string calls are
/// batched rather than looped so the fixed per-call model overhead is paid
/// once per batch.
pub trait TextEncoder {
    /// Encode a batch of texts into one vector each, preserving order
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Vector length produced by this encoder
    fn dimension(&self) -> usize;

    /// Encode a single text
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.encode_batch(&[text])?;
        vectors
            .pop()
            .ok_or_else(|| anyhow::anyhow!("encoder returned no vector for input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal encoder: maps each text to [len, vowel count]
    struct LengthEncoder;

    impl TextEncoder for LengthEncoder {
        fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let vowels = t.chars().filter(|c| "aeiou".contains(*c)).count();
                    vec![t.len() as f32, vowels as f32]
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_encode_delegates_to_batch() {
        let encoder = LengthEncoder;
        let single = encoder.encode("hello").unwrap();
        let batch = encoder.encode_batch(&["hello"]).unwrap();
        assert_eq!(single, batch[0]);
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let encoder = LengthEncoder;
        let vectors = encoder.encode_batch(&["a", "bb", "ccc"]).unwrap();
        assert_eq!(vectors[0][0], 1.0);
        assert_eq!(vectors[1][0], 2.0);
        assert_eq!(vectors[2][0], 3.0);
    }
}
