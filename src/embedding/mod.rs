//! Text embedding: encoder trait + local BERT engine via candle.

pub mod encoder;
pub mod engine;

pub use encoder::TextEncoder;
pub use engine::{EmbeddingEngine, EMBEDDING_DIM};
