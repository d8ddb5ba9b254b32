//! Document text access and paragraph-level chunk extraction.

pub mod chunker;
pub mod reader;

pub use chunker::{Chunk, ChunkExtractor, MIN_CHUNK_CHARS};
pub use reader::{PageSource, PdfReader};
