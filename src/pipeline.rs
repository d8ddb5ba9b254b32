//! End-to-end ranking pipeline: extract -> encode -> rank -> highlight -> assemble.
//!
//! One synchronous run over a fixed document set. The pipeline owns every
//! per-run entity (chunks, vectors, report) and releases them when the run
//! completes; no state survives across runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::RankingConfig;
use crate::embedding::TextEncoder;
use crate::errors::Result;
use crate::extract::chunker::document_name;
use crate::extract::{Chunk, ChunkExtractor, PageSource, PdfReader};
use crate::query::Query;
use crate::ranking::{rank_by_relevance, SentenceHighlighter};
use crate::report::{RunMetadata, RunReport};

/// Pipeline tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Result cap: number of top-ranked sections in the report
    pub top_sections: usize,
    /// Highlight cap: sentences surfaced per selected section
    pub top_sentences: usize,
    /// Noise floor for paragraph chunks, in characters
    pub min_chunk_chars: usize,
    /// Noise floor for sentence candidates, in characters
    pub min_sentence_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_sections: 10,
            top_sentences: 2,
            min_chunk_chars: 20,
            min_sentence_chars: 10,
        }
    }
}

impl From<RankingConfig> for PipelineConfig {
    fn from(config: RankingConfig) -> Self {
        Self {
            top_sections: config.top_sections,
            top_sentences: config.top_sentences,
            min_chunk_chars: config.min_chunk_chars,
            min_sentence_chars: config.min_sentence_chars,
        }
    }
}

/// The relevance-ranking pipeline.
///
/// Holds the encoder for the run's duration; the model is loaded once and
/// every stage that needs it receives it from here, so encode calls stay
/// sequential and batched against the single shared instance.
pub struct Pipeline<E: TextEncoder> {
    encoder: E,
    reader: Box<dyn PageSource>,
    extractor: ChunkExtractor,
    highlighter: SentenceHighlighter,
    config: PipelineConfig,
}

impl<E: TextEncoder> Pipeline<E> {
    /// Create a pipeline with default parameters and the PDF page source
    pub fn new(encoder: E) -> Self {
        Self::with_config(encoder, PipelineConfig::default())
    }

    /// Create a pipeline with custom parameters
    pub fn with_config(encoder: E, config: PipelineConfig) -> Self {
        Self {
            encoder,
            reader: Box::new(PdfReader::new()),
            extractor: ChunkExtractor::with_min_chars(config.min_chunk_chars),
            highlighter: SentenceHighlighter::with_limits(
                config.top_sentences,
                config.min_sentence_chars,
            ),
            config,
        }
    }

    /// Replace the page source (tests use canned pages instead of real PDFs)
    pub fn with_reader(mut self, reader: Box<dyn PageSource>) -> Self {
        self.reader = reader;
        self
    }

    /// Current pipeline parameters
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute one run over `documents` and return the assembled report.
    ///
    /// Documents are processed in the order given; a document that cannot be
    /// opened or parsed is logged and skipped, and does not appear in the
    /// report's `input_documents`. Zero surviving chunks is a valid outcome
    /// and produces an empty section list with full metadata.
    pub fn run(&self, documents: &[PathBuf], query: &Query) -> Result<RunReport> {
        let (processed, chunks) = self.extract_all(documents);
        tracing::info!(
            documents = processed.len(),
            chunks = chunks.len(),
            "extraction complete"
        );

        let metadata = RunMetadata::new(processed, query.persona(), query.job());

        if chunks.is_empty() {
            return Ok(RunReport::assemble(metadata, Vec::new()));
        }

        // One call for the query, one batched call for all chunk texts
        let query_vector = self.encoder.encode(&query.text())?;
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let chunk_vectors = self.encoder.encode_batch(&texts)?;

        let ranked = rank_by_relevance(chunks, &chunk_vectors, &query_vector);

        // Highlights only for the chunks that made the cut
        let mut selected = Vec::with_capacity(self.config.top_sections);
        for scored in ranked.into_iter().take(self.config.top_sections) {
            let highlights =
                self.highlighter
                    .highlight(&self.encoder, &scored.chunk.text, &query_vector)?;
            selected.push((scored, highlights));
        }

        Ok(RunReport::assemble(metadata, selected))
    }

    /// Extract chunks from every readable document, skipping failures
    fn extract_all(&self, documents: &[PathBuf]) -> (Vec<String>, Vec<Chunk>) {
        let mut processed = Vec::new();
        let mut chunks = Vec::new();

        for path in documents {
            let document = document_name(path);
            match self.extractor.extract(path, self.reader.as_ref()) {
                Ok(doc_chunks) => {
                    tracing::debug!(%document, chunks = doc_chunks.len(), "extracted document");
                    processed.push(document);
                    chunks.extend(doc_chunks);
                }
                Err(e) => {
                    tracing::warn!(%document, error = %e, "skipping unreadable document");
                }
            }
        }

        (processed, chunks)
    }
}
