//! Paragraph-level chunk extraction from per-page document text.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::extract::reader::PageSource;

/// Minimum chunk length in characters; shorter paragraphs are noise
pub const MIN_CHUNK_CHARS: usize = 20;

/// A paragraph-sized unit of extracted document text, the atomic unit of
/// ranking. Identity is positional: (document, page, extraction order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source document file name
    pub document: String,
    /// 1-based page index within the document
    pub page: usize,
    /// Optional heading label; never an empty string.
    ///
    /// Left unset by extraction - a placeholder for heading detection,
    /// never fabricated from body text.
    pub section_title: Option<String>,
    /// Paragraph text, trimmed, at least `MIN_CHUNK_CHARS` characters
    pub text: String,
}

/// Splits document pages into paragraph chunks
#[derive(Debug, Clone)]
pub struct ChunkExtractor {
    min_chars: usize,
}

impl ChunkExtractor {
    /// Create an extractor with the default noise threshold
    pub fn new() -> Self {
        Self {
            min_chars: MIN_CHUNK_CHARS,
        }
    }

    /// Create an extractor with a custom minimum paragraph length
    pub fn with_min_chars(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// Extract the ordered chunk sequence for one document.
    ///
    /// Pages are split on blank-line boundaries; each paragraph is trimmed and
    /// dropped if shorter than the noise threshold. Chunks come back in
    /// page order, paragraph order within a page.
    pub fn extract(&self, path: &Path, reader: &dyn PageSource) -> Result<Vec<Chunk>> {
        let document = document_name(path);
        let pages = reader
            .page_texts(path)
            .with_context(|| format!("could not read pages of {document}"))?;

        let mut chunks = Vec::new();
        for (page_idx, page_text) in pages.iter().enumerate() {
            for paragraph in page_text.split("\n\n") {
                let text = paragraph.trim();
                if text.chars().count() < self.min_chars {
                    continue;
                }
                chunks.push(Chunk {
                    document: document.clone(),
                    page: page_idx + 1,
                    section_title: None,
                    text: text.to_string(),
                });
            }
        }

        Ok(chunks)
    }
}

impl Default for ChunkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Document identifier: the file name as presented to the pipeline
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Canned page source for extractor tests
    struct FixedPages(Vec<String>);

    impl PageSource for FixedPages {
        fn page_texts(&self, _path: &Path) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        fn page_texts(&self, _path: &Path) -> Result<Vec<String>> {
            Err(anyhow::anyhow!("corrupt document"))
        }
    }

    #[test]
    fn test_noise_filter_drops_short_paragraphs() {
        // 25-char paragraph survives, 15-char paragraph is filtered
        let long = "a".repeat(25);
        let short = "b".repeat(15);
        let source = FixedPages(vec![format!("{long}\n\n{short}")]);

        let chunks = ChunkExtractor::new()
            .extract(Path::new("doc.pdf"), &source)
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, long);
        assert_eq!(chunks[0].page, 1);
    }

    #[test]
    fn test_pages_are_one_based_and_ordered() {
        let source = FixedPages(vec![
            "first page paragraph text".to_string(),
            "second page paragraph text".to_string(),
        ]);

        let chunks = ChunkExtractor::new()
            .extract(Path::new("report.pdf"), &source)
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].page, 2);
    }

    #[test]
    fn test_paragraphs_are_trimmed() {
        let source = FixedPages(vec![
            "   leading and trailing whitespace stripped   ".to_string(),
        ]);

        let chunks = ChunkExtractor::new()
            .extract(Path::new("doc.pdf"), &source)
            .unwrap();

        assert_eq!(chunks[0].text, "leading and trailing whitespace stripped");
    }

    #[test]
    fn test_section_title_stays_unset() {
        let source = FixedPages(vec!["A perfectly ordinary paragraph.".to_string()]);

        let chunks = ChunkExtractor::new()
            .extract(Path::new("doc.pdf"), &source)
            .unwrap();

        assert!(chunks[0].section_title.is_none());
    }

    #[test]
    fn test_document_name_is_file_name() {
        let source = FixedPages(vec!["Some long enough paragraph text.".to_string()]);
        let path = PathBuf::from("/data/input/South of France - Cities.pdf");

        let chunks = ChunkExtractor::new().extract(&path, &source).unwrap();

        assert_eq!(chunks[0].document, "South of France - Cities.pdf");
    }

    #[test]
    fn test_unreadable_document_propagates_error() {
        let result = ChunkExtractor::new().extract(Path::new("bad.pdf"), &FailingSource);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_pages_yield_no_chunks() {
        let source = FixedPages(vec![String::new(), "  \n  ".to_string()]);
        let chunks = ChunkExtractor::new()
            .extract(Path::new("doc.pdf"), &source)
            .unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_custom_min_chars() {
        let source = FixedPages(vec!["tiny".to_string()]);
        let chunks = ChunkExtractor::with_min_chars(3)
            .extract(Path::new("doc.pdf"), &source)
            .unwrap();
        assert_eq!(chunks.len(), 1);
    }
}
