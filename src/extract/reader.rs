//! Per-page text access behind a narrow trait.
//!
//! Text/layout extraction is an external collaborator: the pipeline only
//! requires an ordered list of per-page raw texts for a document path.

use anyhow::Result;
use std::path::Path;

/// Source of per-page raw text for a document
pub trait PageSource {
    /// Return the raw text of every page, in page order (index 0 = page 1).
    ///
    /// An error means the document could not be opened or parsed; callers
    /// treat that as recoverable and skip the document.
    fn page_texts(&self, path: &Path) -> Result<Vec<String>>;
}

/// Production page source backed by the pdf-extract crate
#[derive(Debug, Default)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl PageSource for PdfReader {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>> {
        let pages = pdf_extract::extract_text_by_pages(path)
            .map_err(|e| anyhow::anyhow!("pdf text extraction failed: {e}"))?;
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_reader_rejects_missing_file() {
        let reader = PdfReader::new();
        let result = reader.page_texts(Path::new("/nonexistent/missing.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_pdf_reader_rejects_non_pdf_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, "this is not a pdf").unwrap();

        let reader = PdfReader::new();
        assert!(reader.page_texts(&path).is_err());
    }
}
