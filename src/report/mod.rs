//! Output assembly: the ranked report and its serialization contract.
//!
//! The JSON shape (field names, nesting, `null` for a missing section title)
//! is a compatibility contract for downstream consumers and is reproduced
//! exactly by the serde derives below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ranking::ScoredChunk;

/// Run-level metadata attached to every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// File names of the successfully processed input documents
    pub input_documents: Vec<String>,
    /// Raw persona text as provided
    pub persona: String,
    /// Raw job-to-be-done text as provided
    pub job_to_be_done: String,
    /// ISO-8601 timestamp of the run
    pub processing_timestamp: String,
}

impl RunMetadata {
    /// Build metadata for a run, stamping the current local time
    pub fn new(input_documents: Vec<String>, persona: &str, job: &str) -> Self {
        Self {
            input_documents,
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            processing_timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Output-facing projection of one selected chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: usize,
    /// Serialized as `null` when no heading was detected
    pub section_title: Option<String>,
    /// 1-based dense rank: the position in the truncated result list
    pub importance_rank: usize,
    pub refined_text: String,
    /// At most the configured sentence cap, most-similar first
    pub highlighted_sentences: Vec<String>,
}

/// The complete structured output of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
}

impl RunReport {
    /// Assemble the report from the truncated, globally ranked chunk list.
    ///
    /// `ranked` must already be in final order and cut to the result cap; each
    /// entry carries its highlights. Ranks are assigned densely by position,
    /// not by score, so they are always `1..=len` with no gaps or repeats.
    /// An empty `ranked` list is a valid outcome: the metadata block is still
    /// emitted with an empty section list.
    pub fn assemble(metadata: RunMetadata, ranked: Vec<(ScoredChunk, Vec<String>)>) -> Self {
        let extracted_sections = ranked
            .into_iter()
            .enumerate()
            .map(|(idx, (scored, highlights))| ExtractedSection {
                document: scored.chunk.document,
                page_number: scored.chunk.page,
                section_title: scored.chunk.section_title,
                importance_rank: idx + 1,
                refined_text: scored.chunk.text,
                highlighted_sentences: highlights,
            })
            .collect();

        Self {
            metadata,
            extracted_sections,
        }
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Write the report to a file as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_pretty_json()?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
