//! Query composition from persona and job-to-be-done inputs.
//!
//! The query is the verbatim concatenation of both texts and is built once per
//! run; all chunk and sentence scoring happens against this single string.

use std::fs;
use std::path::Path;

use crate::errors::{PipelineError, Result};

/// The ranking query, derived from the persona and job descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    persona: String,
    job: String,
}

impl Query {
    /// Build a query from raw persona and job texts.
    ///
    /// Both inputs must be non-empty after trimming; the stored texts are kept
    /// verbatim (no case or punctuation normalization - the embedding model is
    /// responsible for matching semantics).
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Result<Self> {
        let persona = persona.into();
        let job = job.into();

        if persona.trim().is_empty() {
            return Err(PipelineError::Config(
                "persona description is empty".to_string(),
            ));
        }
        if job.trim().is_empty() {
            return Err(PipelineError::Config(
                "job-to-be-done description is empty".to_string(),
            ));
        }

        Ok(Self { persona, job })
    }

    /// Load the query from a persona file and a job file.
    ///
    /// A missing or unreadable file is fatal: the run has no meaningful query
    /// without both inputs.
    pub fn from_files(persona_path: &Path, job_path: &Path) -> Result<Self> {
        let persona = read_input(persona_path)?;
        let job = read_input(job_path)?;
        Self::new(persona, job)
    }

    /// The single query string scored against every chunk and sentence
    pub fn text(&self) -> String {
        format!("{} {}", self.persona, self.job)
    }

    /// Raw persona text as provided
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Raw job-to-be-done text as provided
    pub fn job(&self) -> &str {
        &self.job
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PipelineError::QueryInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
