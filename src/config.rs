//! TOML-based configuration with defaults.
//!
//! Location: ~/.sectionrank/config.toml. Every value has a default, so a
//! missing config file is created rather than treated as an error; an
//! explicitly requested config path that cannot be read is fatal.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{PipelineError, Result};

/// Complete configuration for a sectionrank run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Ranking and filtering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Result cap: number of top-ranked sections in the report
    pub top_sections: usize,
    /// Highlight cap: sentences surfaced per selected section
    pub top_sentences: usize,
    /// Paragraphs shorter than this many characters are discarded as noise
    pub min_chunk_chars: usize,
    /// Sentence candidates shorter than this many characters are discarded
    pub min_sentence_chars: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_sections: 10,
            top_sentences: 2,
            min_chunk_chars: 20,
            min_sentence_chars: 10,
        }
    }
}

/// Embedding model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// HuggingFace model id, used when no local directory is set
    pub id: String,
    /// Local directory holding config.json, tokenizer.json, model.safetensors
    pub dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: crate::embedding::engine::DEFAULT_MODEL_ID.to_string(),
            dir: None,
        }
    }
}

/// Default input/output locations, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub persona_file: PathBuf,
    pub job_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            persona_file: PathBuf::from("persona.txt"),
            job_file: PathBuf::from("job.txt"),
            output_file: PathBuf::from("output.json"),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one, the
    /// default location is used and a default config is written on first run.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    let config = Config::default();
                    config.save(&path)?;
                    return Ok(config);
                }
                Self::read(&path)
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = toml::from_str(&contents).map_err(|e| {
            PipelineError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create config directory")?;
        }
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, toml_string).context("failed to write config file")?;
        Ok(())
    }

    /// The default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PipelineError::Config("could not determine home directory".into()))?;
        Ok(home.join(".sectionrank").join("config.toml"))
    }
}
