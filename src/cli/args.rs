//! Command-line argument parsing for sectionrank.
//!
//! Every flag is optional; unset values fall back to the configuration file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::PipelineConfig;

/// sectionrank - rank document passages against a persona and job-to-be-done
#[derive(Parser, Debug)]
#[command(name = "sectionrank")]
#[command(version)]
#[command(
    about = "Rank PDF passages by relevance to a persona and job-to-be-done",
    long_about = None
)]
pub struct Args {
    /// Directory containing the source PDF documents
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Persona description file
    #[arg(short, long, value_name = "FILE")]
    pub persona: Option<PathBuf>,

    /// Job-to-be-done description file
    #[arg(short, long, value_name = "FILE")]
    pub job: Option<PathBuf>,

    /// Output report path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of top-ranked sections to keep
    #[arg(long, value_name = "N")]
    pub top_sections: Option<usize>,

    /// Number of highlighted sentences per section
    #[arg(long, value_name = "N")]
    pub top_sentences: Option<usize>,

    /// Local directory holding the embedding model files
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// HuggingFace model id to load when no local directory is given
    #[arg(long, value_name = "ID")]
    pub model_id: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress and summary output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Fully resolved options for one run: config file values with CLI overrides
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub persona_file: PathBuf,
    pub job_file: PathBuf,
    pub output_file: PathBuf,
    pub model_id: String,
    pub model_dir: Option<PathBuf>,
    pub pipeline: PipelineConfig,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Merge these arguments over a loaded configuration
    pub fn resolve(&self, config: Config) -> RunOptions {
        let mut pipeline = PipelineConfig::from(config.ranking);
        if let Some(n) = self.top_sections {
            pipeline.top_sections = n;
        }
        if let Some(n) = self.top_sentences {
            pipeline.top_sentences = n;
        }

        RunOptions {
            input_dir: self.input_dir.clone().unwrap_or(config.paths.input_dir),
            persona_file: self.persona.clone().unwrap_or(config.paths.persona_file),
            job_file: self.job.clone().unwrap_or(config.paths.job_file),
            output_file: self.output.clone().unwrap_or(config.paths.output_file),
            model_id: self.model_id.clone().unwrap_or(config.model.id),
            model_dir: self.model_dir.clone().or(config.model.dir),
            pipeline,
        }
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// Check if progress bars should be shown
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "sectionrank=error",
            Verbosity::Normal => "sectionrank=info",
            Verbosity::Verbose => "sectionrank=debug",
            Verbosity::VeryVerbose => "sectionrank=trace",
        }
    }
}
