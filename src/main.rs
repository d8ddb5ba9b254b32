//! sectionrank - Main CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use sectionrank::{
    cli::{Args, RunOptions, Verbosity},
    config::Config,
    embedding::EmbeddingEngine,
    Pipeline, Query,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();

    init_logging(verbosity);

    let config = Config::load(args.config.as_deref())?;
    let options = args.resolve(config);

    let started = Instant::now();
    let report = run(&options, verbosity)?;

    if verbosity.show_progress() {
        print_summary(&report, &options, started.elapsed());
    }

    Ok(())
}

fn run(options: &RunOptions, verbosity: Verbosity) -> Result<sectionrank::RunReport> {
    // Fatal before any document is touched: no query, no run
    let query = Query::from_files(&options.persona_file, &options.job_file)?;

    let documents = discover_documents(&options.input_dir)?;
    tracing::info!(count = documents.len(), "discovered input documents");

    // Fatal before any document is touched: no model, no degraded mode
    let engine = load_engine(options, verbosity)?;

    let pipeline = Pipeline::with_config(engine, options.pipeline.clone());
    let report = pipeline.run(&documents, &query)?;

    report.write_to(&options.output_file)?;

    Ok(report)
}

/// Enumerate the input directory for PDF documents, sorted by file name so
/// runs are reproducible regardless of directory-iteration order
fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to read input directory {}", input_dir.display()))?;

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    documents.sort();

    Ok(documents)
}

fn load_engine(options: &RunOptions, verbosity: Verbosity) -> Result<EmbeddingEngine> {
    let spinner = if verbosity.show_progress() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        pb.set_message("loading embedding model...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let engine = match &options.model_dir {
        Some(dir) => EmbeddingEngine::from_dir(dir),
        None => EmbeddingEngine::from_hub(&options.model_id),
    }
    .context("embedding model unavailable")?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(engine)
}

fn print_summary(
    report: &sectionrank::RunReport,
    options: &RunOptions,
    elapsed: Duration,
) {
    println!();
    println!("{}", "Ranking complete".green().bold());
    println!(
        "  {} document(s) processed, {} section(s) selected in {:.1?}",
        report.metadata.input_documents.len(),
        report.extracted_sections.len(),
        elapsed
    );
    for section in &report.extracted_sections {
        println!(
            "  {:>2}. {} (page {})",
            section.importance_rank,
            section.document.cyan(),
            section.page_number
        );
    }
    println!("  report written to {}", options.output_file.display().to_string().bold());
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
