//! CLI module for sectionrank.
//!
//! Handles command-line argument parsing and the merge of arguments over the
//! configuration file.

pub mod args;

pub use args::{Args, RunOptions, Verbosity};
