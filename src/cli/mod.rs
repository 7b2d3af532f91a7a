// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sifter command-line interface.
//!
//! Two subcommands: `search` runs a query against a corpus exactly as the
//! browser would, and `inspect` summarizes what a corpus turns into once
//! indexed. Both accept either a corpus file or a site root, in which case the
//! configured corpus locations are tried in order like the browser does.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "sifter",
    about = "Zero-round-trip search for static documentation sites",
    version
)]
pub struct Cli {
    /// JSON configuration file (same keys as the browser options)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sifter::loader=trace`
    #[arg(long, global = true, env = "SIFTER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Simple)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Level and message
    Simple,
    /// Timestamps, targets and source locations
    Detailed,
    /// One JSON object per event
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a corpus and display highlighted results
    Search {
        /// Corpus JSON file, or a site root containing one
        corpus: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results (overrides the config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Maximum visible excerpt characters (overrides the config)
        #[arg(long)]
        excerpt_length: Option<usize>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show index statistics for a corpus
    Inspect {
        /// Corpus JSON file, or a site root containing one
        corpus: PathBuf,

        /// Number of most frequent terms to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
}
