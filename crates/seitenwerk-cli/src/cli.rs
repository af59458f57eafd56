// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use seitenwerk_core::types::CompressionLevel;

/// Merge, split, and compress PDF files without them ever leaving this machine.
#[derive(Debug, Parser)]
#[command(name = "seitenwerk", about, version)]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/seitenwerk/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the page count and size of a PDF
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Merge PDFs in the order given
    Merge {
        #[arg(value_name = "FILES", num_args = 2.., required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        output: SingleOutput,
    },

    /// Copy selected pages into a new PDF (ascending page order)
    Extract {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page numbers, e.g. '5,2,9'
        #[arg(long)]
        pages: String,

        #[command(flatten)]
        output: SingleOutput,
    },

    /// Split into one PDF per page range
    SplitRanges {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Ranges, e.g. '1-3,4-10'
        #[arg(long)]
        ranges: String,

        #[command(flatten)]
        output: MultiOutput,
    },

    /// Split into chunks of roughly the given size
    SplitSize {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target size per chunk in MB (default from config)
        #[arg(long, value_name = "MB")]
        target_mb: Option<f64>,

        #[command(flatten)]
        output: MultiOutput,
    },

    /// Reduce the file size of a PDF
    Compress {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Compression level (default from config)
        #[arg(long, value_enum)]
        level: Option<LevelArg>,

        #[command(flatten)]
        output: SingleOutput,
    },
}

/// Where a single result goes.
#[derive(Debug, Clone, Args)]
pub struct SingleOutput {
    /// Output file, or an existing directory to write into
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Filename to use instead of the dated default
    #[arg(long)]
    pub name: Option<String>,
}

/// Where several results go.
#[derive(Debug, Clone, Args)]
pub struct MultiOutput {
    /// Output directory, or the archive path with --zip
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Bundle all parts into one zip archive
    #[arg(long)]
    pub zip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<LevelArg> for CompressionLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => CompressionLevel::Low,
            LevelArg::Medium => CompressionLevel::Medium,
            LevelArg::High => CompressionLevel::High,
        }
    }
}
