// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations: read inputs, drive the pipeline, write results.

use std::fs;
use std::path::{Path, PathBuf};

use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::files::{format_bytes, is_large_input, is_pdf_input};
use seitenwerk_core::human_errors::Operation;
use seitenwerk_core::types::{parse_page_list, parse_ranges};
use seitenwerk_document::Pipeline;
use seitenwerk_document::pdf::ranges::selected_page_total;
use tracing::{info, warn};

use crate::cli::Commands;
use crate::output::{write_many, write_single};

impl Commands {
    /// The operation reported when this command fails.
    pub fn operation(&self) -> Operation {
        match self {
            Commands::Info { .. } => Operation::Inspect,
            Commands::Merge { .. } => Operation::Merge,
            Commands::Extract { .. } => Operation::Extract,
            Commands::SplitRanges { .. } | Commands::SplitSize { .. } => Operation::Split,
            Commands::Compress { .. } => Operation::Compress,
        }
    }
}

/// A PDF read from disk.
struct InputFile {
    name: String,
    bytes: Vec<u8>,
}

/// Run one subcommand to completion.
pub fn run(pipeline: &Pipeline, command: Commands) -> Result<()> {
    match command {
        Commands::Info { file } => {
            let input = read_pdf(&file)?;
            let pages = pipeline.page_count(&input.bytes)?;
            println!(
                "{}: {} pages, {}",
                input.name,
                pages,
                format_bytes(input.bytes.len() as u64)
            );
        }

        Commands::Merge { files, output } => {
            let inputs = files
                .iter()
                .map(|file| read_pdf(file))
                .collect::<Result<Vec<_>>>()?;
            let sources: Vec<&[u8]> = inputs.iter().map(|input| input.bytes.as_slice()).collect();
            let merged = pipeline.merge(&sources)?;
            report_single(write_single(merged, &output)?);
        }

        Commands::Extract {
            file,
            pages,
            output,
        } => {
            let input = read_pdf(&file)?;
            let page_numbers = parse_page_list(&pages)?;
            let extracted = pipeline.extract(&input.bytes, &page_numbers)?;
            report_single(write_single(extracted, &output)?);
        }

        Commands::SplitRanges {
            file,
            ranges,
            output,
        } => {
            let input = read_pdf(&file)?;
            let ranges = parse_ranges(&ranges)?;
            let parts = pipeline.split_by_ranges(&input.bytes, &ranges)?;
            eprintln!(
                "{} ranges, {} pages selected",
                ranges.len(),
                selected_page_total(&ranges)
            );
            report_many(write_many(parts, &output)?);
        }

        Commands::SplitSize {
            file,
            target_mb,
            output,
        } => {
            let input = read_pdf(&file)?;
            let parts = pipeline.split_by_size(&input.bytes, target_mb)?;
            report_many(write_many(parts, &output)?);
        }

        Commands::Compress {
            file,
            level,
            output,
        } => {
            let input = read_pdf(&file)?;
            let level = level
                .map(Into::into)
                .unwrap_or(pipeline.config().default_level);

            let compressed = pipeline.compress(
                &input.bytes,
                &input.name,
                level,
                &mut |done, total| eprintln!("processing: {}/{}", done, total),
            )?;

            for note in &compressed.notes {
                eprintln!("note: {}", note);
            }
            let stats = compressed.stats;
            let path = write_single(compressed.output, &output)?;
            println!(
                "{} -> {} ({}% smaller)",
                format_bytes(stats.before),
                format_bytes(stats.after),
                stats.percent_saved()
            );
            report_single(path);
        }
    }
    Ok(())
}

fn read_pdf(path: &Path) -> Result<InputFile> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_pdf_input(&name, None) {
        return Err(SeitenwerkError::NotPdf(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    if is_large_input(bytes.len() as u64) {
        warn!(
            file = %name,
            size = %format_bytes(bytes.len() as u64),
            "large file, this may take a while"
        );
    }
    info!(file = %name, bytes = bytes.len(), "input read");
    Ok(InputFile { name, bytes })
}

fn report_single(path: PathBuf) {
    println!("wrote {}", path.display());
}

fn report_many(paths: Vec<PathBuf>) {
    for path in paths {
        report_single(path);
    }
}
