// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline facade — the one entry point front ends call.
//
// Every operation loads its own source documents, runs one engine, and names
// the results. A single-flight guard makes a second operation started while
// one is running fail with `Busy` instead of interleaving.

use std::rc::Rc;

use seitenwerk_core::config::AppConfig;
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::{
    CompressionLevel, CompressionStats, CompressionStrategy, NamedOutput, PdfRange,
};
use tracing::{info, instrument};

use crate::compress::{self, CompressionNote, OutcomeKind};
use crate::guard::SingleFlight;
use crate::naming;
use crate::pdf::{self, SourceDocument};
use crate::render::{self, PageRenderer};

/// Minimum number of sources a merge accepts.
pub const MIN_MERGE_SOURCES: usize = 2;

/// A compressed document plus what happened on the way.
#[derive(Debug, Clone)]
pub struct CompressedOutput {
    pub output: NamedOutput,
    pub strategy: CompressionStrategy,
    pub kind: OutcomeKind,
    pub notes: Vec<CompressionNote>,
    pub stats: CompressionStats,
}

/// Owns the configuration, the page renderer, and the single-flight guard.
pub struct Pipeline {
    config: AppConfig,
    renderer: Rc<dyn PageRenderer>,
    flight: SingleFlight,
}

impl Pipeline {
    pub fn new(config: AppConfig, renderer: Rc<dyn PageRenderer>) -> Self {
        Self {
            config,
            renderer,
            flight: SingleFlight::new(),
        }
    }

    /// Build a pipeline with the best renderer this build offers.
    pub fn from_config(config: AppConfig) -> Self {
        let renderer = render::default_renderer(&config);
        Self::new(config, renderer)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn renderer(&self) -> &dyn PageRenderer {
        self.renderer.as_ref()
    }

    /// Whether an operation is currently running.
    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in `data`.
    pub fn page_count(&self, data: &[u8]) -> Result<usize> {
        let _permit = self.flight.acquire()?;
        Ok(SourceDocument::load(data)?.page_count())
    }

    // -- Merge ----------------------------------------------------------------

    /// Merge `sources` in order into one document.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn merge(&self, sources: &[&[u8]]) -> Result<NamedOutput> {
        let _permit = self.flight.acquire()?;
        if sources.len() < MIN_MERGE_SOURCES {
            return Err(SeitenwerkError::Validation(format!(
                "merging needs at least {} PDF files",
                MIN_MERGE_SOURCES
            )));
        }

        let bytes = pdf::merge(sources)?;
        info!(output_bytes = bytes.len(), "merge finished");
        Ok(NamedOutput::new(naming::merged_name(naming::today()), bytes))
    }

    // -- Split ----------------------------------------------------------------

    /// Extract the selected 1-based pages into one document.
    #[instrument(skip_all, fields(selected = page_numbers.len()))]
    pub fn extract(&self, data: &[u8], page_numbers: &[i64]) -> Result<NamedOutput> {
        let _permit = self.flight.acquire()?;
        let source = SourceDocument::load(data)?;
        if pdf::extract::selected_indices(source.page_count(), page_numbers).is_empty() {
            return Err(SeitenwerkError::Validation(
                "select at least one page to extract".to_string(),
            ));
        }

        let bytes = pdf::extract_pages(&source, page_numbers)?;
        Ok(NamedOutput::new(
            naming::selected_pages_name(naming::today()),
            bytes,
        ))
    }

    /// One document per range. Ranges are validated against the loaded
    /// document right before splitting.
    #[instrument(skip_all, fields(ranges = ranges.len()))]
    pub fn split_by_ranges(&self, data: &[u8], ranges: &[PdfRange]) -> Result<Vec<NamedOutput>> {
        let _permit = self.flight.acquire()?;
        let source = SourceDocument::load(data)?;
        let page_count = u32::try_from(source.page_count()).ok();
        pdf::validate_ranges(page_count, ranges)?;

        let parts = pdf::split_by_ranges(&source, ranges)?;
        Ok(name_parts(parts))
    }

    /// Contiguous chunks of roughly `target_mb` each (the configured default
    /// when `None`). The estimate assumes pages are of similar size.
    #[instrument(skip_all, fields(input_bytes = data.len()))]
    pub fn split_by_size(&self, data: &[u8], target_mb: Option<f64>) -> Result<Vec<NamedOutput>> {
        let _permit = self.flight.acquire()?;
        let target_mb = target_mb.unwrap_or(self.config.default_target_mb);
        let source = SourceDocument::load(data)?;

        let pages_per_chunk =
            pdf::estimate_pages_per_chunk(data.len() as u64, source.page_count(), target_mb);
        info!(target_mb, pages_per_chunk, "size split planned");

        let parts = pdf::split_by_page_chunks(&source, pages_per_chunk)?;
        Ok(name_parts(parts))
    }

    // -- Compress -------------------------------------------------------------

    /// Compress `data` at `level`; `input_name` seeds the output filename.
    ///
    /// `progress(done, total)` is called after each rasterized page.
    #[instrument(skip_all, fields(level = level.as_str(), input_bytes = data.len()))]
    pub fn compress(
        &self,
        data: &[u8],
        input_name: &str,
        level: CompressionLevel,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<CompressedOutput> {
        let _permit = self.flight.acquire()?;
        let params = self.config.rasterize_params(level);
        let result = compress::compress(data, level, params, self.renderer.as_ref(), progress)?;

        let stats = result.stats(data.len());
        info!(
            before = stats.before,
            after = stats.after,
            percent_saved = stats.percent_saved(),
            "compress finished"
        );
        Ok(CompressedOutput {
            output: NamedOutput::new(
                naming::compressed_name(input_name, naming::today()),
                result.bytes,
            ),
            strategy: result.strategy,
            kind: result.kind,
            notes: result.notes,
            stats,
        })
    }
}

fn name_parts(parts: Vec<Vec<u8>>) -> Vec<NamedOutput> {
    let date = naming::today();
    let total = parts.len();
    parts
        .into_iter()
        .enumerate()
        .map(|(index, bytes)| {
            NamedOutput::new(naming::split_part_name(index, total, date), bytes)
        })
        .collect()
}
