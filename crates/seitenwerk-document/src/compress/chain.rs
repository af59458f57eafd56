// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compression strategy chain — rasterize where the tier asks for it, fall
// back to the lossless repack, and keep whichever result is smaller.

use std::fmt;

use seitenwerk_core::error::Result;
use seitenwerk_core::types::{
    CompressionLevel, CompressionStats, CompressionStrategy, RasterizeParams,
};
use tracing::{info, instrument, warn};

use super::lossless::repack_lossless;
use super::rasterize::rasterize;
use crate::render::PageRenderer;

/// Whether the requested strategy produced the final bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Fallback,
}

/// Something worth telling the user about a compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionNote {
    /// Rasterizing failed; the lossless result was used instead.
    RasterizeFailed { reason: String },
    /// The tier's result did not shrink the file but the lossless one did.
    LosslessWasSmaller,
    /// Nothing managed to shrink the file.
    LittleEffect,
}

impl fmt::Display for CompressionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RasterizeFailed { reason } => write!(
                f,
                "the selected level failed ({}); used lossless compression instead",
                reason
            ),
            Self::LosslessWasSmaller => write!(
                f,
                "the selected level did not reduce the size, so the smaller lossless result was kept"
            ),
            Self::LittleEffect => write!(f, "this file may not compress much"),
        }
    }
}

/// Final output of [`compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub strategy: CompressionStrategy,
    pub kind: OutcomeKind,
    pub notes: Vec<CompressionNote>,
}

impl CompressionResult {
    /// Sizes before and after, given the input length.
    pub fn stats(&self, original_len: usize) -> CompressionStats {
        CompressionStats {
            before: original_len as u64,
            after: self.bytes.len() as u64,
        }
    }
}

/// Compress `data` at `level`.
///
/// `params` is required for the rasterizing tiers and ignored for `Low`.
/// Rasterize failures are recovered with the lossless repack; an error is
/// only returned when the lossless repack itself fails.
#[instrument(skip_all, fields(level = level.as_str(), input_bytes = data.len()))]
pub fn compress(
    data: &[u8],
    level: CompressionLevel,
    params: Option<RasterizeParams>,
    renderer: &dyn PageRenderer,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<CompressionResult> {
    let mut lossless: Option<Vec<u8>> = None;
    let mut notes = Vec::new();
    let mut kind = OutcomeKind::Success;

    let (mut bytes, mut strategy) = match params.filter(|_| level.rasterizes()) {
        Some(params) => match rasterize(data, renderer, params, progress) {
            Ok(bytes) => (bytes, CompressionStrategy::Rasterize),
            Err(err) => {
                warn!(%err, "rasterize failed, falling back to lossless");
                kind = OutcomeKind::Fallback;
                notes.push(CompressionNote::RasterizeFailed {
                    reason: err.to_string(),
                });
                (
                    lossless_cached(&mut lossless, data)?.clone(),
                    CompressionStrategy::Lossless,
                )
            }
        },
        None => (
            lossless_cached(&mut lossless, data)?.clone(),
            CompressionStrategy::Lossless,
        ),
    };

    if level.rasterizes() && bytes.len() >= data.len() {
        let candidate = lossless_cached(&mut lossless, data)?;
        if candidate.len() < bytes.len() {
            bytes = candidate.clone();
            strategy = CompressionStrategy::Lossless;
            kind = OutcomeKind::Fallback;
            notes.push(CompressionNote::LosslessWasSmaller);
        } else {
            notes.push(CompressionNote::LittleEffect);
        }
    }

    info!(
        output_bytes = bytes.len(),
        ?strategy,
        ?kind,
        notes = notes.len(),
        "compression finished"
    );
    Ok(CompressionResult {
        bytes,
        strategy,
        kind,
        notes,
    })
}

fn lossless_cached<'a>(slot: &'a mut Option<Vec<u8>>, data: &[u8]) -> Result<&'a Vec<u8>> {
    let bytes = match slot.take() {
        Some(bytes) => bytes,
        None => repack_lossless(data)?,
    };
    let cached: &Vec<u8> = slot.insert(bytes);
    Ok(cached)
}
