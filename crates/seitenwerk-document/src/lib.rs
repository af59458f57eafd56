// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// seitenwerk-document — The document transformation pipeline.
//
// Provides the PDF codec adapter and the merge, extract, split, and compress
// engines, the page renderer abstraction used by lossy compression, output
// naming, zip bundling, and the `Pipeline` facade that front ends drive.

pub mod bundle;
pub mod compress;
pub mod guard;
pub mod image;
pub mod naming;
pub mod pdf;
pub mod pipeline;
pub mod render;

#[cfg(test)]
mod test_support;

// Re-export the primary entry points so callers can use `seitenwerk_document::Pipeline` etc.
pub use bundle::bundle_zip;
pub use compress::{CompressionNote, CompressionResult, OutcomeKind};
pub use pdf::{RangeIssue, SaveMode, SourceDocument, validate_ranges};
pub use pipeline::{CompressedOutput, Pipeline};
pub use render::{BlankRenderer, PageRenderer, UnavailableRenderer, default_renderer};

#[cfg(feature = "pdfium")]
pub use render::pdfium::PdfiumRenderer;
