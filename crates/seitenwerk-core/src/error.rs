// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Seitenwerk.

use thiserror::Error;

/// Top-level error type for all Seitenwerk operations.
#[derive(Debug, Error)]
pub enum SeitenwerkError {
    // -- Input errors --
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("invalid page selection: {0}")]
    Validation(String),

    #[error("not a PDF file: {0}")]
    NotPdf(String),

    // -- Transformation errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("failed to serialise PDF: {0}")]
    Serialize(String),

    #[error("page renderer failed: {0}")]
    Renderer(String),

    // -- Pipeline --
    #[error("another document operation is already running")]
    Busy,

    // -- Packaging / persistence --
    #[error("archive error: {0}")]
    Archive(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeitenwerkError>;
