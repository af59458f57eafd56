// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compression engine — lossless repack, lossy rasterize, and the strategy
// chain that picks between them.

pub mod chain;
pub mod lossless;
pub mod rasterize;

pub use chain::{CompressionNote, CompressionResult, OutcomeKind, compress};
pub use lossless::repack_lossless;
pub use rasterize::rasterize;
