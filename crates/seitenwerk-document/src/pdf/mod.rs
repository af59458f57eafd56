// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — codec adapter plus the merge, extract and split engines.

pub mod codec;
pub mod extract;
pub mod merge;
pub mod ranges;
pub mod split;

pub use codec::{CopiedPage, OutputDocument, SaveMode, SourceDocument, save_document};
pub use extract::extract_pages;
pub use merge::merge;
pub use ranges::{RangeIssue, validate_ranges};
pub use split::{chunk_bounds, estimate_pages_per_chunk, split_by_page_chunks, split_by_ranges};
