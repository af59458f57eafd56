// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page extraction — copy an explicit selection of pages into one new PDF.

use std::collections::BTreeSet;

use seitenwerk_core::error::Result;
use tracing::{debug, instrument};

use super::codec::{OutputDocument, SaveMode, SourceDocument};

/// 0-based indices for a 1-based page selection: out-of-range numbers are
/// dropped, duplicates collapse, and the result is ascending.
pub fn selected_indices(page_count: usize, page_numbers: &[i64]) -> Vec<usize> {
    page_numbers
        .iter()
        .filter_map(|&number| usize::try_from(number.checked_sub(1)?).ok())
        .filter(|&index| index < page_count)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build one PDF holding the selected pages in ascending source order,
/// whatever order the numbers were given in.
///
/// An empty selection yields a valid zero-page document; rejecting that is
/// the caller's job.
#[instrument(skip_all, fields(requested = page_numbers.len()))]
pub fn extract_pages(source: &SourceDocument, page_numbers: &[i64]) -> Result<Vec<u8>> {
    let indices = selected_indices(source.page_count(), page_numbers);

    let mut output = OutputDocument::create();
    output.append_pages(source, &indices)?;
    let bytes = output.save(SaveMode::default())?;

    debug!(pages = indices.len(), output_bytes = bytes.len(), "pages extracted");
    Ok(bytes)
}
