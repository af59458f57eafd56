// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Range validator — checks user-declared page ranges against a page count.

use std::fmt;

use seitenwerk_core::error::SeitenwerkError;
use seitenwerk_core::types::PdfRange;

/// The first problem found in a set of ranges.
///
/// `index` fields are 1-based positions in the list the user entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeIssue {
    /// The page count is not known yet.
    Loading,
    /// No ranges were given.
    Empty,
    /// A start or end page is below 1.
    BelowOne { index: usize },
    /// A range starts after it ends.
    StartAfterEnd { index: usize },
    /// A range ends past the last page.
    BeyondEnd { index: usize, page_count: u32 },
    /// Two ranges share at least one page.
    Overlap { first: PdfRange, second: PdfRange },
}

impl fmt::Display for RangeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "page information is still loading"),
            Self::Empty => write!(f, "add at least one page range"),
            Self::BelowOne { index } => write!(f, "range {} must start at page 1 or later", index),
            Self::StartAfterEnd { index } => {
                write!(f, "range {} must not start after it ends", index)
            }
            Self::BeyondEnd { index, page_count } => write!(
                f,
                "range {} ends past the last page ({})",
                index, page_count
            ),
            Self::Overlap { first, second } => {
                write!(f, "ranges {} and {} overlap", first, second)
            }
        }
    }
}

impl std::error::Error for RangeIssue {}

impl From<RangeIssue> for SeitenwerkError {
    fn from(issue: RangeIssue) -> Self {
        SeitenwerkError::Validation(issue.to_string())
    }
}

/// Validate `ranges` against `page_count` (`None` while the document is still
/// being loaded).
///
/// Ranges may touch (`1-3`, `4-10`) but must not overlap. Order in the input
/// does not matter for overlap detection; it only decides which range an
/// error message points at.
pub fn validate_ranges(page_count: Option<u32>, ranges: &[PdfRange]) -> Result<(), RangeIssue> {
    let page_count = match page_count {
        Some(count) if count > 0 => count,
        _ => return Err(RangeIssue::Loading),
    };
    if ranges.is_empty() {
        return Err(RangeIssue::Empty);
    }

    for (position, range) in ranges.iter().enumerate() {
        let index = position + 1;
        if range.start < 1 || range.end < 1 {
            return Err(RangeIssue::BelowOne { index });
        }
        if range.start > range.end {
            return Err(RangeIssue::StartAfterEnd { index });
        }
        if range.end > i64::from(page_count) {
            return Err(RangeIssue::BeyondEnd { index, page_count });
        }
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| (range.start, range.end));
    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.start <= prev.end {
            return Err(RangeIssue::Overlap {
                first: prev,
                second: next,
            });
        }
    }

    Ok(())
}

/// Total number of pages the ranges select, saturating at `usize::MAX`.
pub fn selected_page_total(ranges: &[PdfRange]) -> usize {
    ranges
        .iter()
        .fold(0usize, |total, range| total.saturating_add(range.len()))
}
