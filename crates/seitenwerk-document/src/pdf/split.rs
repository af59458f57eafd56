// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF splitting — one output per page range, or contiguous chunks sized
// towards a byte target.

use std::ops::Range;

use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::PdfRange;
use tracing::{debug, info, instrument};

use super::codec::{OutputDocument, SaveMode, SourceDocument};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// -- Range split --------------------------------------------------------------

/// One PDF per range, in the order the ranges were given.
///
/// Ranges are expected to have passed [`super::ranges::validate_ranges`];
/// any range that is inverted or leaves the document is a `Validation`
/// error, checked before any page is copied.
#[instrument(skip_all, fields(pages = source.page_count(), ranges = ranges.len()))]
pub fn split_by_ranges(source: &SourceDocument, ranges: &[PdfRange]) -> Result<Vec<Vec<u8>>> {
    let spans = ranges
        .iter()
        .map(|range| range_indices(range, source.page_count()))
        .collect::<Result<Vec<_>>>()?;

    spans
        .into_iter()
        .map(|span| write_pages(source, &span.collect::<Vec<_>>()))
        .collect()
}

/// 0-based page span of `range`, bounded by `page_count`.
fn range_indices(range: &PdfRange, page_count: usize) -> Result<Range<usize>> {
    let invalid = || {
        SeitenwerkError::Validation(format!(
            "range {} is not a valid page span for a {}-page document",
            range, page_count
        ))
    };
    if range.start < 1 || range.end < range.start {
        return Err(invalid());
    }
    let start = usize::try_from(range.start - 1).map_err(|_| invalid())?;
    let end = usize::try_from(range.end).map_err(|_| invalid())?;
    if end > page_count {
        return Err(invalid());
    }
    Ok(start..end)
}

// -- Size-targeted split ------------------------------------------------------

/// Pages per chunk so that each chunk lands near `target_mb`, assuming every
/// page weighs the same.
///
/// Any non-positive input (or a non-finite target) yields `page_count`, i.e.
/// a single chunk.
pub fn estimate_pages_per_chunk(file_size_bytes: u64, page_count: usize, target_mb: f64) -> usize {
    let target_bytes = target_mb * BYTES_PER_MB;
    if file_size_bytes == 0 || page_count == 0 || !target_bytes.is_finite() || target_bytes <= 0.0
    {
        return page_count;
    }

    let estimate = (page_count as f64 * target_bytes / file_size_bytes as f64).ceil();
    (estimate as usize).clamp(1, page_count)
}

/// Contiguous 0-based page spans of at most `pages_per_chunk` pages covering
/// `0..page_count`. A chunk size of 0 is treated as 1.
pub fn chunk_bounds(page_count: usize, pages_per_chunk: usize) -> Vec<Range<usize>> {
    let step = pages_per_chunk.max(1);
    (0..page_count)
        .step_by(step)
        .map(|start| start..(start + step).min(page_count))
        .collect()
}

/// Partition the document into consecutive chunks of `pages_per_chunk` pages
/// (the last one may be shorter).
#[instrument(skip_all, fields(pages = source.page_count(), pages_per_chunk))]
pub fn split_by_page_chunks(
    source: &SourceDocument,
    pages_per_chunk: usize,
) -> Result<Vec<Vec<u8>>> {
    let chunks = chunk_bounds(source.page_count(), pages_per_chunk);
    info!(chunks = chunks.len(), "splitting into chunks");

    chunks
        .into_iter()
        .map(|chunk| write_pages(source, &chunk.collect::<Vec<_>>()))
        .collect()
}

fn write_pages(source: &SourceDocument, indices: &[usize]) -> Result<Vec<u8>> {
    let mut output = OutputDocument::create();
    output.append_pages(source, indices)?;
    let bytes = output.save(SaveMode::default())?;
    debug!(pages = indices.len(), output_bytes = bytes.len(), "part written");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page_widths, sample_pdf};

    #[test]
    fn ranges_produce_one_output_each_in_order() {
        let source = SourceDocument::load(&sample_pdf(10)).unwrap();
        let parts =
            split_by_ranges(&source, &[PdfRange::new(1, 3), PdfRange::new(4, 10)]).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(page_widths(&parts[0]), vec![101.0, 102.0, 103.0]);
        assert_eq!(page_widths(&parts[1]).len(), 7);
        assert_eq!(page_widths(&parts[1])[0], 104.0);
    }

    #[test]
    fn ranges_keep_input_order() {
        let source = SourceDocument::load(&sample_pdf(6)).unwrap();
        let parts =
            split_by_ranges(&source, &[PdfRange::new(5, 6), PdfRange::new(1, 1)]).unwrap();
        assert_eq!(page_widths(&parts[0]), vec![105.0, 106.0]);
        assert_eq!(page_widths(&parts[1]), vec![101.0]);
    }

    #[test]
    fn out_of_bounds_range_fails() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        assert!(split_by_ranges(&source, &[PdfRange::new(2, 4)]).is_err());
        assert!(split_by_ranges(&source, &[PdfRange::new(0, 1)]).is_err());
    }

    #[test]
    fn huge_range_end_is_rejected_without_allocating() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        for end in [i64::MAX, 1 << 40] {
            let err = split_by_ranges(&source, &[PdfRange::new(1, end)]).unwrap_err();
            assert!(matches!(err, SeitenwerkError::Validation(_)));
        }
    }

    #[test]
    fn bad_range_fails_before_any_part_is_written() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        let err = split_by_ranges(&source, &[PdfRange::new(1, 2), PdfRange::new(3, 9)])
            .unwrap_err();
        assert!(matches!(err, SeitenwerkError::Validation(msg) if msg.contains("3-9")));
    }

    #[test]
    fn estimate_follows_average_page_size() {
        // 10 MiB over 100 pages, 2 MiB target -> 20 pages per chunk.
        assert_eq!(estimate_pages_per_chunk(10 * 1024 * 1024, 100, 2.0), 20);
        // Rounds up.
        assert_eq!(estimate_pages_per_chunk(3 * 1024 * 1024, 10, 1.0), 4);
    }

    #[test]
    fn estimate_is_clamped() {
        assert_eq!(estimate_pages_per_chunk(1024, 10, 50.0), 10);
        assert_eq!(estimate_pages_per_chunk(u64::MAX, 10, 0.001), 1);
    }

    #[test]
    fn degenerate_estimate_inputs_yield_page_count() {
        assert_eq!(estimate_pages_per_chunk(0, 10, 5.0), 10);
        assert_eq!(estimate_pages_per_chunk(1000, 10, 0.0), 10);
        assert_eq!(estimate_pages_per_chunk(1000, 10, -1.0), 10);
        assert_eq!(estimate_pages_per_chunk(1000, 10, f64::NAN), 10);
        assert_eq!(estimate_pages_per_chunk(1000, 0, 5.0), 0);
    }

    #[test]
    fn chunks_cover_every_page() {
        for (pages, per_chunk) in [(10, 3), (10, 10), (10, 1), (7, 20), (0, 4)] {
            let chunks = chunk_bounds(pages, per_chunk);
            let total: usize = chunks.iter().map(|chunk| chunk.len()).sum();
            assert_eq!(total, pages);
            assert_eq!(chunks.len(), pages.div_ceil(per_chunk));
        }
    }

    #[test]
    fn zero_chunk_size_is_floored_to_one() {
        assert_eq!(chunk_bounds(3, 0), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn chunk_split_keeps_page_order() {
        let source = SourceDocument::load(&sample_pdf(5)).unwrap();
        let parts = split_by_page_chunks(&source, 2).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(page_widths(&parts[0]), vec![101.0, 102.0]);
        assert_eq!(page_widths(&parts[1]), vec![103.0, 104.0]);
        assert_eq!(page_widths(&parts[2]), vec![105.0]);
    }
}
