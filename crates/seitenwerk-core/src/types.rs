// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Seitenwerk document pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeitenwerkError};

/// MIME type of every document the pipeline produces.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A contiguous, 1-based inclusive page span.
///
/// Fields are signed so that whatever the user typed (including `0` or a
/// negative number) survives until the range validator can reject it with a
/// proper message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PdfRange {
    pub start: i64,
    pub end: i64,
}

impl PdfRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of pages covered, or 0 for an inverted range. Spans wider than
    /// `usize` saturate.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        self.end
            .checked_sub(self.start)
            .and_then(|span| span.checked_add(1))
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a single range such as `"4-10"`, `"4 - 10"` or `"7"`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (start, end) = match text.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (text, text),
        };
        let start = parse_page_number(start, text)?;
        let end = parse_page_number(end, text)?;
        Ok(Self { start, end })
    }
}

impl FromStr for PdfRange {
    type Err = SeitenwerkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PdfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse a comma-separated list of ranges, e.g. `"1-3, 4-10"`.
///
/// Empty segments are ignored; order is preserved.
pub fn parse_ranges(text: &str) -> Result<Vec<PdfRange>> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PdfRange::parse)
        .collect()
}

/// Parse a comma-separated list of individual page numbers, e.g. `"5,2,2,9"`.
pub fn parse_page_list(text: &str) -> Result<Vec<i64>> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_page_number(segment, segment))
        .collect()
}

fn parse_page_number(value: &str, context: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| {
        SeitenwerkError::Validation(format!(
            "'{}' is not a valid page number (in '{}')",
            value, context
        ))
    })
}

/// User-selectable compression tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Lossless repack only; page content is untouched.
    Low,
    /// Rasterize at a generous scale and quality.
    Medium,
    /// Rasterize at a reduced scale and quality.
    High,
}

impl CompressionLevel {
    /// Whether this tier runs the rasterize strategy at all.
    pub fn rasterizes(&self) -> bool {
        !matches!(self, Self::Low)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = SeitenwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(SeitenwerkError::Validation(format!(
                "unknown compression level '{}' (expected low, medium, or high)",
                other
            ))),
        }
    }
}

/// Parameters for the rasterize strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterizeParams {
    /// Render scale relative to the page's size in points (1.0 = 72 DPI).
    pub scale: f32,
    /// JPEG quality factor in `0.0..=1.0`.
    pub jpeg_quality: f32,
}

impl RasterizeParams {
    /// Quality mapped onto the 1–100 scale the JPEG encoder expects.
    pub fn jpeg_quality_percent(&self) -> u8 {
        let quality = if self.jpeg_quality.is_finite() {
            self.jpeg_quality.clamp(0.0, 1.0)
        } else {
            0.75
        };
        ((quality * 100.0).round() as u8).max(1)
    }
}

/// A finished output buffer plus its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOutput {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl NamedOutput {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Which compression strategy produced the final bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionStrategy {
    Lossless,
    Rasterize,
}

/// Before/after sizes of a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub before: u64,
    pub after: u64,
}

impl CompressionStats {
    /// Percentage saved, rounded; negative when the output grew.
    pub fn percent_saved(&self) -> i64 {
        if self.before == 0 {
            return 0;
        }
        let ratio = self.after as f64 / self.before as f64;
        ((1.0 - ratio) * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_span_and_single_page() {
        assert_eq!(PdfRange::parse("4-10").unwrap(), PdfRange::new(4, 10));
        assert_eq!(PdfRange::parse(" 4 - 10 ").unwrap(), PdfRange::new(4, 10));
        assert_eq!(PdfRange::parse("7").unwrap(), PdfRange::new(7, 7));
    }

    #[test]
    fn rejects_non_numeric_range() {
        let err = PdfRange::parse("a-3").unwrap_err();
        assert!(matches!(err, SeitenwerkError::Validation(_)));
    }

    #[test]
    fn parses_range_list_in_order() {
        let ranges = parse_ranges("4-10, 1-3,").unwrap();
        assert_eq!(ranges, vec![PdfRange::new(4, 10), PdfRange::new(1, 3)]);
    }

    #[test]
    fn parses_page_list_keeping_duplicates() {
        assert_eq!(parse_page_list("5,2,2,9").unwrap(), vec![5, 2, 2, 9]);
    }

    #[test]
    fn inverted_range_has_no_pages() {
        assert_eq!(PdfRange::new(5, 3).len(), 0);
        assert_eq!(PdfRange::new(3, 5).len(), 3);
        assert_eq!(PdfRange::new(i64::MAX, i64::MIN).len(), 0);
    }

    #[test]
    fn extreme_range_length_saturates() {
        assert_eq!(PdfRange::new(i64::MIN, i64::MAX).len(), usize::MAX);
        assert_eq!(PdfRange::new(0, i64::MAX).len(), usize::MAX);
    }

    #[test]
    fn quality_maps_to_percent() {
        let params = RasterizeParams {
            scale: 1.0,
            jpeg_quality: 0.6,
        };
        assert_eq!(params.jpeg_quality_percent(), 60);
        let floor = RasterizeParams {
            scale: 1.0,
            jpeg_quality: 0.0,
        };
        assert_eq!(floor.jpeg_quality_percent(), 1);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<CompressionLevel>().unwrap(), CompressionLevel::High);
        assert!("extreme".parse::<CompressionLevel>().is_err());
        assert!(!CompressionLevel::Low.rasterizes());
    }

    #[test]
    fn percent_saved_rounds() {
        let stats = CompressionStats {
            before: 1000,
            after: 754,
        };
        assert_eq!(stats.percent_saved(), 25);
        let grew = CompressionStats {
            before: 100,
            after: 110,
        };
        assert_eq!(grew.percent_saved(), -10);
    }
}
