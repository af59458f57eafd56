// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input file helpers: PDF detection, size formatting, large-file hints.

use crate::types::PDF_MIME_TYPE;

/// Inputs at or above this size get a "this may take a while" hint.
pub const LARGE_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// Whether a selected file should be treated as a PDF.
///
/// Accepts either an explicit `application/pdf` content type or a `.pdf`
/// suffix (case-insensitive).
pub fn is_pdf_input(file_name: &str, content_type: Option<&str>) -> bool {
    if content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_MIME_TYPE)) {
        return true;
    }
    file_name.to_ascii_lowercase().ends_with(".pdf")
}

pub fn is_large_input(size_bytes: u64) -> bool {
    size_bytes >= LARGE_INPUT_BYTES
}

/// Human-readable byte count: `"512 B"`, `"1.5 KB"`, `"2.25 MB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    let precision = match unit_index {
        0 => 0,
        1 => 1,
        _ => 2,
    };
    format!("{:.*} {}", precision, value, UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_by_content_type_or_suffix() {
        assert!(is_pdf_input("scan", Some("application/pdf")));
        assert!(is_pdf_input("Report.PDF", None));
        assert!(is_pdf_input("report.pdf", Some("application/octet-stream")));
        assert!(!is_pdf_input("photo.jpg", Some("image/jpeg")));
    }

    #[test]
    fn formats_bytes_per_unit() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn large_input_threshold() {
        assert!(!is_large_input(LARGE_INPUT_BYTES - 1));
        assert!(is_large_input(LARGE_INPUT_BYTES));
    }
}
