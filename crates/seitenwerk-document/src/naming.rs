// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output filenames — date-stamped defaults and user override normalisation.

use chrono::{Local, NaiveDate};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn merged_name(date: NaiveDate) -> String {
    format!("merged_{}.pdf", date_stamp(date))
}

/// Name of part `index` (0-based) out of `total`, e.g. `split_2of5_2026-01-31.pdf`.
pub fn split_part_name(index: usize, total: usize, date: NaiveDate) -> String {
    format!("split_{}of{}_{}.pdf", index + 1, total, date_stamp(date))
}

pub fn selected_pages_name(date: NaiveDate) -> String {
    format!("split_selected_{}.pdf", date_stamp(date))
}

pub fn archive_name(date: NaiveDate) -> String {
    format!("split_{}.zip", date_stamp(date))
}

pub fn compressed_name(input_name: &str, date: NaiveDate) -> String {
    format!(
        "compressed_{}_{}.pdf",
        compressed_base_name(input_name),
        date_stamp(date)
    )
}

/// The input name without a trailing `.pdf` (any case); `file` if that
/// leaves nothing.
pub fn compressed_base_name(input_name: &str) -> &str {
    let base = strip_pdf_suffix(input_name).unwrap_or(input_name);
    if base.is_empty() { "file" } else { base }
}

/// Apply a user-supplied filename: trimmed, `fallback` when blank, and
/// `.pdf` appended unless already present.
pub fn normalize_pdf_filename(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    let base = if trimmed.is_empty() { fallback } else { trimmed };
    if strip_pdf_suffix(base).is_some() {
        base.to_string()
    } else {
        format!("{}.pdf", base)
    }
}

fn strip_pdf_suffix(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(4)?;
    let (stem, suffix) = (name.get(..split)?, name.get(split..)?);
    suffix.eq_ignore_ascii_case(".pdf").then_some(stem)
}
