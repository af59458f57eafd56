// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF merging — concatenate the pages of several documents into one.

use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument};

use super::codec::{OutputDocument, SaveMode, SourceDocument};

/// Merge `sources` into one document: every page of the first source in its
/// original order, then every page of the second, and so on.
///
/// A source that fails to parse aborts the merge; no partial output is
/// produced.
#[instrument(skip_all, fields(sources = sources.len()))]
pub fn merge(sources: &[&[u8]]) -> Result<Vec<u8>> {
    info!(sources = sources.len(), "merging PDFs");

    let mut output = OutputDocument::create();
    for (index, bytes) in sources.iter().enumerate() {
        let source = SourceDocument::load(bytes).map_err(|err| match err {
            SeitenwerkError::Parse(detail) => {
                SeitenwerkError::Parse(format!("source #{}: {}", index + 1, detail))
            }
            other => other,
        })?;
        let indices: Vec<usize> = (0..source.page_count()).collect();
        output.append_pages(&source, &indices)?;
    }

    let bytes = output.save(SaveMode::default())?;
    debug!(pages = output.page_count(), output_bytes = bytes.len(), "merge complete");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encrypted_pdf, page_widths, sample_pdf};

    #[test]
    fn pages_follow_source_order() {
        let a = sample_pdf(1);
        let b = sample_pdf(2);
        let c = sample_pdf(3);
        let merged = merge(&[b.as_slice(), a.as_slice(), c.as_slice()]).unwrap();
        assert_eq!(
            page_widths(&merged),
            vec![101.0, 102.0, 101.0, 101.0, 102.0, 103.0]
        );
    }

    #[test]
    fn page_count_is_sum_of_sources() {
        let sources = [sample_pdf(4), sample_pdf(1), sample_pdf(2)];
        let refs: Vec<&[u8]> = sources.iter().map(Vec::as_slice).collect();
        let merged = merge(&refs).unwrap();
        assert_eq!(page_widths(&merged).len(), 7);
    }

    #[test]
    fn unparsable_source_aborts() {
        let good = sample_pdf(1);
        let err = merge(&[good.as_slice(), b"not a pdf".as_slice()]).unwrap_err();
        assert!(matches!(err, SeitenwerkError::Parse(msg) if msg.contains("#2")));
    }

    #[test]
    fn password_protected_source_aborts_instead_of_being_skipped() {
        let locked = encrypted_pdf(3, "secret");
        let plain = sample_pdf(1);
        let err = merge(&[locked.as_slice(), plain.as_slice()]).unwrap_err();
        assert!(matches!(err, SeitenwerkError::Parse(msg) if msg.contains("#1")));
    }

    #[test]
    fn empty_password_source_contributes_every_page() {
        let open = encrypted_pdf(3, "");
        let plain = sample_pdf(1);
        let merged = merge(&[open.as_slice(), plain.as_slice()]).unwrap();
        assert_eq!(page_widths(&merged), vec![101.0, 102.0, 103.0, 101.0]);
    }
}
