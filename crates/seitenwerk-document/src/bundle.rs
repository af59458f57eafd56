// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zip bundling of multi-output results.

use std::io::{Cursor, Write};

use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::NamedOutput;
use tracing::{debug, instrument};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Pack `outputs` into one zip archive, one deflated entry per output, in
/// order.
#[instrument(skip_all, fields(entries = outputs.len()))]
pub fn bundle_zip(outputs: &[NamedOutput]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for output in outputs {
        zip.start_file(output.filename.as_str(), deflated)
            .map_err(|err| {
                SeitenwerkError::Archive(format!("cannot add {}: {}", output.filename, err))
            })?;
        zip.write_all(&output.bytes)?;
    }

    let archive = zip
        .finish()
        .map_err(|err| SeitenwerkError::Archive(format!("cannot finish archive: {}", err)))?
        .into_inner();
    debug!(archive_bytes = archive.len(), "archive written");
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn entries_keep_order_and_content() {
        let outputs = vec![
            NamedOutput::new("split_1of2.pdf", b"%PDF-first".to_vec()),
            NamedOutput::new("split_2of2.pdf", b"%PDF-second".to_vec()),
        ];
        let archive = bundle_zip(&outputs).unwrap();

        let mut reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(reader.len(), 2);
        for (index, expected) in outputs.iter().enumerate() {
            let mut entry = reader.by_index(index).unwrap();
            assert_eq!(entry.name(), expected.filename);
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            assert_eq!(content, expected.bytes);
        }
    }

    #[test]
    fn empty_bundle_is_a_valid_archive() {
        let archive = bundle_zip(&[]).unwrap();
        let reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
