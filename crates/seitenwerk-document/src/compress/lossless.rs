// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lossless repack — strip descriptive metadata, drop unreachable objects,
// compress streams, and keep whichever structural encoding is smaller.

use lopdf::{Document, Object};
use seitenwerk_core::error::Result;
use tracing::{debug, instrument};

use crate::pdf::codec::{SaveMode, SourceDocument, save_document};

/// /Info entries removed by the repack.
const DESCRIPTIVE_INFO_KEYS: [&[u8]; 6] = [
    b"Title",
    b"Author",
    b"Subject",
    b"Keywords",
    b"Producer",
    b"Creator",
];

/// Repack `data` without touching page content.
///
/// Serialises twice, with and without object streams, and returns the
/// smaller result (object streams on a tie).
#[instrument(skip_all, fields(input_bytes = data.len()))]
pub fn repack_lossless(data: &[u8]) -> Result<Vec<u8>> {
    let mut document = SourceDocument::load(data)?.into_document();

    strip_descriptive_info(&mut document);
    let pruned = document.prune_objects();
    document.compress();

    let with_streams = save_document(&mut document, SaveMode::ObjectStreams)?;
    let plain = save_document(&mut document, SaveMode::Plain)?;
    debug!(
        pruned = pruned.len(),
        object_streams = with_streams.len(),
        plain = plain.len(),
        "lossless candidates"
    );

    Ok(if with_streams.len() <= plain.len() {
        with_streams
    } else {
        plain
    })
}

/// Remove the descriptive /Info fields, dropping /Info when nothing else is
/// left in it.
fn strip_descriptive_info(document: &mut Document) {
    let info_ref = match document.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Dictionary(_)) => None,
        _ => return,
    };

    let now_empty = match info_ref {
        Some(id) => match document.get_object_mut(id).and_then(Object::as_dict_mut) {
            Ok(info) => {
                for key in DESCRIPTIVE_INFO_KEYS {
                    info.remove(key);
                }
                info.is_empty()
            }
            Err(_) => true,
        },
        None => match document.trailer.get_mut(b"Info").and_then(Object::as_dict_mut) {
            Ok(info) => {
                for key in DESCRIPTIVE_INFO_KEYS {
                    info.remove(key);
                }
                info.is_empty()
            }
            Err(_) => true,
        },
    };

    if now_empty {
        document.trailer.remove(b"Info");
    }
}
