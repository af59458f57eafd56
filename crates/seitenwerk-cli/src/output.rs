// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Writing results to disk — single files, directories of parts, or one zip.

use std::fs;
use std::path::{Path, PathBuf};

use seitenwerk_core::error::Result;
use seitenwerk_core::types::NamedOutput;
use seitenwerk_document::bundle_zip;
use seitenwerk_document::naming;
use tracing::{debug, info};

use crate::cli::{MultiOutput, SingleOutput};

/// Write one result. `--name` replaces the default filename; `--output`
/// names either the target file or an existing directory to write into.
pub fn write_single(output: NamedOutput, target: &SingleOutput) -> Result<PathBuf> {
    let filename = match target.name.as_deref() {
        Some(name) => naming::normalize_pdf_filename(name, &output.filename),
        None => output.filename.clone(),
    };
    let path = match target.output.as_deref() {
        Some(dir) if dir.is_dir() => dir.join(&filename),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(&filename),
    };

    write_file(&path, &output.bytes)?;
    Ok(path)
}

/// Write several results: each part into the `--output` directory (created
/// if needed), or all of them into one archive with `--zip`.
pub fn write_many(outputs: Vec<NamedOutput>, target: &MultiOutput) -> Result<Vec<PathBuf>> {
    if target.zip {
        let archive = bundle_zip(&outputs)?;
        let archive_name = naming::archive_name(naming::today());
        let path = match target.output.as_deref() {
            Some(dir) if dir.is_dir() => dir.join(&archive_name),
            Some(file) => file.to_path_buf(),
            None => PathBuf::from(&archive_name),
        };
        write_file(&path, &archive)?;
        info!(path = %path.display(), parts = outputs.len(), "archive written");
        return Ok(vec![path]);
    }

    let dir = target
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;

    outputs
        .into_iter()
        .map(|output| {
            let path = dir.join(&output.filename);
            write_file(&path, &output.bytes)?;
            Ok(path)
        })
        .collect()
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}
