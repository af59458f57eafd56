// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lossy rasterize — render every page, JPEG-encode it, and rebuild the
// document from one full-page image per page.

use seitenwerk_core::error::Result;
use seitenwerk_core::types::RasterizeParams;
use tracing::{debug, info, instrument};

use crate::image::encode_frame;
use crate::pdf::codec::{OutputDocument, SaveMode};
use crate::render::PageRenderer;

/// Rebuild `data` from rendered page images.
///
/// Pages are rendered, encoded and embedded strictly one after another;
/// `progress(done, total)` is called after each page. Each output page has
/// the source page's size in points. Any render or encode failure aborts the
/// whole strategy.
#[instrument(skip_all, fields(renderer = renderer.name(), scale = params.scale))]
pub fn rasterize(
    data: &[u8],
    renderer: &dyn PageRenderer,
    params: RasterizeParams,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<Vec<u8>> {
    let quality = params.jpeg_quality_percent();
    let mut output = OutputDocument::create();

    renderer.with_session(data, &mut |session| {
        let total = session.page_count();
        info!(pages = total, quality, "rasterizing");
        for index in 0..total {
            let encoded = {
                let frame = session.render_page(index, params.scale)?;
                encode_frame(&frame, quality)?
            };
            debug!(
                page = index + 1,
                jpeg_bytes = encoded.jpeg.len(),
                "page rasterized"
            );
            output.add_image_page(
                encoded.jpeg,
                encoded.pixel_width,
                encoded.pixel_height,
                encoded.width_pt,
                encoded.height_pt,
            )?;
            progress(index + 1, total);
        }
        Ok(())
    })?;

    output.save(SaveMode::ObjectStreams)
}
