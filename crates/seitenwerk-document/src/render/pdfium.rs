// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pdfium page renderer, bound from the renderer asset directory at runtime.

use image::RgbaImage;
use pdfium_render::prelude::{PdfBitmapFormat, PdfDocument, PdfRenderConfig, Pdfium};
use seitenwerk_core::config::RendererAssets;
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument, warn};

use super::{PageRenderer, RasterFrame, RenderSession, scaled_dimensions};

/// Renders pages through the pdfium native library.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
}

impl PdfiumRenderer {
    /// Bind the platform's pdfium library from `assets.runtime_dir()`.
    #[instrument(skip_all, fields(root = %assets.root().display()))]
    pub fn bind(assets: &RendererAssets) -> Result<Self> {
        for missing in assets.missing() {
            warn!(path = %missing.display(), "renderer asset directory missing");
        }

        let runtime_dir = assets.runtime_dir();
        let library = Pdfium::pdfium_platform_library_name_at_path(runtime_dir.as_path());
        let bindings = Pdfium::bind_to_library(&library).map_err(|err| {
            SeitenwerkError::Renderer(format!(
                "cannot load renderer library {}: {}",
                library.display(),
                err
            ))
        })?;

        info!(library = %library.display(), "pdfium renderer bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageRenderer for PdfiumRenderer {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn with_session(
        &self,
        data: &[u8],
        work: &mut dyn FnMut(&mut dyn RenderSession) -> Result<()>,
    ) -> Result<()> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|err| SeitenwerkError::Renderer(format!("cannot open document: {}", err)))?;
        let mut session = PdfiumSession { document };
        let outcome = work(&mut session);
        debug!(ok = outcome.is_ok(), "render session closed");
        outcome
    }
}

struct PdfiumSession<'a> {
    document: PdfDocument<'a>,
}

impl RenderSession for PdfiumSession<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&mut self, index: usize, scale: f32) -> Result<RasterFrame> {
        let page_index = u16::try_from(index)
            .map_err(|_| SeitenwerkError::Renderer(format!("page index {} out of range", index)))?;
        let page = self.document.pages().get(page_index).map_err(|err| {
            SeitenwerkError::Renderer(format!("cannot open page {}: {}", index + 1, err))
        })?;

        let width_pt = page.width().value;
        let height_pt = page.height().value;
        let (width, height) = scaled_dimensions(width_pt, height_pt, scale);

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_maximum_width(width as i32)
            .set_maximum_height(height as i32)
            .render_form_data(true)
            .render_annotations(true)
            .use_grayscale_rendering(false)
            .set_reverse_byte_order(false)
            .set_format(PdfBitmapFormat::BGRA);

        let bitmap = page.render_with_config(&config).map_err(|err| {
            SeitenwerkError::Renderer(format!("cannot render page {}: {}", index + 1, err))
        })?;

        let pixel_width = bitmap.width().max(0) as u32;
        let pixel_height = bitmap.height().max(0) as u32;
        let image = bgra_to_rgba(&bitmap.as_raw_bytes(), pixel_width, pixel_height)?;

        Ok(RasterFrame {
            image,
            width_pt,
            height_pt,
        })
    }
}

/// Repack a BGRA buffer (rows possibly padded) into an RGBA image.
fn bgra_to_rgba(bytes: &[u8], width: u32, height: u32) -> Result<RgbaImage> {
    let stride = if height == 0 {
        0
    } else {
        bytes.len() / height as usize
    };

    let row_len = width as usize * 4;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let row = bytes
            .get(y * stride..y * stride + row_len)
            .ok_or_else(|| SeitenwerkError::Renderer("bitmap shorter than expected".into()))?;
        for bgra in row.chunks_exact(4) {
            pixels.extend_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
        }
    }

    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| SeitenwerkError::Renderer("bitmap has inconsistent dimensions".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_rows_are_swizzled_and_unpadded() {
        // 1x2 image, rows padded to 8 bytes.
        let bytes = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        let image = bgra_to_rgba(&bytes, 1, 2).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1, 4]);
        assert_eq!(image.get_pixel(0, 1).0, [7, 6, 5, 8]);
    }

    #[test]
    fn short_bitmap_is_an_error() {
        assert!(bgra_to_rgba(&[0, 0, 0], 1, 1).is_err());
    }

    #[test]
    fn missing_library_fails_to_bind() {
        let assets = RendererAssets::new("/nonexistent/seitenwerk-assets");
        let err = PdfiumRenderer::bind(&assets).err().unwrap();
        assert!(matches!(err, SeitenwerkError::Renderer(_)));
    }
}
