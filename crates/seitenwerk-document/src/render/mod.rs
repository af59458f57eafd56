// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page renderer abstraction.
//
// The rasterize compression strategy needs pixels for every page. Rendering is
// an external capability, so it sits behind the `PageRenderer` trait: the
// pdfium backend (feature "pdfium") draws real pages, while the stub
// renderers keep headless builds and tests working.

use std::rc::Rc;

use image::RgbaImage;
use seitenwerk_core::config::AppConfig;
use seitenwerk_core::error::Result;

pub mod stub;

#[cfg(feature = "pdfium")]
pub mod pdfium;

pub use stub::{BlankRenderer, UnavailableRenderer};

/// One rendered page.
pub struct RasterFrame {
    /// RGBA pixels at the requested scale.
    pub image: RgbaImage,
    /// Page width in PDF points (before scaling).
    pub width_pt: f32,
    /// Page height in PDF points (before scaling).
    pub height_pt: f32,
}

impl RasterFrame {
    pub fn pixel_width(&self) -> u32 {
        self.image.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.image.height()
    }
}

/// A document opened on the renderer side.
///
/// Only lives for the duration of [`PageRenderer::with_session`]; the backend
/// releases it when the callback returns, whether it succeeded or not.
pub trait RenderSession {
    fn page_count(&self) -> usize;

    /// Render the page at a 0-based index. `scale` 1.0 is one pixel per point.
    fn render_page(&mut self, index: usize, scale: f32) -> Result<RasterFrame>;
}

/// Something that can turn PDF pages into pixels.
///
/// Renderers are used from one thread at a time; native backends are not
/// required to be `Send`.
pub trait PageRenderer {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Open `data` and run `work` against the open document.
    fn with_session(
        &self,
        data: &[u8],
        work: &mut dyn FnMut(&mut dyn RenderSession) -> Result<()>,
    ) -> Result<()>;
}

/// Pixel dimensions of a page rendered at `scale`, never below 1x1.
pub fn scaled_dimensions(width_pt: f32, height_pt: f32, scale: f32) -> (u32, u32) {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let to_pixels = |points: f32| ((points * scale).round() as u32).max(1);
    (to_pixels(width_pt), to_pixels(height_pt))
}

/// The renderer this build can offer.
///
/// With the "pdfium" feature the native library is bound from the configured
/// asset root; if that fails, or the feature is off, an
/// [`UnavailableRenderer`] carrying the reason is returned so the rasterize
/// strategy fails cleanly and compression falls back to lossless.
pub fn default_renderer(config: &AppConfig) -> Rc<dyn PageRenderer> {
    #[cfg(feature = "pdfium")]
    {
        match pdfium::PdfiumRenderer::bind(&config.assets()) {
            Ok(renderer) => Rc::new(renderer),
            Err(err) => {
                tracing::warn!(%err, "pdfium renderer unavailable");
                Rc::new(UnavailableRenderer::new(err.to_string()))
            }
        }
    }
    #[cfg(not(feature = "pdfium"))]
    {
        tracing::debug!(
            assets = %config.renderer_assets.display(),
            "built without a page renderer"
        );
        Rc::new(UnavailableRenderer::new(
            "this build has no page renderer (enable the \"pdfium\" feature)",
        ))
    }
}
