// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub renderers for builds and tests without a native page renderer.
//
// `BlankRenderer` produces white frames sized from each page's MediaBox.
// `UnavailableRenderer` refuses every request with `Renderer`.

use image::{Rgba, RgbaImage};
use seitenwerk_core::error::{Result, SeitenwerkError};

use super::{PageRenderer, RasterFrame, RenderSession, scaled_dimensions};
use crate::pdf::codec::SourceDocument;

/// Renders every page as an all-white frame of the right size.
pub struct BlankRenderer;

struct BlankSession {
    page_sizes: Vec<(f32, f32)>,
}

impl PageRenderer for BlankRenderer {
    fn name(&self) -> &str {
        "blank"
    }

    fn with_session(
        &self,
        data: &[u8],
        work: &mut dyn FnMut(&mut dyn RenderSession) -> Result<()>,
    ) -> Result<()> {
        let source = SourceDocument::load(data)
            .map_err(|err| SeitenwerkError::Renderer(format!("cannot open document: {}", err)))?;
        let page_sizes = (0..source.page_count())
            .map(|index| source.page_size(index))
            .collect::<Result<Vec<_>>>()?;
        work(&mut BlankSession { page_sizes })
    }
}

impl RenderSession for BlankSession {
    fn page_count(&self) -> usize {
        self.page_sizes.len()
    }

    fn render_page(&mut self, index: usize, scale: f32) -> Result<RasterFrame> {
        let &(width_pt, height_pt) = self.page_sizes.get(index).ok_or_else(|| {
            SeitenwerkError::Renderer(format!("page index {} out of range", index))
        })?;
        let (width, height) = scaled_dimensions(width_pt, height_pt, scale);
        Ok(RasterFrame {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            width_pt,
            height_pt,
        })
    }
}

/// A renderer that is known not to work, with the reason why.
pub struct UnavailableRenderer {
    reason: String,
}

impl UnavailableRenderer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PageRenderer for UnavailableRenderer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn with_session(
        &self,
        _data: &[u8],
        _work: &mut dyn FnMut(&mut dyn RenderSession) -> Result<()>,
    ) -> Result<()> {
        tracing::warn!(reason = %self.reason, "render requested from unavailable renderer");
        Err(SeitenwerkError::Renderer(self.reason.clone()))
    }
}
