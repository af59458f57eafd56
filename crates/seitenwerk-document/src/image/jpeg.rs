// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG encoding of rendered page frames, using the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::trace;

use crate::render::RasterFrame;

/// A page image ready to be embedded with `/DCTDecode`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPage {
    pub jpeg: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// Encode a frame as baseline JPEG at `quality` (1-100).
///
/// JPEG has no alpha channel, so transparent pixels are composited onto
/// white, the colour of an empty page.
pub fn encode_frame(frame: &RasterFrame, quality: u8) -> Result<EncodedPage> {
    let rgb = flatten_on_white(&frame.image);

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|err| SeitenwerkError::Renderer(format!("JPEG encoding failed: {}", err)))?;

    trace!(
        width = rgb.width(),
        height = rgb.height(),
        quality,
        jpeg_bytes = buffer.len(),
        "frame encoded"
    );

    Ok(EncodedPage {
        jpeg: buffer,
        pixel_width: rgb.width(),
        pixel_height: rgb.height(),
        width_pt: frame.width_pt,
        height_pt: frame.height_pt,
    })
}

fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let blend = |channel: u8| -> u8 {
            let alpha = u32::from(a);
            ((u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
