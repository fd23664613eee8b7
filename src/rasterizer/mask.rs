//! Polygon masks
//!
//! Cuts a texture down to the inside (or outside) of a polygon given in pixel
//! coordinates. Used to split one crenellation texture into merlon and gap
//! pieces and to trim skirt panels to trapezoids.

use super::math::ScreenPoint;
use super::types::{Color, Texture};
use crate::error::RenderError;

/// Per-pixel coverage, 0 = outside, 255 = inside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>,
}

impl AlphaMask {
    /// Fill `polygon` into a `width` x `height` mask.
    ///
    /// No antialiasing: a pixel is inside when its centre is, using the
    /// even-odd rule. Vertices sit on pixel corners, so the rectangle
    /// (0,0)-(w,0)-(w,h)-(0,h) covers exactly w x h pixels.
    pub fn from_polygon(width: usize, height: usize, polygon: &[ScreenPoint]) -> Self {
        let mut alpha = vec![0u8; width * height];
        let mut crossings: Vec<f32> = Vec::with_capacity(polygon.len());

        for y in 0..height {
            let cy = y as f32 + 0.5;
            crossings.clear();

            for (i, p0) in polygon.iter().enumerate() {
                let p1 = polygon[(i + 1) % polygon.len()];
                let (y0, y1) = (p0.y as f32, p1.y as f32);
                // Half-open so a vertex shared by two edges is counted once
                if (y0 <= cy && cy < y1) || (y1 <= cy && cy < y0) {
                    let t = (cy - y0) / (y1 - y0);
                    crossings.push(p0.x as f32 + t * (p1.x - p0.x) as f32);
                }
            }

            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                // Pixels whose centre x + 0.5 lies in [span[0], span[1])
                let start = (span[0] - 0.5).ceil().max(0.0) as usize;
                let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(width);
                for x in start..end {
                    alpha[y * width + x] = 255;
                }
            }
        }

        Self { width, height, alpha }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.width + x]
    }
}

/// Keep the pixels of `texture` covered by `mask` (or not covered, with
/// `inverse`). Output alpha is the source alpha scaled by the coverage;
/// everything resolving to zero coverage is fully transparent.
pub fn mask_with(texture: &Texture, mask: &AlphaMask, inverse: bool) -> Result<Texture, RenderError> {
    if texture.width != mask.width || texture.height != mask.height {
        return Err(RenderError::UnsupportedConfiguration(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width, mask.height, texture.width, texture.height
        )));
    }

    let pixels = texture
        .pixels
        .iter()
        .zip(&mask.alpha)
        .map(|(p, &m)| {
            let coverage = if inverse { 255 - m } else { m };
            if coverage == 0 {
                Color::TRANSPARENT
            } else {
                p.alpha((p.a as u32 * coverage as u32 / 255) as u8)
            }
        })
        .collect();

    Ok(Texture::from_pixels(texture.width, texture.height, pixels))
}

/// Mask `texture` with `polygon` rasterized at the texture's own size
pub fn mask_polygon(texture: &Texture, polygon: &[ScreenPoint], inverse: bool) -> Result<Texture, RenderError> {
    let mask = AlphaMask::from_polygon(texture.width, texture.height, polygon);
    mask_with(texture, &mask, inverse)
}
