//! Canvas and the forward-mapping affine rasterizer

use std::path::Path;
use super::math::ScreenPoint;
use super::types::{Color, Texture};
use crate::error::{BatchError, RenderError};

/// RGBA pixel buffer that faces are painted onto.
/// A fresh canvas is allocated per render call and handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    /// Fully transparent canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::from_bytes([
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ])
        } else {
            Color::TRANSPARENT
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Write a pixel with both coordinates clamped onto the canvas.
    /// Callers guarantee the canvas is not empty.
    #[inline]
    fn set_pixel_clamped(&mut self, x: i32, y: i32, max_x: i32, max_y: i32, bytes: [u8; 4]) {
        let cx = x.clamp(0, max_x) as usize;
        let cy = y.clamp(0, max_y) as usize;
        let idx = (cy * self.width + cx) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&bytes);
    }

    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.get_pixel(x, y).a == 0
    }

    /// Number of pixels with non-zero alpha
    pub fn opaque_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Composite `src` over this canvas with its top-left corner at (x, y).
    /// Parts of `src` that fall outside are dropped.
    pub fn draw_over(&mut self, src: &Canvas, x: i64, y: i64) {
        for sy in 0..src.height {
            let dy = y + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + sx as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let s_idx = (sy * src.width + sx) * 4;
                if src.pixels[s_idx + 3] == 0 {
                    continue;
                }
                let d_idx = (dy as usize * self.width + dx as usize) * 4;
                let mut dst = [0u8; 4];
                dst.copy_from_slice(&self.pixels[d_idx..d_idx + 4]);
                let mut s = [0u8; 4];
                s.copy_from_slice(&src.pixels[s_idx..s_idx + 4]);
                self.pixels[d_idx..d_idx + 4].copy_from_slice(&blend_over(dst, s));
            }
        }
    }

    /// Composite a same-size canvas over this one
    pub fn blend_over(&mut self, src: &Canvas) {
        self.draw_over(src, 0, 0);
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width as u32, self.height as u32))
    }

    /// Save the canvas, format picked from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BatchError> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }
}

/// Source-over blend of one RGBA pixel onto another
fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = dst[3] as u32;
    let inv = 255 - sa;
    let dst_weight = da * inv / 255;
    let out_a = sa + dst_weight;
    if out_a == 0 {
        return [0; 4];
    }

    let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * dst_weight) / out_a).min(255) as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        out_a.min(255) as u8,
    ]
}

/// Paint the whole of `texture` onto the parallelogram spanned by
/// `dest[0]` -> `dest[1]` (texture x) and `dest[0]` -> `dest[2]` (texture y).
///
/// Forward nearest-neighbor mapping: every texel step is pushed to the
/// canvas, and each sample is also written one pixel below and one to the
/// right to plug the holes that rounding leaves between rows. All writes are
/// clamped to the canvas. A zero-length edge draws nothing.
///
/// An inverse (destination-to-source) scan would avoid the redundant writes,
/// but it moves pixels, and tile sheets produced so far rely on this placement.
pub fn draw_affine(
    canvas: &mut Canvas,
    texture: &Texture,
    dest: &[ScreenPoint],
) -> Result<(), RenderError> {
    let (o, a, b) = match dest {
        [o, a, b] => (*o, *a, *b),
        _ => {
            return Err(RenderError::InvalidArgument(format!(
                "affine draw needs exactly 3 destination points, got {}",
                dest.len()
            )))
        }
    };

    let line_length = a.x - o.x; // positive = moves right
    let line_count = b.y - o.y; // positive = moves down
    if line_length == 0 || line_count == 0 {
        tracing::trace!(?o, ?a, ?b, "skipping degenerate affine draw");
        return Ok(());
    }
    if texture.width == 0 || texture.height == 0 || canvas.width == 0 || canvas.height == 0 {
        return Ok(());
    }

    let x_inc = line_length.signum();
    let y_inc = line_count.signum();

    let slope = (a.y - o.y) as f32 / line_length as f32;
    // Infinite for a vertical O->B edge, which makes the skew adjustment 0
    let skew = (b.y - o.y) as f32 / (b.x - o.x) as f32;
    let intercept = o.y as f32 - slope * o.x as f32;

    let tex_w = texture.width as i32;
    let tex_h = texture.height as i32;
    let max_x = canvas.width as i32 - 1;
    let max_y = canvas.height as i32 - 1;

    for row in 0..line_count.abs() {
        let y_offset = row * y_inc;
        let skew_adj = (y_offset as f32 / skew).floor() as i32;
        let src_y = (y_offset * tex_h / line_count) as usize;
        let src_row = &texture.pixels[src_y * texture.width..(src_y + 1) * texture.width];

        for col in 0..line_length.abs() {
            let x_offset = col * x_inc;
            let x = o.x + x_offset;
            let dest_x = x + skew_adj;
            let dest_y = (slope * x as f32 + intercept + y_offset as f32).round() as i32;

            let src_x = (x_offset * tex_w / line_length) as usize;
            let bytes = src_row[src_x].to_bytes();

            canvas.set_pixel_clamped(dest_x, dest_y, max_x, max_y, bytes);
            canvas.set_pixel_clamped(dest_x, dest_y + 1, max_x, max_y, bytes);
            canvas.set_pixel_clamped(dest_x + 1, dest_y, max_x, max_y, bytes);
        }
    }

    Ok(())
}
