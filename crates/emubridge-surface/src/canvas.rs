//! Software pixel surface.

use emubridge_common::{Bitmap, LogicalSize, PhysicalSize, ProtocolError};

use crate::context::DrawContext;

/// An RGBA8 pixel buffer plus the logical size it is displayed at.
///
/// Changing the physical size reallocates (and clears) the buffer but
/// leaves the draw context untouched; callers that depend on a particular
/// transform after a resize must re-establish it.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: PhysicalSize,
    style_size: LogicalSize,
    pixels: Vec<u8>,
    ctx: DrawContext,
}

impl Canvas {
    /// An empty 0x0 canvas.
    pub fn new() -> Self {
        Self {
            size: PhysicalSize::default(),
            style_size: LogicalSize::default(),
            pixels: Vec::new(),
            ctx: DrawContext::new(),
        }
    }

    /// Physical buffer size in pixels.
    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Reallocate the pixel buffer. Contents are cleared to transparent.
    ///
    /// Sizes over [`PhysicalSize::MAX_AREA`] are refused and leave the
    /// canvas unchanged.
    pub fn set_size(&mut self, size: PhysicalSize) -> Result<(), ProtocolError> {
        size.check_limit()?;
        self.size = size;
        self.pixels = vec![0; size.area() as usize * Bitmap::BYTES_PER_PIXEL];
        Ok(())
    }

    /// Size the canvas is displayed at, in device-independent units.
    pub fn style_size(&self) -> LogicalSize {
        self.style_size
    }

    pub fn set_style_size(&mut self, size: LogicalSize) {
        self.style_size = size;
    }

    pub fn context(&self) -> &DrawContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.ctx
    }

    /// Raw RGBA8 rows, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at physical `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = self.offset(x, y);
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Draw `bitmap` with its top-left corner at logical `(x, y)`.
    ///
    /// The destination rectangle goes through the current transform.
    /// Covered pixels are replaced, not blended. With smoothing disabled
    /// every destination pixel takes its nearest source pixel.
    pub fn draw_image(&mut self, bitmap: &Bitmap, x: f64, y: f64) {
        if bitmap.width() == 0 || bitmap.height() == 0 || self.pixels.is_empty() {
            return;
        }

        let t = self.ctx.transform();
        if t.scale_x <= 0.0 || t.scale_y <= 0.0 {
            return;
        }
        let (x0, y0) = t.apply(x, y);
        let (x1, y1) = t.apply(x + bitmap.width() as f64, y + bitmap.height() as f64);
        let smooth = self.ctx.image_smoothing_enabled();

        // A pixel is covered when its centre falls inside [x0, x1) x [y0, y1).
        let (px_start, px_end) = covered_range(x0, x1, self.size.width);
        let (py_start, py_end) = covered_range(y0, y1, self.size.height);

        for py in py_start..py_end {
            let v = (py as f64 + 0.5 - y0) / t.scale_y;
            for px in px_start..px_end {
                let u = (px as f64 + 0.5 - x0) / t.scale_x;
                let rgba = if smooth {
                    sample_bilinear(bitmap, u, v)
                } else {
                    sample_nearest(bitmap, u, v)
                };
                let i = self.offset(px, py);
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.size.width as usize + x as usize) * Bitmap::BYTES_PER_PIXEL
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

fn covered_range(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().min(limit as f64);
    if last <= first {
        return (0, 0);
    }
    (first as u32, last as u32)
}

fn sample_nearest(bitmap: &Bitmap, u: f64, v: f64) -> [u8; 4] {
    let sx = (u.floor().max(0.0) as u32).min(bitmap.width() - 1);
    let sy = (v.floor().max(0.0) as u32).min(bitmap.height() - 1);
    bitmap.pixel(sx, sy).unwrap_or_default()
}

fn sample_bilinear(bitmap: &Bitmap, u: f64, v: f64) -> [u8; 4] {
    let max_x = (bitmap.width() - 1) as f64;
    let max_y = (bitmap.height() - 1) as f64;
    let fx = (u - 0.5).clamp(0.0, max_x);
    let fy = (v - 0.5).clamp(0.0, max_y);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(bitmap.width() - 1);
    let y1 = (y0 + 1).min(bitmap.height() - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = bitmap.pixel(x0, y0).unwrap_or_default();
    let p10 = bitmap.pixel(x1, y0).unwrap_or_default();
    let p01 = bitmap.pixel(x0, y1).unwrap_or_default();
    let p11 = bitmap.pixel(x1, y1).unwrap_or_default();

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
    }
    out
}
