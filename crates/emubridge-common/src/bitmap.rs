use crate::errors::ProtocolError;
use crate::types::PhysicalSize;

/// An RGBA8 image handed over by the engine for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Bytes per pixel (R, G, B, A).
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap `pixels`, which must hold exactly `width * height` RGBA pixels.
    /// Dimensions over [`PhysicalSize::MAX_AREA`] are rejected outright.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ProtocolError> {
        let size = PhysicalSize::new(width, height);
        size.check_limit()?;
        let expected = size.area() as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(ProtocolError::BitmapSize {
                width,
                height,
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A bitmap filled with one colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        let p = &self.pixels[i..i + Self::BYTES_PER_PIXEL];
        Some([p[0], p[1], p[2], p[3]])
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
