//! Pixel raster input for histogram computation.
//!
//! The viewer hands the core a rectangular RGBA byte buffer captured from
//! its rendered surface; nothing here fetches or decodes images.

use thiserror::Error;

/// Errors constructing a raster from raw bytes.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Rectangular RGBA pixel buffer, row-major, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRaster {
    pub width: u32,
    pub height: u32,
    /// Pixels in row-major order, `[r, g, b, a]` each.
    pub pixels: Vec<[u8; 4]>,
}

impl PixelRaster {
    /// Build a raster from a row-major RGBA byte buffer, 4 bytes per pixel.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(RasterError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice(bytes).to_vec(),
        })
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Nearest-neighbor subsample so the longer side is at most
    /// `max_side` pixels, keeping aspect ratio. Rasters already within
    /// the limit are returned unchanged; the result never shrinks below
    /// 2x2 so histograms keep a little content to bin.
    pub fn downsample_to_max_side(&self, max_side: u32) -> PixelRaster {
        let longest = self.width.max(self.height);
        if longest <= max_side || longest == 0 {
            return self.clone();
        }

        let scale = max_side as f32 / longest as f32;
        let out_w = ((self.width as f32 * scale).floor() as u32).max(2);
        let out_h = ((self.height as f32 * scale).floor() as u32).max(2);

        let mut pixels = Vec::with_capacity(out_w as usize * out_h as usize);
        for y in 0..out_h {
            let src_y = (y as u64 * self.height as u64 / out_h as u64) as u32;
            for x in 0..out_w {
                let src_x = (x as u64 * self.width as u64 / out_w as u64) as u32;
                pixels.push(self.pixels[src_y as usize * self.width as usize + src_x as usize]);
            }
        }

        PixelRaster {
            width: out_w,
            height: out_h,
            pixels,
        }
    }
}
