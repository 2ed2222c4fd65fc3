//! Render-surface abstraction for pixel capture.
//!
//! The viewer that actually renders the image implements [`SampleSurface`];
//! the thresholding layer only ever pulls pixels through this trait and
//! never learns about canvases, textures, or tiles.

use glam::Vec2;
use thiserror::Error;
use tinct_core::PixelRaster;

/// Errors reading pixels back from the host surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Pixel read-back is blocked, e.g. a cross-origin tainted source.
    #[error("surface pixels are not readable: {0}")]
    Unreadable(String),

    /// A read landed outside the surface's backing store.
    #[error("pixel ({x}, {y}) outside {width}x{height} surface")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Screen-space placement of a surface or control, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Whether a point lies inside, edges inclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.x
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.y
    }
}

/// A host surface that renders the image and can hand pixels back.
pub trait SampleSurface {
    /// Placement of the rendered surface in screen coordinates.
    fn screen_bounds(&self) -> Bounds;

    /// Backing-store size in device pixels. May differ from the screen
    /// bounds under device-pixel scaling.
    fn pixel_size(&self) -> (u32, u32);

    /// Read a single RGBA pixel from the backing store.
    fn read_pixel(&self, x: u32, y: u32) -> Result<[u8; 4], SurfaceError>;

    /// Capture the full rendered region as an RGBA raster.
    fn capture(&self) -> Result<PixelRaster, SurfaceError>;
}
