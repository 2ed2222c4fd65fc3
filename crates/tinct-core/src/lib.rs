//! Tinct Core — domain layer for interactive HSV thresholding.
//!
//! This crate contains the color conversions, histogram math,
//! circular-interval arithmetic, range expansion, and the shared threshold
//! state. No UI or render-surface dependencies.

pub mod color;
pub mod expand;
pub mod histogram;
pub mod interval;
pub mod raster;
pub mod thresholds;

// Re-exports for convenience.
pub use expand::{expand, expand_set};
pub use histogram::{HistogramConfig, HsvHistograms};
pub use interval::Domain;
pub use raster::{PixelRaster, RasterError};
pub use thresholds::{
    Channel, SegmentationThresholds, ThresholdRange, ThresholdSet, ThresholdStore,
};
