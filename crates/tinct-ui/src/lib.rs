//! Tinct UI — framework-free interaction layer for HSV thresholding.
//!
//! Defines the [`SampleSurface`] trait that abstracts the host's rendered
//! image surface, the dual-handle range sliders bound to the histogram
//! tracks, the single-shot color pick sampler, and the debounced histogram
//! refresh loop. A real windowing or DOM layer binds to these types from
//! outside; nothing here talks to a toolkit directly.

pub mod refresh;
pub mod sampler;
pub mod slider;
pub mod surface;

// Re-exports for convenience.
pub use refresh::{PlotSink, RefreshScheduler, refresh_plots};
pub use sampler::{Sampler, SamplerConfig, SamplerHost, SliderPanel};
pub use slider::{Handle, PointerEvent, RangeSlider, SliderError, SliderLayout};
pub use surface::{Bounds, SampleSurface, SurfaceError};
