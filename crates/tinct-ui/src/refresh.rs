//! Debounced histogram refresh.
//!
//! Viewport-changing events (pan, zoom, tile loads) call
//! [`RefreshScheduler::request`]; the host's tick loop calls
//! [`RefreshScheduler::fire`] and, when it fires, runs [`refresh_plots`].
//! A fire during an active slider drag is dropped so a replot never
//! resets visual state mid-gesture.

use std::time::{Duration, Instant};

use tinct_core::{Channel, HistogramConfig, HsvHistograms, histogram};

use crate::surface::{SampleSurface, SurfaceError};

/// Quiet period after the last viewport event before recomputation runs.
pub const REFRESH_QUIET: Duration = Duration::from_millis(150);

/// Captured rasters are subsampled so their longer side stays within this
/// before histogramming, keeping refreshes snappy on large viewports.
pub const CAPTURE_MAX_SIDE: u32 = 1200;

/// Receives normalized histogram bins for display.
///
/// The renderer's only contract is drawing an ordered sequence of values
/// in `[0, 1]`; axes and styling are its own business.
pub trait PlotSink {
    fn plot(&mut self, channel: Channel, bins: &[f32]);
}

/// Coalesces bursts of viewport events into a single deferred refresh.
#[derive(Debug, Clone, Copy)]
pub struct RefreshScheduler {
    quiet: Duration,
    due: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, due: None }
    }

    /// Register a viewport-changing event; pushes the deadline out so a
    /// burst of events coalesces into one refresh.
    pub fn request(&mut self, now: Instant) {
        self.due = Some(now + self.quiet);
    }

    /// Whether a refresh is pending and its quiet period has elapsed.
    pub fn ready(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Consume a due refresh.
    ///
    /// Returns `false` while nothing is due. A due refresh during an
    /// active slider drag is dropped, not deferred: the pending deadline
    /// is cleared and `false` is returned, so the next viewport event
    /// schedules a fresh one.
    pub fn fire(&mut self, now: Instant, dragging: bool) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.due = None;
        !dragging
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(REFRESH_QUIET)
    }
}

/// Capture the surface, recompute the three histograms, and hand them to
/// the plot renderer.
///
/// An unreadable surface is logged and returned as an error without
/// touching the sink, leaving the prior plots and thresholds intact.
pub fn refresh_plots(
    surface: &dyn SampleSurface,
    config: &HistogramConfig,
    sink: &mut dyn PlotSink,
) -> Result<HsvHistograms, SurfaceError> {
    let raster = match surface.capture() {
        Ok(raster) => raster,
        Err(err) => {
            tracing::warn!("histogram refresh skipped: {err}");
            return Err(err);
        }
    };

    let raster = raster.downsample_to_max_side(CAPTURE_MAX_SIDE);
    let histograms = histogram::compute(&raster, config);
    sink.plot(Channel::Hue, &histograms.hue);
    sink.plot(Channel::Saturation, &histograms.saturation);
    sink.plot(Channel::Value, &histograms.value);
    Ok(histograms)
}
