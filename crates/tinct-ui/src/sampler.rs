//! Single-shot color picking from the rendered surface.
//!
//! `enable` arms one pick: the next captured pointer-down reads a pixel,
//! expands the stored thresholds so the picked color is included, and
//! pushes the result through the channel sliders. The session always
//! tears itself down after one pick, successful or not.

use std::sync::Arc;

use glam::Vec2;
use tinct_core::{Channel, ThresholdStore, color, expand_set};

use crate::slider::{PointerEvent, RangeSlider, SliderError};
use crate::surface::{Bounds, SampleSurface, SurfaceError};

// ── Configuration ───────────────────────────────────────────────────────────

/// Radius of the ring cursor shown while picking, logical px.
const DEFAULT_CURSOR_RADIUS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Ring-cursor radius handed to the host affordance.
    pub cursor_radius: f32,
    /// Padding applied outward after each expansion, in channel units.
    pub padding: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            cursor_radius: DEFAULT_CURSOR_RADIUS,
            padding: 0.0,
        }
    }
}

// ── Host affordances ────────────────────────────────────────────────────────

/// Host-side affordances toggled around a picking session.
///
/// The embedding viewer owns the actual ring cursor and pointer
/// navigation; the sampler only tells it when to switch them. The
/// external trigger (a toolbar button, a hotkey) calls
/// [`Sampler::enable`] to start a session.
pub trait SamplerHost {
    /// Show or hide the pick cursor, a ring of the given radius.
    fn set_pick_cursor(&mut self, active: bool, radius: f32);

    /// Suspend or restore normal pointer navigation on the surface.
    fn set_navigation_enabled(&mut self, enabled: bool);
}

// ── Slider panel ────────────────────────────────────────────────────────────

/// The hue / saturation / value slider trio over one shared store.
pub struct SliderPanel {
    pub hue: RangeSlider,
    pub saturation: RangeSlider,
    pub value: RangeSlider,
}

impl SliderPanel {
    /// Build all three sliders over `store`, one per histogram track.
    pub fn new(
        hue_track: Bounds,
        sat_track: Bounds,
        val_track: Bounds,
        store: Arc<ThresholdStore>,
    ) -> Result<Self, SliderError> {
        Ok(Self {
            hue: RangeSlider::new(Channel::Hue, hue_track, Arc::clone(&store))?,
            saturation: RangeSlider::new(Channel::Saturation, sat_track, Arc::clone(&store))?,
            value: RangeSlider::new(Channel::Value, val_track, store)?,
        })
    }

    pub fn slider_mut(&mut self, channel: Channel) -> &mut RangeSlider {
        match channel {
            Channel::Hue => &mut self.hue,
            Channel::Saturation => &mut self.saturation,
            Channel::Value => &mut self.value,
        }
    }

    /// Route a pointer event to all three sliders. Returns `true` when
    /// any of them reacted.
    pub fn on_pointer(&mut self, event: PointerEvent) -> bool {
        let hue = self.hue.on_pointer(event);
        let sat = self.saturation.on_pointer(event);
        let val = self.value.on_pointer(event);
        hue | sat | val
    }

    /// Whether any slider holds an active drag session. Gates the
    /// debounced histogram refresh.
    pub fn any_dragging(&self) -> bool {
        self.hue.is_dragging() || self.saturation.is_dragging() || self.value.is_dragging()
    }
}

// ── Sampler ─────────────────────────────────────────────────────────────────

/// Single-shot pixel color picker.
#[derive(Debug)]
pub struct Sampler {
    config: SamplerConfig,
    armed: bool,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            armed: false,
        }
    }

    /// Whether a picking session is armed.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm one picking session: pick cursor on, surface navigation off.
    /// Idempotent while already armed.
    pub fn enable(&mut self, host: &mut dyn SamplerHost) {
        if self.armed {
            return;
        }
        self.armed = true;
        host.set_pick_cursor(true, self.config.cursor_radius);
        host.set_navigation_enabled(false);
    }

    /// Tear the session down. Idempotent.
    pub fn disable(&mut self, host: &mut dyn SamplerHost) {
        if !self.armed {
            return;
        }
        self.armed = false;
        host.set_navigation_enabled(true);
        host.set_pick_cursor(false, self.config.cursor_radius);
    }

    /// Handle a captured pointer-down.
    ///
    /// While armed, reads the pixel under `position`, expands all three
    /// stored ranges toward its color, and applies them through the
    /// panel's sliders. Returns `true` when a pick was consumed; the
    /// session is disabled either way, so each activation picks at most
    /// once. A failed read is logged and swallowed.
    pub fn handle_pointer_down(
        &mut self,
        position: Vec2,
        surface: &dyn SampleSurface,
        panel: &mut SliderPanel,
        store: &ThresholdStore,
        host: &mut dyn SamplerHost,
    ) -> bool {
        if !self.armed {
            return false;
        }
        if let Err(err) = self.pick(position, surface, panel, store) {
            tracing::error!("color pick failed: {err}");
        }
        self.disable(host);
        true
    }

    fn pick(
        &self,
        position: Vec2,
        surface: &dyn SampleSurface,
        panel: &mut SliderPanel,
        store: &ThresholdStore,
    ) -> Result<(), SurfaceError> {
        let (px, py) = surface_pixel_at(surface, position);
        let rgba = surface.read_pixel(px, py)?;
        let hsv = color::rgb8_to_hsv([rgba[0], rgba[1], rgba[2]]);

        let expanded = expand_set(&store.snapshot(), hsv, self.config.padding);
        panel.hue.set(expanded.h.min, expanded.h.max);
        panel.saturation.set(expanded.s.min, expanded.s.max);
        panel.value.set(expanded.v.min, expanded.v.max);
        Ok(())
    }
}

/// Map a screen position onto the surface's backing store, accounting for
/// device-pixel scaling and clamping to the edge pixels.
fn surface_pixel_at(surface: &dyn SampleSurface, position: Vec2) -> (u32, u32) {
    let bounds = surface.screen_bounds();
    let (width, height) = surface.pixel_size();

    let scale_x = width as f32 / bounds.size.x.max(1.0);
    let scale_y = height as f32 / bounds.size.y.max(1.0);
    let x = ((position.x - bounds.origin.x) * scale_x).round().max(0.0) as u32;
    let y = ((position.y - bounds.origin.y) * scale_y).round().max(0.0) as u32;

    (
        x.min(width.saturating_sub(1)),
        y.min(height.saturating_sub(1)),
    )
}
