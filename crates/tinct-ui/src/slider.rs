//! Dual-handle range slider overlaid on a histogram track.
//!
//! Converts pointer drags into fractional handle positions, enforces a
//! minimum gap so the handles never cross, and writes the mapped domain
//! values into the shared threshold store on every drag frame. The drag
//! logic is an explicit `Idle → Dragging(handle) → Idle` state machine so
//! it can be driven and tested without a real pointer device.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinct_core::{Channel, Domain, ThresholdRange, ThresholdStore};

use crate::surface::Bounds;

// ── Constants ───────────────────────────────────────────────────────────────

/// Minimum fraction of track width kept between the two handles while
/// dragging.
pub const MIN_GAP: f32 = 0.01;

/// Handle width in logical pixels.
pub const HANDLE_WIDTH: f32 = 4.0;

/// Extra pixels around a handle that still count as a hit.
const HANDLE_HIT_SLOP: f32 = 2.0;

// ── Errors ──────────────────────────────────────────────────────────────────

/// Errors constructing or re-binding a slider.
#[derive(Debug, Error)]
pub enum SliderError {
    /// The bound track rectangle cannot host handles.
    #[error("slider track is degenerate: {width}x{height}")]
    InvalidTrack { width: f32, height: f32 },
}

// ── Pointer input ───────────────────────────────────────────────────────────

/// Pointer input forwarded by the host, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

/// Which of the two handles a drag holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    Lower,
    Upper,
}

/// Drag-session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(Handle),
}

// ── Layout ──────────────────────────────────────────────────────────────────

/// Pixel geometry for an external painter: handle positions plus the two
/// shaded bands covering the excluded parts of the track. All offsets are
/// relative to the track's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderLayout {
    /// Left edge of the lower handle.
    pub lower_handle_x: f32,
    /// Left edge of the upper handle.
    pub upper_handle_x: f32,
    /// Width of the excluded band starting at the track's left edge.
    pub left_band_width: f32,
    /// Offset of the excluded band reaching the track's right edge.
    pub right_band_x: f32,
    pub right_band_width: f32,
}

// ── Slider ──────────────────────────────────────────────────────────────────

/// A per-channel dual-handle slider bound to a track rectangle and the
/// shared threshold store.
///
/// The two fractions are the unique internal representation; domain
/// values and pixel positions are both derived from them.
pub struct RangeSlider {
    channel: Channel,
    domain: Domain,
    track: Bounds,
    f_min: f32,
    f_max: f32,
    drag: DragState,
    store: Arc<ThresholdStore>,
}

impl RangeSlider {
    /// Bind a slider to `track`, deriving the initial handle fractions
    /// from the store's current range for `channel`.
    pub fn new(
        channel: Channel,
        track: Bounds,
        store: Arc<ThresholdStore>,
    ) -> Result<Self, SliderError> {
        validate_track(track)?;

        let domain = channel.domain();
        let current = store.range(channel);
        let mut f_min = domain.fraction_of(current.min);
        let mut f_max = domain.fraction_of(current.max);
        if f_min > f_max {
            std::mem::swap(&mut f_min, &mut f_max);
        }

        Ok(Self {
            channel,
            domain,
            track,
            f_min,
            f_max,
            drag: DragState::Idle,
            store,
        })
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Current handle fractions `(f_min, f_max)`.
    pub fn fractions(&self) -> (f32, f32) {
        (self.f_min, self.f_max)
    }

    /// Current range mapped back from the handle fractions, clamped into
    /// the channel domain.
    pub fn get(&self) -> ThresholdRange {
        ThresholdRange::new(
            self.domain.clamp(self.domain.value_at(self.f_min)),
            self.domain.clamp(self.domain.value_at(self.f_max)),
        )
    }

    /// Programmatic setter: clamp into the domain, swap a reversed pair,
    /// move the handles, and write the store.
    ///
    /// The minimum gap is not enforced here; a freshly seeded pick is a
    /// zero-width range, and the next drag restores the gap.
    pub fn set(&mut self, min: f32, max: f32) {
        self.f_min = self.domain.fraction_of(min);
        self.f_max = self.domain.fraction_of(max);
        if self.f_min > self.f_max {
            std::mem::swap(&mut self.f_min, &mut self.f_max);
        }
        self.commit();
    }

    /// Re-bind to a resized track. Layout-only: the fractions and the
    /// stored range are untouched.
    pub fn resize(&mut self, track: Bounds) -> Result<(), SliderError> {
        validate_track(track)?;
        self.track = track;
        Ok(())
    }

    /// Pixel geometry for the current fractions.
    pub fn layout(&self) -> SliderLayout {
        let width = self.track.size.x.max(1.0);
        let x_min = (self.f_min * width).round();
        let x_max = (self.f_max * width).round();

        SliderLayout {
            lower_handle_x: x_min - HANDLE_WIDTH / 2.0,
            upper_handle_x: x_max - HANDLE_WIDTH / 2.0,
            left_band_width: x_min.max(0.0),
            right_band_x: x_max,
            right_band_width: (width - x_max).max(0.0),
        }
    }

    /// Feed one pointer event through the drag state machine.
    ///
    /// Returns `true` when the event changed handle positions or drag
    /// state. A pointer-up anywhere ends the session, matching document-
    /// level capture semantics.
    pub fn on_pointer(&mut self, event: PointerEvent) -> bool {
        match (self.drag, event) {
            (DragState::Idle, PointerEvent::Down { x, y }) => {
                let Some(handle) = self.hit_test(Vec2::new(x, y)) else {
                    return false;
                };
                self.drag = DragState::Dragging(handle);
                self.drag_to(x);
                true
            }
            (DragState::Dragging(_), PointerEvent::Move { x, .. }) => {
                self.drag_to(x);
                true
            }
            (DragState::Dragging(_), PointerEvent::Up) => {
                self.drag = DragState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Which handle, if any, is under `p`. When both handles overlap the
    /// point, the one with the nearer center wins; an exact tie goes to
    /// the upper handle.
    fn hit_test(&self, p: Vec2) -> Option<Handle> {
        if !self.track.contains(p) {
            return None;
        }

        let layout = self.layout();
        let x = p.x - self.track.origin.x;
        let reach = HANDLE_WIDTH / 2.0 + HANDLE_HIT_SLOP;
        let lower_center = layout.lower_handle_x + HANDLE_WIDTH / 2.0;
        let upper_center = layout.upper_handle_x + HANDLE_WIDTH / 2.0;

        let lower_dist = (x - lower_center).abs();
        let upper_dist = (x - upper_center).abs();

        if lower_dist > reach && upper_dist > reach {
            None
        } else if upper_dist <= lower_dist {
            Some(Handle::Upper)
        } else {
            Some(Handle::Lower)
        }
    }

    /// Move the dragged handle to pointer `x`, keeping the gap.
    fn drag_to(&mut self, x: f32) {
        let DragState::Dragging(handle) = self.drag else {
            return;
        };
        let width = self.track.size.x.max(1.0);
        let f = ((x - self.track.origin.x) / width).clamp(0.0, 1.0);

        match handle {
            Handle::Lower => self.f_min = f.min(self.f_max - MIN_GAP),
            Handle::Upper => self.f_max = f.max(self.f_min + MIN_GAP),
        }
        self.commit();
    }

    /// Write the fraction-mapped domain values into the shared store.
    fn commit(&self) {
        let range = self.get();
        self.store.set_range(self.channel, range.min, range.max);
    }
}

fn validate_track(track: Bounds) -> Result<(), SliderError> {
    let ok = track.size.x.is_finite()
        && track.size.y.is_finite()
        && track.origin.x.is_finite()
        && track.origin.y.is_finite()
        && track.size.x > 0.0
        && track.size.y > 0.0;
    if ok {
        Ok(())
    } else {
        Err(SliderError::InvalidTrack {
            width: track.size.x,
            height: track.size.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn track() -> Bounds {
        Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 20.0))
    }

    fn hue_slider() -> RangeSlider {
        RangeSlider::new(Channel::Hue, track(), Arc::new(ThresholdStore::new())).unwrap()
    }

    #[test]
    fn test_new_rejects_degenerate_track() {
        let store = Arc::new(ThresholdStore::new());
        let empty = Bounds::new(Vec2::ZERO, Vec2::new(0.0, 20.0));
        assert!(matches!(
            RangeSlider::new(Channel::Hue, empty, store),
            Err(SliderError::InvalidTrack { .. })
        ));
    }

    #[test]
    fn test_initial_fractions_follow_store() {
        let store = Arc::new(ThresholdStore::new());
        store.set_range(Channel::Hue, 90.0, 270.0);
        let slider = RangeSlider::new(Channel::Hue, track(), store).unwrap();
        let (f_min, f_max) = slider.fractions();
        assert!((f_min - 0.25).abs() < EPSILON);
        assert!((f_max - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_set_swaps_reversed_pair_and_writes_store() {
        let store = Arc::new(ThresholdStore::new());
        let mut slider =
            RangeSlider::new(Channel::Saturation, track(), Arc::clone(&store)).unwrap();

        slider.set(0.8, 0.2);
        let range = slider.get();
        assert!((range.min - 0.2).abs() < EPSILON);
        assert!((range.max - 0.8).abs() < EPSILON);

        let stored = store.range(Channel::Saturation);
        assert!((stored.min - 0.2).abs() < EPSILON);
        assert!((stored.max - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_set_allows_zero_width_range() {
        let mut slider = hue_slider();
        slider.set(120.0, 120.0);
        let (f_min, f_max) = slider.fractions();
        assert!((f_min - f_max).abs() < EPSILON);
    }

    #[test]
    fn test_drag_lower_handle_writes_store_each_frame() {
        let store = Arc::new(ThresholdStore::new());
        let mut slider = RangeSlider::new(Channel::Hue, track(), Arc::clone(&store)).unwrap();

        assert!(slider.on_pointer(PointerEvent::Down { x: 1.0, y: 10.0 }));
        assert!(slider.is_dragging());

        assert!(slider.on_pointer(PointerEvent::Move { x: 25.0, y: 10.0 }));
        let stored = store.range(Channel::Hue);
        assert!((stored.min - 90.0).abs() < 1.0, "min after drag: {}", stored.min);

        assert!(slider.on_pointer(PointerEvent::Up));
        assert!(!slider.is_dragging());
    }

    #[test]
    fn test_drag_clamps_at_gap() {
        let mut slider = hue_slider();
        slider.set(0.0, 0.92 * 360.0);

        // Grab the lower handle and push it past the upper one.
        assert!(slider.on_pointer(PointerEvent::Down { x: 0.0, y: 10.0 }));
        slider.on_pointer(PointerEvent::Move { x: 95.0, y: 10.0 });

        let (f_min, f_max) = slider.fractions();
        assert!((f_min - 0.91).abs() < EPSILON, "lower clamps to 0.91: {f_min}");
        assert!((f_max - 0.92).abs() < EPSILON);
        assert!(f_max - f_min >= MIN_GAP - EPSILON);
    }

    #[test]
    fn test_gap_invariant_after_drag_sequences() {
        let mut slider = hue_slider();
        slider.set(100.0, 140.0);

        slider.on_pointer(PointerEvent::Down { x: 39.0, y: 10.0 });
        for x in [10.0, 90.0, 50.0, 120.0, -30.0] {
            slider.on_pointer(PointerEvent::Move { x, y: 10.0 });
            let (f_min, f_max) = slider.fractions();
            assert!(
                f_max - f_min >= MIN_GAP - EPSILON,
                "gap violated: {f_min}..{f_max}"
            );
        }
        slider.on_pointer(PointerEvent::Up);
    }

    #[test]
    fn test_pointer_down_outside_track_is_ignored() {
        let mut slider = hue_slider();
        assert!(!slider.on_pointer(PointerEvent::Down { x: 50.0, y: 100.0 }));
        assert!(!slider.is_dragging());
        // Moves without a session are ignored too.
        assert!(!slider.on_pointer(PointerEvent::Move { x: 10.0, y: 10.0 }));
    }

    #[test]
    fn test_pointer_down_between_handles_is_ignored() {
        let mut slider = hue_slider();
        // Full-domain handles sit at fractions 0 and 1; mid-track is far
        // from both.
        assert!(!slider.on_pointer(PointerEvent::Down { x: 50.0, y: 10.0 }));
    }

    #[test]
    fn test_resize_changes_layout_only() {
        let store = Arc::new(ThresholdStore::new());
        let mut slider = RangeSlider::new(Channel::Value, track(), Arc::clone(&store)).unwrap();
        slider.set(0.25, 0.75);
        let before = slider.fractions();
        let stored_before = store.range(Channel::Value);

        let wider = Bounds::new(Vec2::ZERO, Vec2::new(200.0, 20.0));
        slider.resize(wider).unwrap();

        assert_eq!(slider.fractions(), before);
        assert_eq!(store.range(Channel::Value), stored_before);
        let layout = slider.layout();
        assert!((layout.left_band_width - 50.0).abs() < EPSILON);
        assert!((layout.right_band_x - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_layout_bands_cover_excluded_regions() {
        let mut slider = hue_slider();
        slider.set(90.0, 270.0);
        let layout = slider.layout();
        assert!((layout.left_band_width - 25.0).abs() < EPSILON);
        assert!((layout.lower_handle_x - (25.0 - HANDLE_WIDTH / 2.0)).abs() < EPSILON);
        assert!((layout.right_band_x - 75.0).abs() < EPSILON);
        assert!((layout.right_band_width - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_get_stays_in_domain_after_edge_drag() {
        let mut slider = hue_slider();
        slider.set(0.0, 0.0);
        slider.on_pointer(PointerEvent::Down { x: 0.0, y: 10.0 });
        slider.on_pointer(PointerEvent::Move { x: -50.0, y: 10.0 });
        let range = slider.get();
        assert!(range.min >= 0.0 && range.max <= 360.0);
        slider.on_pointer(PointerEvent::Up);
    }
}
