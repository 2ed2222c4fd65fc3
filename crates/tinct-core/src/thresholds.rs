//! Shared threshold state — the single source of truth read by the
//! sliders, the sampler, and downstream segmentation consumers.

use std::fmt;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::interval::Domain;

/// One channel of the HSV threshold set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Hue,
    Saturation,
    Value,
}

impl Channel {
    /// Human-readable label for logs and UI captions.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Value => "value",
        }
    }

    /// The channel's value domain.
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Hue => Domain::HUE,
            Self::Saturation | Self::Value => Domain::UNIT,
        }
    }

    /// All three channels in `h`, `s`, `v` order.
    pub fn all() -> &'static [Self] {
        const ALL: [Channel; 3] = [Channel::Hue, Channel::Saturation, Channel::Value];
        &ALL
    }
}

/// Accepted `[min, max]` interval for one channel, in domain units.
///
/// For hue a range with `min > max` is a valid arc crossing 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub min: f32,
    pub max: f32,
}

impl ThresholdRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Zero-width range at `v`.
    pub const fn at(v: f32) -> Self {
        Self { min: v, max: v }
    }
}

/// The `{h, s, v}` threshold trio.
///
/// `Default` is the full domain of every channel, meaning "nothing
/// excluded yet".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub h: ThresholdRange,
    pub s: ThresholdRange,
    pub v: ThresholdRange,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            h: ThresholdRange::new(Domain::HUE.min, Domain::HUE.max),
            s: ThresholdRange::new(Domain::UNIT.min, Domain::UNIT.max),
            v: ThresholdRange::new(Domain::UNIT.min, Domain::UNIT.max),
        }
    }
}

impl ThresholdSet {
    pub fn range(&self, channel: Channel) -> ThresholdRange {
        match channel {
            Channel::Hue => self.h,
            Channel::Saturation => self.s,
            Channel::Value => self.v,
        }
    }

    pub fn set(&mut self, channel: Channel, range: ThresholdRange) {
        match channel {
            Channel::Hue => self.h = range,
            Channel::Saturation => self.s = range,
            Channel::Value => self.v = range,
        }
    }

    /// Normalized payload for the segmentation backend: hue scaled into
    /// `0..1`, saturation and value passed through.
    pub fn normalized(&self) -> SegmentationThresholds {
        let hue_span = Domain::HUE.span();
        SegmentationThresholds {
            h_min: self.h.min / hue_span,
            h_max: self.h.max / hue_span,
            s_min: self.s.min,
            s_max: self.s.max,
            v_min: self.v.min,
            v_max: self.v.max,
        }
    }
}

/// Flat, `0..1`-normalized threshold fields in the shape a segmentation
/// request body expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentationThresholds {
    pub h_min: f32,
    pub h_max: f32,
    pub s_min: f32,
    pub s_max: f32,
    pub v_min: f32,
    pub v_max: f32,
}

impl SegmentationThresholds {
    /// Serialize for an HTTP request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

type ChangeListener = Box<dyn Fn(Channel, ThresholdRange) + Send + Sync>;

/// Process-wide shared threshold store.
///
/// All mutation funnels through [`ThresholdStore::set_range`]; the sliders
/// and the sampler are the only writers and run on the UI event thread, so
/// the locks exist for sharing, not for contention.
pub struct ThresholdStore {
    set: RwLock<ThresholdSet>,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl ThresholdStore {
    pub fn new() -> Self {
        Self {
            set: RwLock::new(ThresholdSet::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the current threshold set.
    pub fn snapshot(&self) -> ThresholdSet {
        *self.set.read()
    }

    /// Current range for one channel.
    pub fn range(&self, channel: Channel) -> ThresholdRange {
        self.set.read().range(channel)
    }

    /// Write a channel range, clamping both bounds into the channel
    /// domain, then notify every subscriber.
    ///
    /// Notification fires even when the write does not change the stored
    /// value; subscribers must tolerate idempotent updates.
    pub fn set_range(&self, channel: Channel, min: f32, max: f32) {
        let domain = channel.domain();
        let range = ThresholdRange::new(domain.clamp(min), domain.clamp(max));
        self.set.write().set(channel, range);
        for listener in self.listeners.lock().iter() {
            listener(channel, range);
        }
    }

    /// Register a change listener, called after every `set_range`.
    ///
    /// Listeners run with the listener list borrowed and must not write
    /// back into the store.
    pub fn subscribe(&self, listener: impl Fn(Channel, ThresholdRange) + Send + Sync + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }
}

impl Default for ThresholdStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThresholdStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdStore")
            .field("set", &*self.set.read())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_default_set_covers_full_domains() {
        let set = ThresholdSet::default();
        assert!(Domain::HUE.is_full(set.h));
        assert!(Domain::UNIT.is_full(set.s));
        assert!(Domain::UNIT.is_full(set.v));
    }

    #[test]
    fn test_set_range_clamps_to_domain() {
        let store = ThresholdStore::new();
        store.set_range(Channel::Saturation, -0.5, 1.5);
        let range = store.range(Channel::Saturation);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 1.0);

        store.set_range(Channel::Hue, -10.0, 400.0);
        let range = store.range(Channel::Hue);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 360.0);
    }

    #[test]
    fn test_wrapping_hue_arc_survives_storage() {
        let store = ThresholdStore::new();
        store.set_range(Channel::Hue, 350.0, 10.0);
        let range = store.range(Channel::Hue);
        assert_eq!(range.min, 350.0);
        assert_eq!(range.max, 10.0);
    }

    #[test]
    fn test_subscriber_fires_on_every_write() {
        let store = ThresholdStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        store.subscribe(move |channel, range| {
            assert_eq!(channel, Channel::Value);
            assert!((range.min - 0.2).abs() < EPSILON);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set_range(Channel::Value, 0.2, 0.8);
        // Idempotent write still notifies.
        store.set_range(Channel::Value, 0.2, 0.8);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_normalized_payload_scales_hue() {
        let mut set = ThresholdSet::default();
        set.h = ThresholdRange::new(90.0, 270.0);
        set.s = ThresholdRange::new(0.25, 0.75);
        let norm = set.normalized();
        assert!((norm.h_min - 0.25).abs() < EPSILON);
        assert!((norm.h_max - 0.75).abs() < EPSILON);
        assert!((norm.s_min - 0.25).abs() < EPSILON);
        assert!((norm.v_max - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_payload_serializes_flat_fields() {
        let json = ThresholdSet::default().normalized().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["h_min"], 0.0);
        assert_eq!(value["h_max"], 1.0);
        assert_eq!(value["v_max"], 1.0);
    }
}
