//! Minimal range expansion from a sampled color.
//!
//! Given the stored threshold range for a channel and a freshly picked
//! value, computes the smallest adjustment that brings the pick inside
//! the range. Hue grows along the shorter arc; saturation and value grow
//! linearly and clamp to the domain. Pure functions; the caller decides
//! what to do with the result.

use crate::interval::Domain;
use crate::thresholds::{Channel, ThresholdRange, ThresholdSet};

/// Expand `current` so `sample` is contained, then pad both endpoints
/// outward by `padding` (domain units; zero disables).
///
/// A full-domain `current` is treated as uninitialized and collapses to a
/// zero-width range at the sample, seeding a fresh threshold from the
/// first pick.
pub fn expand(
    current: ThresholdRange,
    sample: f32,
    domain: &Domain,
    padding: f32,
) -> ThresholdRange {
    if domain.is_full(current) {
        return ThresholdRange::at(domain.wrap(sample));
    }

    if domain.circular {
        expand_circular(current, sample, domain, padding)
    } else {
        expand_linear(current, sample, domain, padding)
    }
}

/// Expand all three channels of `current` toward an `(h, s, v)` sample.
pub fn expand_set(current: &ThresholdSet, hsv: (f32, f32, f32), padding: f32) -> ThresholdSet {
    ThresholdSet {
        h: expand(current.h, hsv.0, &Channel::Hue.domain(), padding),
        s: expand(current.s, hsv.1, &Channel::Saturation.domain(), padding),
        v: expand(current.v, hsv.2, &Channel::Value.domain(), padding),
    }
}

fn expand_linear(
    current: ThresholdRange,
    sample: f32,
    domain: &Domain,
    padding: f32,
) -> ThresholdRange {
    let mut min = current.min;
    let mut max = current.max;

    if sample < min {
        min = sample;
    }
    if sample > max {
        max = sample;
    }
    if padding > 0.0 {
        min -= padding;
        max += padding;
    }

    ThresholdRange::new(domain.clamp(min), domain.clamp(max))
}

fn expand_circular(
    current: ThresholdRange,
    sample: f32,
    domain: &Domain,
    padding: f32,
) -> ThresholdRange {
    let span = domain.span();
    let mut min = domain.wrap(current.min);
    let mut max = domain.wrap(current.max);
    let v = domain.wrap(sample);

    if !domain.contains(ThresholdRange::new(min, max), v) {
        // Grow whichever endpoint needs the shorter angular move; a tie
        // moves `max`.
        let grow_max = (v - min).rem_euclid(span);
        let grow_min = (max - v).rem_euclid(span);
        if grow_max <= grow_min {
            max = v;
        } else {
            min = v;
        }
    }

    if padding > 0.0 {
        min = domain.wrap(min - padding);
        max = domain.wrap(max + padding);
    }

    ThresholdRange::new(min, max)
}
