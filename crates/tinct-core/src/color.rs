//! RGB to HSV / HSL conversions.
//!
//! Inputs are normalized `[0, 1]` RGB triplets. Hue comes back in degrees
//! wrapped into `[0, 360)`; saturation, value, and lightness in `[0, 1]`.
//! A gray input (`max == min`) has no defined hue and yields `h = 0`.

/// Convert RGB to HSV (hue in degrees, saturation and value in 0..1).
pub fn rgb_to_hsv(rgb: [f32; 3]) -> (f32, f32, f32) {
    let r = rgb[0];
    let g = rgb[1];
    let b = rgb[2];

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max;
    let sat = if max <= 0.0 { 0.0 } else { delta / max };

    if delta < 1e-10 {
        return (0.0, sat, value);
    }

    let hue = if (max - r).abs() < 1e-10 {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < 1e-10 {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    ((hue * 60.0).rem_euclid(360.0), sat, value)
}

/// Convert RGB to HSL (hue in degrees, saturation and lightness in 0..1).
pub fn rgb_to_hsl(rgb: [f32; 3]) -> (f32, f32, f32) {
    let r = rgb[0];
    let g = rgb[1];
    let b = rgb[2];

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) * 0.5;

    if (max - min).abs() < 1e-10 {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let sat = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if (max - r).abs() < 1e-10 {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < 1e-10 {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    ((hue * 60.0).rem_euclid(360.0), sat, lightness)
}

/// Convert an 8-bit RGB triplet to HSV.
pub fn rgb8_to_hsv(rgb: [u8; 3]) -> (f32, f32, f32) {
    rgb_to_hsv([
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    ])
}

/// Convert an 8-bit RGB triplet to HSL.
pub fn rgb8_to_hsl(rgb: [u8; 3]) -> (f32, f32, f32) {
    rgb_to_hsl([
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_hsv_primary_colors() {
        let (h, s, v) = rgb_to_hsv([1.0, 0.0, 0.0]);
        assert!(h.abs() < EPSILON, "red hue should be 0: {h}");
        assert!((s - 1.0).abs() < EPSILON);
        assert!((v - 1.0).abs() < EPSILON);

        let (h, _, _) = rgb_to_hsv([0.0, 1.0, 0.0]);
        assert!((h - 120.0).abs() < EPSILON, "green hue should be 120: {h}");

        let (h, _, _) = rgb_to_hsv([0.0, 0.0, 1.0]);
        assert!((h - 240.0).abs() < EPSILON, "blue hue should be 240: {h}");
    }

    #[test]
    fn test_hsv_gray_has_zero_hue_and_saturation() {
        let (h, s, v) = rgb_to_hsv([0.5, 0.5, 0.5]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_hsv_black_has_zero_saturation() {
        let (h, s, v) = rgb_to_hsv([0.0, 0.0, 0.0]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_hsv_hue_stays_in_domain() {
        // Magenta-ish input exercises the `g < b` wrap branch.
        let (h, _, _) = rgb_to_hsv([1.0, 0.0, 0.8]);
        assert!((0.0..360.0).contains(&h), "hue out of domain: {h}");
        assert!(h > 300.0, "magenta hue should sit past 300: {h}");
    }

    #[test]
    fn test_hsl_white_and_black() {
        let (h, s, l) = rgb_to_hsl([1.0, 1.0, 1.0]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 1.0).abs() < EPSILON);

        let (_, s, l) = rgb_to_hsl([0.0, 0.0, 0.0]);
        assert_eq!(s, 0.0);
        assert_eq!(l, 0.0);
    }

    #[test]
    fn test_hsl_and_hsv_agree_on_hue() {
        let rgb = [0.3, 0.8, 0.45];
        let (hv, _, _) = rgb_to_hsv(rgb);
        let (hl, _, _) = rgb_to_hsl(rgb);
        assert!((hv - hl).abs() < EPSILON, "hsv {hv} vs hsl {hl}");
    }

    #[test]
    fn test_rgb8_matches_normalized() {
        let (h8, s8, v8) = rgb8_to_hsv([255, 128, 0]);
        let (h, s, v) = rgb_to_hsv([1.0, 128.0 / 255.0, 0.0]);
        assert!((h8 - h).abs() < EPSILON);
        assert!((s8 - s).abs() < EPSILON);
        assert!((v8 - v).abs() < EPSILON);
    }
}
