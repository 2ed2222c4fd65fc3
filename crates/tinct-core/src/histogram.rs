//! HSV histogram computation for the threshold plots.
//!
//! Bins a pixel raster into hue / saturation / value histograms, smooths
//! the hue histogram with a circular Gaussian kernel (bin 359 and bin 0
//! are adjacent), and normalizes each histogram to `[0, 1]` so the plot
//! renderer can draw it directly.

use serde::{Deserialize, Serialize};

use crate::color;
use crate::raster::PixelRaster;

/// Hue resolution in degrees.
const DEFAULT_HUE_BINS: usize = 360;
/// Bins for saturation / value over `[0, 1]`.
const DEFAULT_SV_BINS: usize = 64;
/// Gaussian smoothing sigma for the hue line.
const DEFAULT_SMOOTH_SIGMA: f32 = 3.0;

/// Binning and smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    pub hue_bins: usize,
    pub sv_bins: usize,
    /// Sigma of the circular Gaussian applied to the hue histogram.
    /// Non-positive values disable smoothing.
    pub smooth_sigma: f32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            hue_bins: DEFAULT_HUE_BINS,
            sv_bins: DEFAULT_SV_BINS,
            smooth_sigma: DEFAULT_SMOOTH_SIGMA,
        }
    }
}

/// Normalized histogram trio, each bin in `[0, 1]`, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsvHistograms {
    pub hue: Vec<f32>,
    pub saturation: Vec<f32>,
    pub value: Vec<f32>,
}

/// Compute normalized HSV histograms from a raster.
///
/// Fully transparent pixels (alpha 0) are skipped; every other pixel
/// contributes one count to each channel. Each histogram is scaled by its
/// own peak, so a nonempty opaque raster always has a bin at exactly 1.0.
pub fn compute(raster: &PixelRaster, config: &HistogramConfig) -> HsvHistograms {
    let mut hue = vec![0.0_f32; config.hue_bins];
    let mut sat = vec![0.0_f32; config.sv_bins];
    let mut val = vec![0.0_f32; config.sv_bins];

    for px in &raster.pixels {
        if px[3] == 0 {
            continue;
        }
        let (h, s, v) = color::rgb8_to_hsv([px[0], px[1], px[2]]);
        if let Some(bin) = bin_index(h / 360.0, config.hue_bins) {
            hue[bin] += 1.0;
        }
        if let Some(bin) = bin_index(s, config.sv_bins) {
            sat[bin] += 1.0;
        }
        if let Some(bin) = bin_index(v, config.sv_bins) {
            val[bin] += 1.0;
        }
    }

    let smoothed = if config.smooth_sigma > 0.0 {
        let (kernel, radius) = gaussian_kernel_1d(config.smooth_sigma);
        circular_convolve(&hue, &kernel, radius)
    } else {
        hue
    };

    HsvHistograms {
        hue: normalize(smoothed),
        saturation: normalize(sat),
        value: normalize(val),
    }
}

/// Bin index for a `[0, 1]` value: `floor(value * bins)` clamped into
/// `[0, bins - 1]`.
fn bin_index(value: f32, bins: usize) -> Option<usize> {
    if bins == 0 {
        return None;
    }
    let idx = (value.max(0.0) * bins as f32).floor() as usize;
    Some(idx.min(bins - 1))
}

/// Normalized 1D Gaussian kernel with radius `max(1, floor(3 * sigma))`.
fn gaussian_kernel_1d(sigma: f32) -> (Vec<f32>, usize) {
    let radius = ((3.0 * sigma).floor() as isize).max(1) as usize;
    let width = 2 * radius + 1;

    let mut kernel = vec![0.0_f32; width];
    let mut sum = 0.0_f32;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-(x * x) / (2.0 * sigma * sigma)).exp();
        sum += *k;
    }
    for k in &mut kernel {
        *k /= sum;
    }
    (kernel, radius)
}

/// Convolve treating the array as circular, so the last bin and the first
/// bin are adjacent.
fn circular_convolve(bins: &[f32], kernel: &[f32], radius: usize) -> Vec<f32> {
    let n = bins.len() as isize;
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(j, k)| {
                    let idx = (i + j as isize - radius as isize).rem_euclid(n);
                    bins[idx as usize] * k
                })
                .sum()
        })
        .collect()
}

/// Scale so the peak bin is exactly 1.0; an all-zero histogram stays zero.
fn normalize(mut bins: Vec<f32>) -> Vec<f32> {
    let peak = bins.iter().fold(0.0_f32, |acc, &b| acc.max(b));
    let scale = if peak > 0.0 { 1.0 / peak } else { 1.0 };
    for b in &mut bins {
        *b *= scale;
    }
    bins
}
