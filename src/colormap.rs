// SPDX-License-Identifier: GPL-3.0-only

//! Pseudo-color mapping for scalar disparity/depth arrays
//!
//! Gray and Inferno use polynomial sRGB approximations (fitted to the
//! matplotlib colormaps, CC0); Jet is the classic piecewise ramp matching
//! OpenCV's COLORMAP_JET endpoints (dark blue to dark red).

use crate::config::ColormapConfig;
use crate::errors::{ViewerError, ViewerResult};
use crate::npy;
use glam::Vec3A;
use image::RgbImage;
use ndarray::Array2;

/// Available colormaps, selected at the CLI boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Colormap {
    /// sRGB gray gradient
    Gray,
    /// Blue-to-red rainbow ramp
    #[default]
    Jet,
    /// Perceptually uniform black-purple-yellow
    Inferno,
}

impl Colormap {
    /// All colormap variants
    pub const ALL: [Colormap; 3] = [Colormap::Gray, Colormap::Jet, Colormap::Inferno];
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Gray => write!(f, "gray"),
            Colormap::Jet => write!(f, "jet"),
            Colormap::Inferno => write!(f, "inferno"),
        }
    }
}

/// Color for a normalized value `t` in [0,1]
pub fn colormap_srgb(which: Colormap, t: f32) -> [u8; 3] {
    match which {
        Colormap::Gray => gray_srgb(t),
        Colormap::Jet => jet_srgb(t),
        Colormap::Inferno => inferno_srgb(t),
    }
}

fn gray_srgb(t: f32) -> [u8; 3] {
    let v = ((t * u8::MAX as f32) + 0.5) as u8;
    [v, v, v]
}

// Piecewise-linear ramp with the same endpoints as OpenCV's jet: half-blue
// at t=0, half-red at t=1, full green in the middle.
fn jet_srgb(t: f32) -> [u8; 3] {
    let ramp = |c: f32| (1.5 - c.abs()).clamp(0.0, 1.0);
    let s = t * 4.0;
    [
        (ramp(s - 3.0) * 255.0) as u8,
        (ramp(s - 2.0) * 255.0) as u8,
        (ramp(s - 1.0) * 255.0) as u8,
    ]
}

// Degree-6 polynomial fitted to matplotlib's Inferno, evaluated in nested
// Horner form. Data from https://www.shadertoy.com/view/WlfXRN (CC0).
fn inferno_srgb(t: f32) -> [u8; 3] {
    const C0: Vec3A = Vec3A::new(0.00021894036911922, 0.0016510046310010, -0.019480898437091);
    const C1: Vec3A = Vec3A::new(0.1065134194856116, 0.5639564367884091, 3.932712388889277);
    const C2: Vec3A = Vec3A::new(11.60249308247187, -3.972853965665698, -15.9423941062914);
    const C3: Vec3A = Vec3A::new(-41.70399613139459, 17.43639888205313, 44.35414519872813);
    const C4: Vec3A = Vec3A::new(77.162935699427, -33.40235894210092, -81.80730925738993);
    const C5: Vec3A = Vec3A::new(-71.31942824499214, 32.62606426397723, 73.20951985803202);
    const C6: Vec3A = Vec3A::new(25.13112622477341, -12.24266895238567, -23.07032500287172);

    let c = C0 + t * (C1 + t * (C2 + t * (C3 + t * (C4 + t * (C5 + t * C6)))));

    let c = c * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}

/// Apply a colormap to a scalar array.
///
/// Values at or below `vmin` take the colormap's first entry, values at or
/// above `vmax` its last; in-between values are linearly normalized. A
/// bound left unset falls back to the array's finite minimum/maximum.
/// Non-finite samples (ZED writes NaN/±inf for unmatched pixels) map to the
/// first entry. Pure and deterministic; the output image has the array's
/// width and height.
pub fn apply_colormap(array: &Array2<f32>, config: &ColormapConfig) -> ViewerResult<RgbImage> {
    let (vmin, vmax) = resolve_bounds(array, config)?;

    let (rows, cols) = array.dim();
    let span = vmax - vmin;
    let mut out = RgbImage::new(cols as u32, rows as u32);
    for ((row, col), value) in array.indexed_iter() {
        let t = if value.is_finite() {
            ((value - vmin) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.put_pixel(
            col as u32,
            row as u32,
            image::Rgb(colormap_srgb(config.colormap, t)),
        );
    }
    Ok(out)
}

fn resolve_bounds(array: &Array2<f32>, config: &ColormapConfig) -> ViewerResult<(f32, f32)> {
    let vmin = match config.vmin {
        Some(v) => v,
        None => npy::finite_min(array).ok_or_else(no_finite_values)?,
    };
    let vmax = match config.vmax {
        Some(v) => v,
        None => npy::finite_max(array).ok_or_else(no_finite_values)?,
    };
    if vmax <= vmin {
        return Err(ViewerError::InvalidInput(format!(
            "vmax ({vmax}) must be greater than vmin ({vmin})"
        )));
    }
    Ok((vmin, vmax))
}

fn no_finite_values() -> ViewerError {
    ViewerError::InvalidInput("array has no finite values to derive bounds from".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        // OpenCV jet starts half-blue and ends half-red
        assert_eq!(jet_srgb(0.0), [0, 0, 127]);
        assert_eq!(jet_srgb(1.0), [127, 0, 0]);
        assert_eq!(jet_srgb(0.5), [127, 255, 127]);
    }

    #[test]
    fn test_gray_endpoints() {
        assert_eq!(gray_srgb(0.0), [0, 0, 0]);
        assert_eq!(gray_srgb(1.0), [255, 255, 255]);
    }

    #[test]
    fn test_inferno_is_dark_to_bright() {
        let lo = inferno_srgb(0.0);
        let hi = inferno_srgb(1.0);
        let sum = |c: [u8; 3]| c.iter().map(|&v| v as u32).sum::<u32>();
        assert!(sum(lo) < 30, "inferno starts near black: {:?}", lo);
        assert!(sum(hi) > 500, "inferno ends bright: {:?}", hi);
    }
}
