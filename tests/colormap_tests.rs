// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the colormap mapper

use depthview::colormap::{Colormap, apply_colormap, colormap_srgb};
use depthview::config::ColormapConfig;
use depthview::errors::ViewerError;
use ndarray::array;

fn config(colormap: Colormap, vmin: f32, vmax: f32) -> ColormapConfig {
    ColormapConfig {
        colormap,
        vmin: Some(vmin),
        vmax: Some(vmax),
    }
}

#[test]
fn test_values_clamp_to_colormap_endpoints() {
    // Below vmin takes the first entry, above vmax the last, for every map
    let disparity = array![[-10.0, 0.0], [100.0, 250.0]];
    for colormap in Colormap::ALL {
        let image = apply_colormap(&disparity, &config(colormap, 0.0, 100.0)).unwrap();
        let first = colormap_srgb(colormap, 0.0);
        let last = colormap_srgb(colormap, 1.0);
        assert_eq!(image.get_pixel(0, 0).0, first, "{colormap} below vmin");
        assert_eq!(image.get_pixel(1, 0).0, first, "{colormap} at vmin");
        assert_eq!(image.get_pixel(0, 1).0, last, "{colormap} at vmax");
        assert_eq!(image.get_pixel(1, 1).0, last, "{colormap} above vmax");
    }
}

#[test]
fn test_mapper_is_deterministic() {
    let disparity = array![[0.0, 12.5, 99.0], [42.0, 7.0, 63.5]];
    let cfg = config(Colormap::Inferno, 0.0, 100.0);
    let a = apply_colormap(&disparity, &cfg).unwrap();
    let b = apply_colormap(&disparity, &cfg).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn test_output_shape_matches_input() {
    let disparity = ndarray::Array2::<f32>::zeros((7, 11));
    let image = apply_colormap(&disparity, &config(Colormap::Gray, 0.0, 1.0)).unwrap();
    assert_eq!(image.width(), 11);
    assert_eq!(image.height(), 7);
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let disparity = array![[1.0, 2.0]];
    for (vmin, vmax) in [(5.0, 5.0), (10.0, 0.0)] {
        let err = apply_colormap(&disparity, &config(Colormap::Jet, vmin, vmax)).unwrap_err();
        assert!(
            matches!(err, ViewerError::InvalidInput(_)),
            "expected InvalidInput, got {err:?}"
        );
    }
}

#[test]
fn test_unset_bounds_fall_back_to_finite_range() {
    let disparity = array![[3.0, f32::NAN], [7.0, 5.0]];
    let cfg = ColormapConfig {
        colormap: Colormap::Gray,
        vmin: None,
        vmax: None,
    };
    let image = apply_colormap(&disparity, &cfg).unwrap();
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(image.get_pixel(0, 1).0, [255, 255, 255]);
}

#[test]
fn test_nonfinite_samples_take_first_entry() {
    let disparity = array![[f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 100.0]];
    let image = apply_colormap(&disparity, &config(Colormap::Jet, 0.0, 100.0)).unwrap();
    let first = colormap_srgb(Colormap::Jet, 0.0);
    for x in 0..3 {
        assert_eq!(image.get_pixel(x, 0).0, first);
    }
}

#[test]
fn test_all_bounds_unset_on_nonfinite_array_is_an_error() {
    let disparity = ndarray::Array2::<f32>::from_elem((2, 2), f32::NAN);
    let cfg = ColormapConfig {
        colormap: Colormap::Gray,
        vmin: None,
        vmax: None,
    };
    assert!(matches!(
        apply_colormap(&disparity, &cfg),
        Err(ViewerError::InvalidInput(_))
    ));
}
