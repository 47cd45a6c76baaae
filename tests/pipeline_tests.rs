// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end tests for frame discovery and the processing pipeline

use depthview::colormap::apply_colormap;
use depthview::config::{ColormapConfig, ViewConfig};
use depthview::constants::CameraIntrinsics;
use depthview::errors::ViewerError;
use depthview::pipeline::{collect_frames, process_file, process_frame};
use depthview::{Colormap, npy};
use ndarray::{Array2, Array3};
use std::path::Path;

const TEST_INTRINSICS: CameraIntrinsics = CameraIntrinsics {
    fx: 1000.0,
    fy: 1000.0,
    cx: 2.0,
    cy: 2.0,
    baseline: 0.12,
};

fn capture_config() -> ViewConfig {
    ViewConfig {
        colormap: ColormapConfig {
            colormap: Colormap::Jet,
            vmin: Some(0.0),
            vmax: Some(5000.0),
        },
        show_3d: true,
        save: true,
        ..ViewConfig::default()
    }
}

/// Lay out a minimal capture: one left PNG and one (4,4) disparity of 2s
fn write_capture(dir: &Path) {
    let left_dir = dir.join("left");
    let disp_dir = dir.join("zed-disparity");
    std::fs::create_dir_all(&left_dir).unwrap();
    std::fs::create_dir_all(&disp_dir).unwrap();

    let left = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
    left.save(left_dir.join("left_00000.png")).unwrap();

    let disparity = Array2::from_elem((4, 4), 2.0_f32);
    ndarray_npy::write_npy(disp_dir.join("zeddisp_00000.npy"), &disparity).unwrap();
}

#[test]
fn test_collect_frames_pairs_left_and_disparity() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path());

    let frames = collect_frames(dir.path()).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].disparity_path.ends_with("zeddisp_00000.npy"));
    assert!(
        frames[0]
            .left_path
            .as_ref()
            .unwrap()
            .ends_with("left_00000.png")
    );
}

#[test]
fn test_missing_directory_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = collect_frames(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, ViewerError::FileNotFound(_)));
}

#[test]
fn test_empty_capture_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("zed-disparity")).unwrap();
    let err = collect_frames(dir.path()).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidInput(_)));
}

#[test]
fn test_process_frame_end_to_end_with_save() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path());

    let frames = collect_frames(dir.path()).unwrap();
    let processed =
        process_frame(&frames[0], &capture_config(), &TEST_INTRINSICS, dir.path()).unwrap();

    // left (4 wide) composed beside the colored disparity (4 wide)
    assert_eq!(processed.display.width(), 8);
    assert_eq!(processed.display.height(), 4);

    // every pixel of the 4x4 grid reprojects (disparity 2 > 0, z = 60)
    assert_eq!(processed.point_count, Some(16));

    // one colored image + one cloud written
    assert_eq!(processed.saved.len(), 2);
    let colored = &processed.saved[0];
    let cloud = &processed.saved[1];
    assert!(colored.exists());
    assert!(cloud.exists());
    assert_eq!(colored.parent().unwrap(), dir.path().join("colored"));
    assert_eq!(cloud.parent().unwrap(), dir.path().join("cloud"));
}

#[test]
fn test_saved_image_round_trips_losslessly() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path());

    let config = capture_config();
    let frames = collect_frames(dir.path()).unwrap();
    let processed = process_frame(&frames[0], &config, &TEST_INTRINSICS, dir.path()).unwrap();

    let disparity = Array2::from_elem((4, 4), 2.0_f32);
    let expected = apply_colormap(&disparity, &config.colormap).unwrap();
    let reloaded = image::open(&processed.saved[0]).unwrap().to_rgb8();
    assert_eq!(reloaded.as_raw(), expected.as_raw());
}

#[test]
fn test_corrupt_npy_aborts_the_frame() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path());
    std::fs::write(dir.path().join("zed-disparity/zeddisp_00000.npy"), b"junk").unwrap();

    let frames = collect_frames(dir.path()).unwrap();
    let err = process_frame(&frames[0], &capture_config(), &TEST_INTRINSICS, dir.path())
        .unwrap_err();
    assert!(matches!(err, ViewerError::InvalidFormat(_)));
}

#[test]
fn test_process_file_handles_frame_stacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack.npy");
    let stack = Array3::from_shape_fn((3, 4, 4), |(frame, _, _)| 1.0 + frame as f32);
    ndarray_npy::write_npy(&path, &stack).unwrap();

    let config = ViewConfig {
        colormap: ColormapConfig {
            colormap: Colormap::Gray,
            vmin: Some(0.0),
            vmax: Some(4.0),
        },
        save: true,
        ..ViewConfig::default()
    };
    let processed = process_file(&path, &config, &TEST_INTRINSICS).unwrap();
    assert_eq!(processed.len(), 3);
    for (i, frame) in processed.iter().enumerate() {
        assert_eq!(frame.name, format!("stack_{i:05}"));
        assert!(frame.saved[0].exists());
    }
}

#[test]
fn test_load_frames_rejects_1d_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.npy");
    let flat = ndarray::Array1::<f32>::zeros(16);
    ndarray_npy::write_npy(&path, &flat).unwrap();

    let err = npy::load_frames(&path).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidFormat(_)));
}

#[test]
fn test_load_frames_accepts_f64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("double.npy");
    let array = Array2::from_elem((2, 3), 1.5_f64);
    ndarray_npy::write_npy(&path, &array).unwrap();

    let frames = npy::load_frames(&path).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].dim(), (2, 3));
    assert_eq!(frames[0][(1, 2)], 1.5);
}

#[test]
fn test_load_frames_squeezes_channel_first_captures() {
    // ZED tooling saves (1, H, W); the viewer should see one (H, W) frame
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chw.npy");
    let array = Array3::<f32>::zeros((1, 5, 6));
    ndarray_npy::write_npy(&path, &array).unwrap();

    let frames = npy::load_frames(&path).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].dim(), (5, 6));
}
