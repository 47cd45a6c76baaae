// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants and camera parameters

/// Pinhole intrinsics plus stereo baseline for the rectified left camera.
///
/// The projector only needs fx/fy/cx/cy and the baseline; distortion is
/// already removed from rectified captures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length in pixels, horizontal
    pub fx: f32,
    /// Focal length in pixels, vertical
    pub fy: f32,
    /// Principal point x [pixel]
    pub cx: f32,
    /// Principal point y [pixel]
    pub cy: f32,
    /// Stereo baseline [m]
    pub baseline: f32,
}

/// ZED 2i left camera, HD resolution ([LEFT_CAM_HD] in the factory
/// calibration file), 120 mm baseline.
pub const ZED_HD_LEFT: CameraIntrinsics = CameraIntrinsics {
    fx: 532.41,
    fy: 532.535,
    cx: 636.025,
    cy: 362.4065,
    baseline: 0.12,
};

/// Default lower bound for colormap normalization
pub const DEFAULT_VMIN: f32 = 0.0;
/// Default upper bound for colormap normalization
pub const DEFAULT_VMAX: f32 = 5000.0;
/// Default per-frame wait in the directory viewer [s]
pub const DEFAULT_WAIT_SECS: u64 = 1;

/// Capture directory layout produced by the stereo capture tool (the
/// right-image subdirectory exists on disk but the viewer never reads it)
pub const LEFT_SUBDIR: &str = "left";
pub const DISPARITY_SUBDIR: &str = "zed-disparity";

/// Subdirectories for artifacts written by --save
pub const COLORED_SUBDIR: &str = "colored";
pub const CLOUD_SUBDIR: &str = "cloud";
