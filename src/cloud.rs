// SPDX-License-Identifier: GPL-3.0-only

//! Disparity-to-3D reprojection and LAS point cloud export

use crate::constants::CameraIntrinsics;
use crate::errors::{ViewerError, ViewerResult};
use image::RgbImage;
use las::{Builder, Color, Point, Writer};
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info};

/// One reprojected pixel, with optional color from the left image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: Option<[u8; 3]>,
}

/// Depth along the optical axis for one disparity sample [m].
///
/// Returns None for zero, negative, or non-finite disparity (invalid
/// stereo geometry).
pub fn disparity_to_depth(disparity: f32, intrinsics: &CameraIntrinsics) -> Option<f32> {
    if !disparity.is_finite() || disparity <= 0.0 {
        return None;
    }
    Some(intrinsics.baseline * intrinsics.fx / disparity)
}

/// Reproject a disparity array to 3D points via pinhole back-projection.
///
/// Pixels with disparity <= 0 (or NaN/±inf) produce no point. The frame is
/// y-up: y is negated relative to image row order. When a color image is
/// given, each point samples it; a resolution mismatch falls back to simple
/// scale mapping.
pub fn disparity_to_points(
    disparity: &Array2<f32>,
    intrinsics: &CameraIntrinsics,
    color: Option<&RgbImage>,
) -> Vec<CloudPoint> {
    let (rows, cols) = disparity.dim();
    let mut points = Vec::new();

    for ((row, col), &d) in disparity.indexed_iter() {
        let Some(depth) = disparity_to_depth(d, intrinsics) else {
            continue;
        };

        let x = ((col as f32 - intrinsics.cx) * depth / intrinsics.fx) as f64;
        let y = -((row as f32 - intrinsics.cy) * depth / intrinsics.fy) as f64;
        let z = depth as f64;

        let color = color.map(|img| sample_color(img, col, row, cols, rows));

        points.push(CloudPoint { x, y, z, color });
    }

    points
}

fn sample_color(img: &RgbImage, col: usize, row: usize, cols: usize, rows: usize) -> [u8; 3] {
    let x = if img.width() as usize != cols {
        ((col as f32 * img.width() as f32 / cols as f32) as u32).min(img.width() - 1)
    } else {
        col as u32
    };
    let y = if img.height() as usize != rows {
        ((row as f32 * img.height() as f32 / rows as f32) as u32).min(img.height() - 1)
    } else {
        row as u32
    };
    img.get_pixel(x, y).0
}

/// Write a point cloud as an uncompressed LAS 1.4 file.
///
/// Coordinates are stored with 1 mm precision, offset to the center of the
/// bounding box. An empty cloud is an InvalidInput error.
pub fn write_las(points: &[CloudPoint], output_path: &Path) -> ViewerResult<()> {
    if points.is_empty() {
        return Err(ViewerError::InvalidInput(
            "no valid disparity pixels to export".to_string(),
        ));
    }

    let has_color = points.iter().any(|p| p.color.is_some());

    info!(
        point_count = points.len(),
        path = %output_path.display(),
        "Exporting point cloud"
    );

    // Bounds for the LAS header transforms
    let (min_x, max_x) = points
        .iter()
        .map(|p| p.x)
        .fold((f64::MAX, f64::MIN), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    let (min_y, max_y) = points
        .iter()
        .map(|p| p.y)
        .fold((f64::MAX, f64::MIN), |(min, max), y| {
            (min.min(y), max.max(y))
        });
    let (min_z, max_z) = points
        .iter()
        .map(|p| p.z)
        .fold((f64::MAX, f64::MIN), |(min, max), z| {
            (min.min(z), max.max(z))
        });

    let mut builder = Builder::from((1, 4));
    builder.point_format.has_color = has_color;
    builder.point_format.is_compressed = false;

    let scale = 0.001; // 1mm precision
    builder.transforms = las::Vector {
        x: las::Transform {
            scale,
            offset: (min_x + max_x) / 2.0,
        },
        y: las::Transform {
            scale,
            offset: (min_y + max_y) / 2.0,
        },
        z: las::Transform {
            scale,
            offset: (min_z + max_z) / 2.0,
        },
    };

    let header = builder.into_header()?;
    let mut writer = Writer::from_path(output_path, header)?;

    for p in points {
        let mut point = Point::default();
        point.x = p.x;
        point.y = p.y;
        point.z = p.z;
        if has_color {
            let [r, g, b] = p.color.unwrap_or([128, 128, 128]);
            // LAS color channels are 16-bit
            point.color = Some(Color::new(
                r as u16 * 256,
                g as u16 * 256,
                b as u16 * 256,
            ));
        }
        writer.write_point(point)?;
    }

    writer.close()?;

    debug!(path = %output_path.display(), "LAS export complete");

    Ok(())
}
