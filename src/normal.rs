// SPDX-License-Identifier: GPL-3.0-only

//! Depth-to-normal-map conversion
//!
//! Estimates a per-pixel surface normal from local depth gradients and
//! encodes it as an 8-bit RGB image. Gradients are central differences for
//! interior pixels and one-sided differences on the first/last row and
//! column, so a constant depth array maps to the flat normal everywhere
//! with no border seam.

use crate::errors::{ViewerError, ViewerResult};
use crate::npy;
use image::RgbImage;
use ndarray::Array2;
use std::path::Path;
use tracing::info;

/// Compute the surface-normal image for a depth/height array.
///
/// The normal is the cross product of the surface tangents (1, 0, dz/dx)
/// and (0, 1, dz/dy), i.e. normalize(-dz/dx, -dz/dy, 1), so it always
/// points toward the camera. Pixels with non-finite depth get the flat
/// normal (0, 0, 1). Components are mapped [-1, 1] -> [0, 255], which
/// sends the flat normal to (128, 128, 255).
pub fn normal_map(depth: &Array2<f32>) -> RgbImage {
    let (rows, cols) = depth.dim();
    let mut out = RgbImage::new(cols as u32, rows as u32);

    for row in 0..rows {
        for col in 0..cols {
            let (nx, ny, nz) = if depth[(row, col)].is_finite() {
                let gx = gradient(depth, row, col, Axis::Col);
                let gy = gradient(depth, row, col, Axis::Row);
                normalize(-gx, -gy, 1.0)
            } else {
                (0.0, 0.0, 1.0)
            };
            out.put_pixel(
                col as u32,
                row as u32,
                image::Rgb([encode(nx), encode(ny), encode(nz)]),
            );
        }
    }

    out
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Col,
}

// Central difference where both neighbors exist and are finite, one-sided
// otherwise, zero when no finite neighbor is available.
fn gradient(depth: &Array2<f32>, row: usize, col: usize, axis: Axis) -> f32 {
    let (rows, cols) = depth.dim();
    let (pos, len) = match axis {
        Axis::Row => (row, rows),
        Axis::Col => (col, cols),
    };
    let at = |i: usize| match axis {
        Axis::Row => depth[(i, col)],
        Axis::Col => depth[(row, i)],
    };

    let center = at(pos);
    let prev = (pos > 0).then(|| at(pos - 1)).filter(|v| v.is_finite());
    let next = (pos + 1 < len).then(|| at(pos + 1)).filter(|v| v.is_finite());

    match (prev, next) {
        (Some(p), Some(n)) => (n - p) / 2.0,
        (Some(p), None) => center - p,
        (None, Some(n)) => n - center,
        (None, None) => 0.0,
    }
}

fn normalize(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let len = (x * x + y * y + z * z).sqrt();
    (x / len, y / len, z / len)
}

// [-1,1] -> [0,255] with rounding; 0.0 lands on 128
fn encode(component: f32) -> u8 {
    ((component * 0.5 + 0.5) * 255.0).round() as u8
}

/// Load a depth array, convert it, and write the normal-map image.
///
/// npy inputs go through the array loader (first frame of a stack); any
/// other extension is decoded as an image and its luma taken as height.
pub fn convert(input: &Path, output: &Path) -> ViewerResult<()> {
    let depth = load_depth(input)?;
    let normals = normal_map(&depth);
    normals.save(output)?;
    info!(path = %output.display(), "Normal map written");
    Ok(())
}

fn load_depth(input: &Path) -> ViewerResult<Array2<f32>> {
    if !input.exists() {
        return Err(ViewerError::FileNotFound(input.to_path_buf()));
    }

    if input.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("npy")) {
        let mut frames = npy::load_frames(input)?;
        return Ok(frames.remove(0));
    }

    let gray = image::open(input)?.to_luma8();
    let (width, height) = gray.dimensions();
    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(row, col)| gray.get_pixel(col as u32, row as u32).0[0] as f32,
    ))
}
