// SPDX-License-Identifier: GPL-3.0-only

//! Loading disparity/depth arrays from npy files

use crate::errors::{ViewerError, ViewerResult};
use ndarray::{Array2, ArrayD, Ix2};
use ndarray_npy::ReadNpyExt;
use std::fs::File;
use std::path::Path;

/// Load the frames stored in an npy file.
///
/// A 2D array is a single frame; a 3D array is treated as a stack of frames
/// along the outer axis, which also covers (1, H, W) channel-first captures.
/// f64 payloads are accepted and narrowed to f32. Any other shape or dtype
/// is an InvalidFormat error.
pub fn load_frames(path: &Path) -> ViewerResult<Vec<Array2<f32>>> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound(path.to_path_buf()));
    }

    let array = read_f32(path)?;
    match array.ndim() {
        2 => {
            let frame = array
                .into_dimensionality::<Ix2>()
                .map_err(|e| ViewerError::InvalidFormat(e.to_string()))?;
            Ok(vec![frame])
        }
        3 => {
            let frames: Vec<Array2<f32>> = array
                .outer_iter()
                .map(|frame| {
                    // outer_iter of a 3D array yields 2D views
                    frame
                        .to_owned()
                        .into_dimensionality::<Ix2>()
                        .expect("outer slice of a 3D array is 2D")
                })
                .collect();
            if frames.is_empty() {
                return Err(ViewerError::InvalidFormat(format!(
                    "{}: array has no frames",
                    path.display()
                )));
            }
            Ok(frames)
        }
        n => Err(ViewerError::InvalidFormat(format!(
            "{}: expected a 2D or 3D array, got {} dimensions",
            path.display(),
            n
        ))),
    }
}

fn read_f32(path: &Path) -> ViewerResult<ArrayD<f32>> {
    let file = File::open(path)?;
    match ArrayD::<f32>::read_npy(file) {
        Ok(array) => Ok(array),
        Err(first_err) => {
            // ZED captures are f32, but accept f64 arrays saved elsewhere
            let file = File::open(path)?;
            match ArrayD::<f64>::read_npy(file) {
                Ok(array) => Ok(array.mapv(|v| v as f32)),
                Err(_) => Err(ViewerError::InvalidFormat(format!(
                    "{}: {}",
                    path.display(),
                    first_err
                ))),
            }
        }
    }
}

/// Smallest finite value in the array, ignoring NaN/±inf
pub fn finite_min(array: &Array2<f32>) -> Option<f32> {
    array
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .min_by(|a, b| a.total_cmp(b))
}

/// Largest finite value in the array, ignoring NaN/±inf
pub fn finite_max(array: &Array2<f32>) -> Option<f32> {
    array
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .max_by(|a, b| a.total_cmp(b))
}
