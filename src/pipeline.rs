// SPDX-License-Identifier: GPL-3.0-only

//! Frame discovery and per-frame processing
//!
//! Everything the viewer does apart from drawing lives here, so the whole
//! load -> colormap -> reproject -> save pipeline runs headless in tests.

use crate::cloud;
use crate::colormap::apply_colormap;
use crate::config::ViewConfig;
use crate::constants::{
    CLOUD_SUBDIR, COLORED_SUBDIR, CameraIntrinsics, DISPARITY_SUBDIR, LEFT_SUBDIR,
};
use crate::errors::{ViewerError, ViewerResult};
use crate::npy;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One capture frame: a disparity npy and, when present, the matching
/// rectified left image
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSource {
    pub disparity_path: PathBuf,
    pub left_path: Option<PathBuf>,
}

/// Result of processing one frame
#[derive(Debug)]
pub struct ProcessedFrame {
    /// Frame label for the status bar (disparity file stem)
    pub name: String,
    /// Colored disparity, with the left image composed alongside when present
    pub display: RgbImage,
    /// Number of reprojected points, when 3D was requested
    pub point_count: Option<usize>,
    /// Artifacts written by --save
    pub saved: Vec<PathBuf>,
}

/// Pair up disparity npys with left images in a capture directory.
///
/// Both listings are sorted by filename; the capture tool writes matching
/// frame counters into both names, so index-wise pairing is exact. Extra
/// left images without a disparity file are ignored.
pub fn collect_frames(captured_dir: &Path) -> ViewerResult<Vec<FrameSource>> {
    if !captured_dir.is_dir() {
        return Err(ViewerError::FileNotFound(captured_dir.to_path_buf()));
    }

    let disparity_dir = captured_dir.join(DISPARITY_SUBDIR);
    if !disparity_dir.is_dir() {
        return Err(ViewerError::FileNotFound(disparity_dir));
    }

    let disparities = sorted_files(&disparity_dir, "npy")?;
    if disparities.is_empty() {
        return Err(ViewerError::InvalidInput(format!(
            "no npy files under {}",
            disparity_dir.display()
        )));
    }

    let lefts = sorted_files(&captured_dir.join(LEFT_SUBDIR), "png").unwrap_or_default();
    if lefts.len() != disparities.len() {
        warn!(
            left = lefts.len(),
            disparity = disparities.len(),
            "left image and disparity counts differ"
        );
    }

    Ok(disparities
        .into_iter()
        .enumerate()
        .map(|(i, disparity_path)| FrameSource {
            disparity_path,
            left_path: lefts.get(i).cloned(),
        })
        .collect())
}

fn sorted_files(dir: &Path, extension: &str) -> ViewerResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Process one frame end to end.
///
/// Loads the disparity array (first frame of a stack) and the left image,
/// applies the colormap, optionally reprojects to 3D, and writes artifacts
/// when saving is on. Any failure aborts the frame with an error.
pub fn process_frame(
    source: &FrameSource,
    config: &ViewConfig,
    intrinsics: &CameraIntrinsics,
    out_dir: &Path,
) -> ViewerResult<ProcessedFrame> {
    let name = source
        .disparity_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());

    debug!(frame = %name, "Processing frame");

    let mut frames = npy::load_frames(&source.disparity_path)?;
    let disparity = frames.remove(0);

    let left = match &source.left_path {
        Some(path) => Some(image::open(path)?.to_rgb8()),
        None => None,
    };

    let colored = apply_colormap(&disparity, &config.colormap)?;
    let display = match &left {
        Some(left) => side_by_side(left, &colored),
        None => colored.clone(),
    };

    let mut saved = Vec::new();
    let mut point_count = None;

    if config.save {
        let colored_dir = out_dir.join(COLORED_SUBDIR);
        std::fs::create_dir_all(&colored_dir)?;
        let path = colored_dir.join(format!("{name}.png"));
        colored.save(&path)?;
        saved.push(path);
    }

    if config.show_3d {
        let points = cloud::disparity_to_points(&disparity, intrinsics, left.as_ref());
        point_count = Some(points.len());
        if config.save {
            let cloud_dir = out_dir.join(CLOUD_SUBDIR);
            std::fs::create_dir_all(&cloud_dir)?;
            let path = cloud_dir.join(format!("{name}.las"));
            cloud::write_las(&points, &path)?;
            saved.push(path);
        }
    }

    Ok(ProcessedFrame {
        name,
        display,
        point_count,
        saved,
    })
}

/// Process the frames of a single npy file (no left image).
///
/// Saved artifacts land next to the input, named after its stem.
pub fn process_file(
    path: &Path,
    config: &ViewConfig,
    intrinsics: &CameraIntrinsics,
) -> ViewerResult<Vec<ProcessedFrame>> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let out_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    let frames = npy::load_frames(path)?;
    let multi = frames.len() > 1;

    frames
        .into_iter()
        .enumerate()
        .map(|(i, disparity)| {
            let name = if multi {
                format!("{stem}_{i:05}")
            } else {
                stem.clone()
            };

            let colored = apply_colormap(&disparity, &config.colormap)?;

            let mut saved = Vec::new();
            let mut point_count = None;

            if config.save {
                let out = out_dir.join(format!("{name}_colored.png"));
                colored.save(&out)?;
                saved.push(out);
            }

            if config.show_3d {
                let points = cloud::disparity_to_points(&disparity, intrinsics, None);
                point_count = Some(points.len());
                if config.save {
                    let out = out_dir.join(format!("{name}.las"));
                    cloud::write_las(&points, &out)?;
                    saved.push(out);
                }
            }

            Ok(ProcessedFrame {
                name,
                display: colored,
                point_count,
                saved,
            })
        })
        .collect()
}

/// Compose two images side by side on a shared canvas.
///
/// The original viewer asserts equal shapes; captures occasionally disagree
/// by a few rows, so pad to the taller of the two instead of refusing.
fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::new(width, height);
    for (x, y, pixel) in left.enumerate_pixels() {
        canvas.put_pixel(x, y, *pixel);
    }
    for (x, y, pixel) in right.enumerate_pixels() {
        canvas.put_pixel(left.width() + x, y, *pixel);
    }
    canvas
}
