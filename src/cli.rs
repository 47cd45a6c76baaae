// SPDX-License-Identifier: GPL-3.0-only

//! CLI command implementations
//!
//! Thin assembly of configuration structs around the library calls; all
//! validation beyond flag parsing happens in the library.

use depthview::config::{ColormapConfig, ViewConfig};
use depthview::constants::ZED_HD_LEFT;
use depthview::errors::ViewerResult;
use depthview::{Colormap, normal, viewer};
use std::path::Path;
use std::time::Duration;

/// `depthview view`: directory viewer with a per-frame timer
pub fn view_directory(
    captured_dir: &Path,
    sec: u64,
    vmin: f32,
    vmax: f32,
    colormap: Colormap,
    disp3d: bool,
    save: bool,
) -> ViewerResult<()> {
    let config = ViewConfig {
        colormap: ColormapConfig {
            colormap,
            vmin: Some(vmin),
            vmax: Some(vmax),
        },
        wait: Duration::from_secs(sec),
        show_3d: disp3d,
        save,
    };
    viewer::view_directory(captured_dir, &config, &ZED_HD_LEFT)
}

/// `depthview npy`: single-file viewer, advancing on keypress
pub fn view_file(
    file: &Path,
    vmin: Option<f32>,
    vmax: Option<f32>,
    colormap: Colormap,
    disp3d: bool,
    save: bool,
) -> ViewerResult<()> {
    let config = ViewConfig {
        colormap: ColormapConfig {
            colormap,
            vmin,
            vmax,
        },
        show_3d: disp3d,
        save,
        ..ViewConfig::default()
    };
    viewer::view_file(file, &config, &ZED_HD_LEFT)
}

/// `depthview normal`: depth-to-normal-map conversion
pub fn normal_map(input: &Path, output_path: &Path) -> ViewerResult<()> {
    normal::convert(input, output_path)
}
