// SPDX-License-Identifier: GPL-3.0-only

//! Per-invocation configuration passed into the processing functions
//!
//! There is no persisted configuration; everything comes from the command
//! line and lives for a single run.

use crate::colormap::Colormap;
use crate::constants::DEFAULT_WAIT_SECS;
use std::time::Duration;

/// Normalization bounds and colormap selection for the mapper.
///
/// A bound left as None falls back to the array's finite minimum/maximum
/// at apply time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColormapConfig {
    pub colormap: Colormap,
    /// Values at or below vmin take the first colormap entry
    pub vmin: Option<f32>,
    /// Values at or above vmax take the last colormap entry
    pub vmax: Option<f32>,
}

/// Full viewer configuration for one invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub colormap: ColormapConfig,
    /// How long each frame stays on screen before advancing
    pub wait: Duration,
    /// Build a 3D point cloud for each frame
    pub show_3d: bool,
    /// Write colored images (and clouds, with show_3d) to disk
    pub save: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            colormap: ColormapConfig::default(),
            wait: Duration::from_secs(DEFAULT_WAIT_SECS),
            show_3d: false,
            save: false,
        }
    }
}
