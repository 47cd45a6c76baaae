// SPDX-License-Identifier: GPL-3.0-only

//! depthview - viewer and conversion tools for stereo disparity/depth captures
//!
//! This library provides the processing behind the `depthview` command line
//! tools: loading disparity/depth arrays from npy captures, pseudo-color
//! rendering, 3D reprojection, and normal-map conversion.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`npy`]: npy array loading and finite-range helpers
//! - [`colormap`]: scalar-to-RGB pseudo-color mapping
//! - [`cloud`]: disparity-to-3D reprojection and LAS export
//! - [`normal`]: depth-to-normal-map conversion
//! - [`pipeline`]: frame discovery and per-frame processing
//! - [`viewer`]: terminal rendering loop
//! - [`config`]: per-invocation configuration structs
//! - [`errors`]: the error taxonomy shared by all tools

pub mod cloud;
pub mod colormap;
pub mod config;
pub mod constants;
pub mod errors;
pub mod normal;
pub mod npy;
pub mod pipeline;
pub mod viewer;

// Re-export commonly used types
pub use colormap::Colormap;
pub use config::{ColormapConfig, ViewConfig};
pub use constants::CameraIntrinsics;
pub use errors::{ViewerError, ViewerResult};
