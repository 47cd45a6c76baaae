// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depthview")]
#[command(about = "Viewer and conversion tools for stereo disparity/depth npy captures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// View the frames of a capture directory (left + zed-disparity)
    View {
        /// Directory written by the stereo capture tool
        captured_dir: PathBuf,

        /// Wait seconds per frame
        #[arg(long, default_value_t = depthview::constants::DEFAULT_WAIT_SECS)]
        sec: u64,

        /// Max value for color normalization
        #[arg(long, default_value_t = depthview::constants::DEFAULT_VMAX)]
        vmax: f32,

        /// Min value for color normalization
        #[arg(long, default_value_t = depthview::constants::DEFAULT_VMIN)]
        vmin: f32,

        /// Build a 3D point cloud per frame
        #[arg(long)]
        disp3d: bool,

        /// Save colored images (and clouds, with --disp3d)
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        colormap: ColormapArgs,
    },

    /// View a single npy array file
    Npy {
        /// Array file holding one frame or a frame stack
        file: PathBuf,

        /// Max value for color normalization (default: finite max of the array)
        #[arg(long)]
        vmax: Option<f32>,

        /// Min value for color normalization (default: finite min of the array)
        #[arg(long)]
        vmin: Option<f32>,

        /// Build a 3D point cloud per frame
        #[arg(long)]
        disp3d: bool,

        /// Save colored images (and clouds, with --disp3d) next to the input
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        colormap: ColormapArgs,
    },

    /// Convert a depth array to a surface-normal image
    Normal {
        /// Depth input: npy array, or any image read as height values
        #[arg(long)]
        input: PathBuf,

        /// Where to write the normal-map image
        #[arg(long = "output_path", default_value = "normal_map.png")]
        output_path: PathBuf,
    },
}

/// Mutually exclusive colormap selection flags
#[derive(Args)]
#[group(multiple = false)]
struct ColormapArgs {
    /// gray colormap
    #[arg(long)]
    gray: bool,

    /// jet colormap (default)
    #[arg(long)]
    jet: bool,

    /// inferno colormap
    #[arg(long)]
    inferno: bool,
}

impl ColormapArgs {
    fn colormap(&self) -> depthview::Colormap {
        if self.gray {
            depthview::Colormap::Gray
        } else if self.inferno {
            depthview::Colormap::Inferno
        } else {
            depthview::Colormap::Jet
        }
    }
}

fn main() {
    // Initialize logging; set RUST_LOG to control the level,
    // e.g. RUST_LOG=debug or RUST_LOG=depthview=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View {
            captured_dir,
            sec,
            vmax,
            vmin,
            disp3d,
            save,
            colormap,
        } => cli::view_directory(&captured_dir, sec, vmin, vmax, colormap.colormap(), disp3d, save),
        Commands::Npy {
            file,
            vmax,
            vmin,
            disp3d,
            save,
            colormap,
        } => cli::view_file(&file, vmin, vmax, colormap.colormap(), disp3d, save),
        Commands::Normal { input, output_path } => cli::normal_map(&input, &output_path),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
