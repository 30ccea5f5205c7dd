//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and maintain overlay settings and profiles
#[derive(Parser, Debug)]
#[command(name = "overlay-settings")]
#[command(version)]
pub struct Cli {
    /// Application directory holding config.ini and profiles/
    ///
    /// Defaults to OVERLAY_APP_DIR, then the executable's directory.
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// Notify the rendering process about loaded settings
    #[arg(long)]
    pub notify: bool,

    /// Config socket used with --notify (defaults to the runtime dir socket)
    #[arg(long, env = "OVERLAY_NOTIFY_SOCKET")]
    pub notify_socket: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the loaded settings as JSON
    Show,

    /// List overlay profiles
    Profiles {
        /// List multi-overlay profiles instead
        #[arg(long)]
        multi: bool,
    },

    /// Load the config and write it back, applying migrations
    Migrate,

    /// Delete config.ini and fall back to the bundled defaults
    #[command(name = "restore-defaults")]
    RestoreDefaults,

    /// Save one overlay as a single-overlay profile
    #[command(name = "export-profile")]
    ExportProfile {
        name: String,

        /// Overlay to export (defaults to the current overlay)
        #[arg(short = 'o', long)]
        overlay: Option<usize>,
    },

    /// Load a single-overlay profile into an overlay and save the config
    #[command(name = "import-profile")]
    ImportProfile {
        /// Profile name, or "Default"
        name: String,

        /// Target overlay (defaults to the current overlay)
        #[arg(short = 'o', long)]
        overlay: Option<usize>,
    },

    /// Save all overlays as a multi-overlay profile
    #[command(name = "export-multi")]
    ExportMulti { name: String },

    /// Load a multi-overlay profile and save the config
    #[command(name = "import-multi")]
    ImportMulti {
        /// Profile name, or "Default"
        name: String,

        /// Append the profile's overlays instead of replacing them
        #[arg(long)]
        keep_existing: bool,
    },

    /// Delete a stored profile
    #[command(name = "delete-profile")]
    DeleteProfile {
        name: String,

        #[arg(long)]
        multi: bool,
    },
}
