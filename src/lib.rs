//! Settings persistence for a VR desktop-overlay application
//!
//! - **config**: typed settings store and [`ConfigContext`]
//! - **profile**: INI profile codec, migrations and profile files
//! - **ini**: the INI document the codec reads and writes
//! - **host**: collaborators the settings layer consumes
//! - **ipc**: best-effort settings notifications

#![forbid(unsafe_code)]

pub mod actions;
pub mod config;
pub mod constants;
pub mod environment;
pub mod host;
pub mod ini;
pub mod ipc;
pub mod matrix;
pub mod profile;

pub use config::ConfigContext;
