//! Profile codec
//!
//! Moves settings between [`ConfigContext`](crate::config::ConfigContext) and
//! INI documents. Loading never fails: every key has a default, and values
//! written by older releases are migrated on the way in. Saving always writes
//! the full key set.

pub mod files;
pub mod global;
pub mod migrations;
pub mod overlay;

pub use migrations::CURRENT_SCHEMA_VERSION;
pub use overlay::OverlaySection;
