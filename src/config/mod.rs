//! Settings store
//!
//! - **overlay**: the per-overlay block and its enums
//! - **global**: application-wide settings groups
//! - **ids**: typed identifiers and their wire parameters
//! - **collection**: the overlay list (dashboard at index 0)
//! - **context**: [`ConfigContext`], owner of all of the above

pub mod collection;
pub mod context;
pub mod global;
pub mod ids;
pub mod overlay;

pub use collection::OverlayCollection;
pub use context::ConfigContext;
pub use global::GlobalSettings;
pub use ids::{BoolId, FloatId, HandleId, IntId, SettingId, StrId, WireId};
pub use overlay::{CaptureSource, Origin, OverlaySettings};
