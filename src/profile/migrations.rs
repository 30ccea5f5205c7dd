//! Schema migrations
//!
//! Files carry a `SchemaVersion` per overlay section. Files written before the
//! key existed get a version inferred from the markers each release left
//! behind. Steps that can't tell migrated values from old ones record the
//! version that made them unnecessary and run only for older files. The rest
//! check the loaded values and run for every file.

use tracing::info;

use crate::config::overlay::{Origin, OverlaySettings};
use crate::constants::overlay::{
    LEGACY_CURVATURE_SENTINEL, LEGACY_DASHBOARD_WIDTH_FACTOR, MIGRATED_CURVATURE,
};
use crate::constants::sections;
use crate::config::GlobalSettings;
use crate::ini::IniDocument;

/// Version written by this release
pub const CURRENT_SCHEMA_VERSION: i32 = 3;

pub const SCHEMA_VERSION_KEY: &str = "SchemaVersion";

/// Version of an overlay section: the explicit key, else inferred. The seated
/// position transform appeared in version 2, `WidthUnscaled` in version 1.
/// An explicit key wins over the markers.
pub fn schema_version(doc: &IniDocument, section: &str) -> i32 {
    if doc.key_exists(section, SCHEMA_VERSION_KEY) {
        return doc.read_int(section, SCHEMA_VERSION_KEY, 0);
    }

    if doc.key_exists(section, Origin::SeatedUniverse.transform_key()) {
        2
    } else if doc.read_bool(section, "WidthUnscaled", false) {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMigration {
    /// Seated origin was inserted at index 2; older origins from there on shift up
    OriginReorder,
    /// -1.0 curvature used to mean "automatic"
    CurvatureSentinel,
    /// Transforms used to carry the overlay scale
    LegacyScale,
}

impl OverlayMigration {
    /// Execution order. Scale folding reads the active origin, so it runs
    /// after the reorder.
    pub const ORDERED: [OverlayMigration; 3] = [
        OverlayMigration::OriginReorder,
        OverlayMigration::CurvatureSentinel,
        OverlayMigration::LegacyScale,
    ];

    /// First schema version that no longer needs this step. `None` for steps
    /// keyed on the loaded values alone; those are idempotent.
    pub fn introduced_in(self) -> Option<i32> {
        match self {
            OverlayMigration::OriginReorder => Some(2),
            OverlayMigration::CurvatureSentinel | OverlayMigration::LegacyScale => None,
        }
    }

    pub fn applies_to(self, version: i32) -> bool {
        self.introduced_in().is_none_or(|introduced| version < introduced)
    }

    /// Apply to a freshly read block. Returns whether anything changed.
    pub fn apply(self, data: &mut OverlaySettings, is_dashboard: bool) -> bool {
        match self {
            OverlayMigration::OriginReorder => {
                if data.detached_origin >= Origin::SeatedUniverse as i32 {
                    data.detached_origin += 1;
                    return true;
                }
                false
            }
            OverlayMigration::CurvatureSentinel => {
                if data.curvature == LEGACY_CURVATURE_SENTINEL {
                    data.curvature = MIGRATED_CURVATURE;
                    return true;
                }
                false
            }
            OverlayMigration::LegacyScale => {
                if data.width_unscaled {
                    return false;
                }

                if is_dashboard {
                    data.width *= LEGACY_DASHBOARD_WIDTH_FACTOR;
                } else {
                    let active = Origin::from_i32(data.detached_origin);
                    for origin in Origin::ALL {
                        let scale = data.detached_transforms[origin.index()].remove_scale();
                        if let Some(scale) = scale
                            && active == Some(origin)
                        {
                            data.width *= scale;
                        }
                    }
                }

                data.width_unscaled = true;
                true
            }
        }
    }
}

/// Run every step that applies to the section's version, in order
pub fn migrate_overlay(data: &mut OverlaySettings, is_dashboard: bool, version: i32) {
    for step in OverlayMigration::ORDERED {
        if step.applies_to(version) && step.apply(data, is_dashboard) {
            info!(step = ?step, version = version, name = %data.name, "Migrated overlay settings");
        }
    }
}

/// Global settings fix-ups. `DimUI` was written from the wrong value until
/// the release that introduced the seated origin, so older files don't get
/// to keep it.
pub fn migrate_global(doc: &IniDocument, global: &mut GlobalSettings) {
    let first_overlay = sections::overlay(0);
    if !doc.key_exists(&first_overlay, Origin::SeatedUniverse.transform_key())
        && global.interface.dim_ui
    {
        info!("Resetting DimUI written by an older release");
        global.interface.dim_ui = false;
    }
}
