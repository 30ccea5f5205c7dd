//! Application-wide constants
//!
//! File names, INI section names and the numeric defaults shared by the
//! profile codec. Keeping them here gives a single source of truth for values
//! that must match existing profile files exactly.

/// Filesystem layout below the application directory
pub mod paths {
    /// Main configuration file
    pub const CONFIG_FILE: &str = "config.ini";

    /// Renamed config left behind by newer releases; preferred when present
    pub const CONFIG_LEGACY_FILE: &str = "config_legacy.ini";

    /// Bundled defaults used when no user config exists
    pub const CONFIG_DEFAULT_FILE: &str = "config_default.ini";

    /// Single-overlay profile directory
    pub const OVERLAY_PROFILES_DIR: &str = "profiles/overlays";

    /// Multi-overlay profile directory
    pub const MULTI_OVERLAY_PROFILES_DIR: &str = "profiles/multi-overlays";

    /// Profile file extension (without dot)
    pub const PROFILE_EXTENSION: &str = "ini";

    /// Fallback directory name under the platform config dir
    pub const APP_DIR: &str = "overlay-settings";

    /// Environment variable overriding the application directory
    pub const APP_DIR_ENV: &str = "OVERLAY_APP_DIR";
}

/// INI section names
pub mod sections {
    /// Section used by single-overlay profile files and pre-multi-overlay configs
    pub const OVERLAY_SINGLE: &str = "Overlay";
    pub const INTERFACE: &str = "Interface";
    pub const INPUT: &str = "Input";
    pub const MOUSE: &str = "Mouse";
    pub const KEYBOARD: &str = "Keyboard";
    pub const WINDOWS: &str = "Windows";
    pub const PERFORMANCE: &str = "Performance";
    pub const MISC: &str = "Misc";
    pub const CUSTOM_ACTIONS: &str = "CustomActions";

    /// Section name for an indexed overlay (`Overlay0`, `Overlay1`, ...)
    pub fn overlay(index: usize) -> String {
        format!("{OVERLAY_SINGLE}{index}")
    }
}

/// Entries shown around the profile file names in profile listings
pub mod listing {
    pub const DEFAULT_ENTRY: &str = "Default";
    pub const NEW_PROFILE_ENTRY: &str = "[New Profile]";
}

/// Overlay defaults and migration constants
pub mod overlay {
    /// Index of the dashboard overlay, always present
    pub const DASHBOARD_ID: usize = 0;

    /// Desktop id meaning "not chosen yet"
    pub const DESKTOP_ID_UNSET: i32 = -2;

    /// Desktop id of the combined desktop
    pub const DESKTOP_ID_COMBINED: i32 = -1;

    /// Default width in percent of a meter, before legacy rescaling
    pub const DEFAULT_WIDTH_PERCENT: i32 = 350;

    /// Width seeded for non-dashboard overlays by the single-overlay default profile
    pub const DEFAULT_PROFILE_WIDTH_PERCENT: i32 = 165;

    pub const DEFAULT_CURVATURE_PERCENT: i32 = 17;

    /// Curvature value that older versions used as "unset"
    pub const LEGACY_CURVATURE_SENTINEL: f32 = -1.0;

    /// Replacement for the legacy sentinel, close to the default dashboard curvature
    pub const MIGRATED_CURVATURE: f32 = 0.17;

    /// Approximate dashboard scale folded into old dashboard widths
    pub const LEGACY_DASHBOARD_WIDTH_FACTOR: f32 = 0.4725;
}

/// Global defaults
pub mod global {
    /// Default environment background color (RGBA hex)
    pub const DEFAULT_BACKGROUND_COLOR: &str = "00000080";

    /// Value meaning "not a WMR system"; never written back to the file
    pub const WMR_IGNORE_VSCREENS_UNSET: i32 = -1;
}

/// Process and capability detection
pub mod environment {
    /// Lowercased install path fragment of the Steam distribution
    pub const STEAM_INSTALL_FRAGMENT: &str = "steamapps/common/desktopplus/desktopplus";

    /// Marker searched in the executable manifest
    pub const UI_ACCESS_MARKER: &str = "uiAccess=\"true\"";
}
