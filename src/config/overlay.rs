//! Per-overlay settings block

use serde::{Deserialize, Serialize};

use crate::actions::ActionBarEntry;
use crate::constants::overlay::{DASHBOARD_ID, DESKTOP_ID_COMBINED};
use crate::host::WindowHandle;
use crate::matrix::Matrix4;

/// Spatial origin an overlay can be detached to. The discriminant is the
/// value stored in `DetachedOrigin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Room = 0,
    HmdFloor = 1,
    SeatedUniverse = 2,
    Dashboard = 3,
    Hmd = 4,
    RightHand = 5,
    LeftHand = 6,
    Aux = 7,
}

impl Origin {
    pub const COUNT: usize = 8;

    pub const ALL: [Origin; Origin::COUNT] = [
        Origin::Room,
        Origin::HmdFloor,
        Origin::SeatedUniverse,
        Origin::Dashboard,
        Origin::Hmd,
        Origin::RightHand,
        Origin::LeftHand,
        Origin::Aux,
    ];

    pub fn from_i32(value: i32) -> Option<Origin> {
        usize::try_from(value).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Profile key holding this origin's detached transform
    pub fn transform_key(self) -> &'static str {
        match self {
            Origin::Room => "DetachedTransformPlaySpace",
            Origin::HmdFloor => "DetachedTransformHMDFloor",
            Origin::SeatedUniverse => "DetachedTransformSeatedPosition",
            Origin::Dashboard => "DetachedTransformDashboard",
            Origin::Hmd => "DetachedTransformHMD",
            Origin::RightHand => "DetachedTransformRightHand",
            Origin::LeftHand => "DetachedTransformLeftHand",
            Origin::Aux => "DetachedTransformAux",
        }
    }
}

/// Where an overlay's image comes from (`CaptureSource`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSource {
    DesktopDuplication = 0,
    WinRtCapture = 1,
    /// Rendered by the UI process (performance monitor)
    Ui = 2,
}

impl CaptureSource {
    pub fn from_i32(value: i32) -> Option<CaptureSource> {
        match value {
            0 => Some(CaptureSource::DesktopDuplication),
            1 => Some(CaptureSource::WinRtCapture),
            2 => Some(CaptureSource::Ui),
            _ => None,
        }
    }
}

/// Display mode value meaning "always visible"
pub const DISPLAY_MODE_ALWAYS: i32 = 0;
/// Update limiter mode value meaning "off"
pub const UPDATE_LIMIT_MODE_OFF: i32 = 0;
/// Update limiter FPS choice for 30 fps
pub const UPDATE_LIMIT_FPS_30: i32 = 7;
/// 3D mode value meaning "no stereo"
pub const THREE_D_MODE_NONE: i32 = 0;

/// Settings of a single overlay.
///
/// A freshly constructed block is all-false / -1 / 0.0 with zero transforms;
/// loading a profile (even an empty one) replaces these with real defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub name: String,

    pub name_custom: bool,
    pub enabled: bool,
    /// Transforms no longer carry the overlay scale (set since schema v1)
    pub width_unscaled: bool,
    pub three_d_swapped: bool,
    pub gazefade_enabled: bool,
    pub input_enabled: bool,
    pub update_invisible: bool,
    pub floatingui_enabled: bool,
    pub floatingui_desktops_enabled: bool,
    pub actionbar_enabled: bool,
    pub actionbar_order_use_global: bool,

    pub desktop_id: i32,
    pub capture_source: i32,
    pub winrt_desktop_id: i32,
    pub detached_display_mode: i32,
    pub detached_origin: i32,
    pub crop_x: i32,
    pub crop_y: i32,
    pub crop_width: i32,
    pub crop_height: i32,
    pub three_d_mode: i32,
    pub update_limit_override_mode: i32,
    pub update_limit_override_fps: i32,
    pub group_id: i32,

    /// Width in meters
    pub width: f32,
    pub curvature: f32,
    pub opacity: f32,
    pub brightness: f32,
    pub offset_right: f32,
    pub offset_up: f32,
    pub offset_forward: f32,
    pub gazefade_distance: f32,
    pub gazefade_rate: f32,
    pub gazefade_opacity: f32,
    pub update_limit_override_ms: f32,

    pub winrt_last_window_title: String,
    pub winrt_last_window_exe_name: String,

    /// Live captured window, 0 when none is attached
    pub winrt_window: WindowHandle,

    /// One transform per [`Origin`]; zero means "reinitialize when used"
    pub detached_transforms: [Matrix4; Origin::COUNT],

    pub actionbar_order: Vec<ActionBarEntry>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_custom: false,
            enabled: false,
            width_unscaled: false,
            three_d_swapped: false,
            gazefade_enabled: false,
            input_enabled: false,
            update_invisible: false,
            floatingui_enabled: false,
            floatingui_desktops_enabled: false,
            actionbar_enabled: false,
            actionbar_order_use_global: false,
            desktop_id: -1,
            capture_source: -1,
            winrt_desktop_id: -1,
            detached_display_mode: -1,
            detached_origin: -1,
            crop_x: -1,
            crop_y: -1,
            crop_width: -1,
            crop_height: -1,
            three_d_mode: -1,
            update_limit_override_mode: -1,
            update_limit_override_fps: -1,
            group_id: -1,
            width: 0.0,
            curvature: 0.0,
            opacity: 0.0,
            brightness: 0.0,
            offset_right: 0.0,
            offset_up: 0.0,
            offset_forward: 0.0,
            gazefade_distance: 0.0,
            gazefade_rate: 0.0,
            gazefade_opacity: 0.0,
            update_limit_override_ms: 0.0,
            winrt_last_window_title: String::new(),
            winrt_last_window_exe_name: String::new(),
            winrt_window: 0,
            detached_transforms: [Matrix4::ZERO; Origin::COUNT],
            actionbar_order: Vec::new(),
        }
    }
}

impl OverlaySettings {
    /// Transform of the active detached origin (room when the origin is invalid)
    pub fn detached_transform(&self) -> &Matrix4 {
        let origin = Origin::from_i32(self.detached_origin).unwrap_or(Origin::Room);
        &self.detached_transforms[origin.index()]
    }

    pub fn detached_transform_mut(&mut self) -> &mut Matrix4 {
        let origin = Origin::from_i32(self.detached_origin).unwrap_or(Origin::Room);
        &mut self.detached_transforms[origin.index()]
    }

    /// Name derived from what the overlay shows. `live_title` is the title of
    /// the attached window, when there is one.
    pub fn auto_name(&self, overlay_id: usize, live_title: Option<&str>) -> String {
        if overlay_id == DASHBOARD_ID {
            return "Dashboard".to_string();
        }

        match CaptureSource::from_i32(self.capture_source) {
            Some(CaptureSource::Ui) => "Performance Monitor".to_string(),
            Some(CaptureSource::WinRtCapture) => {
                if let Some(title) = live_title.filter(|t| !t.is_empty()) {
                    title.to_string()
                } else if !self.winrt_last_window_title.is_empty() {
                    self.winrt_last_window_title.clone()
                } else {
                    desktop_name(self.winrt_desktop_id, overlay_id)
                }
            }
            Some(CaptureSource::DesktopDuplication) => desktop_name(self.desktop_id, overlay_id),
            None => format!("Overlay {overlay_id}"),
        }
    }

    /// Replace the name with [`Self::auto_name`] unless the user picked one
    pub fn apply_auto_name(&mut self, overlay_id: usize, live_title: Option<&str>) {
        if !self.name_custom {
            self.name = self.auto_name(overlay_id, live_title);
        }
    }
}

fn desktop_name(desktop_id: i32, overlay_id: usize) -> String {
    match desktop_id {
        DESKTOP_ID_COMBINED => "Combined Desktop".to_string(),
        id if id >= 0 => format!("Desktop {}", id + 1),
        _ => format!("Overlay {overlay_id}"),
    }
}

/// Whether a stored name counts as user-chosen, for files written before
/// `NameIsCustom` existed. Empty names, `Dashboard` and the old default
/// pattern `Overlay <integer>` are automatic; anything else is custom.
pub fn infer_name_custom(name: &str) -> bool {
    if name.is_empty() || name == "Dashboard" {
        return false;
    }

    let mut words = name.split_whitespace();
    if words.next() != Some("Overlay") {
        return true;
    }

    let Some(number_word) = words.next() else {
        return true;
    };

    let sign_len = usize::from(number_word.starts_with(['-', '+']));
    let digit_len = number_word[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let number_len = sign_len + digit_len;

    if digit_len == 0 || number_word[..number_len].parse::<i32>().is_err() {
        return true;
    }

    // Anything after the number, even glued to it, makes it custom
    number_len < number_word.len() || words.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name_custom() {
        assert!(!infer_name_custom("Overlay 5"));
        assert!(infer_name_custom("Overlay 5 extra"));
        assert!(infer_name_custom("My Capture"));
        assert!(!infer_name_custom(""));
        assert!(!infer_name_custom("Dashboard"));
        assert!(!infer_name_custom("  Overlay   -3  "));
        assert!(infer_name_custom("Overlay"));
        assert!(infer_name_custom("Overlay x"));
        assert!(infer_name_custom("Overlay 5x"));
        assert!(infer_name_custom("Overlay5"));
        assert!(infer_name_custom("Overlay 99999999999"));
    }

    #[test]
    fn test_default_block_is_unset() {
        let data = OverlaySettings::default();
        assert!(!data.enabled);
        assert_eq!(data.desktop_id, -1);
        assert_eq!(data.width, 0.0);
        assert!(data.detached_transforms.iter().all(Matrix4::is_zero));
        assert!(data.actionbar_order.is_empty());
    }

    #[test]
    fn test_origin_roundtrip() {
        for origin in Origin::ALL {
            assert_eq!(Origin::from_i32(origin as i32), Some(origin));
        }
        assert_eq!(Origin::from_i32(8), None);
        assert_eq!(Origin::from_i32(-1), None);
    }

    #[test]
    fn test_detached_transform_follows_origin() {
        let mut data = OverlaySettings::default();
        data.detached_origin = Origin::Hmd as i32;
        *data.detached_transform_mut() = Matrix4::IDENTITY;
        assert_eq!(data.detached_transforms[Origin::Hmd.index()], Matrix4::IDENTITY);

        // Invalid origin falls back to room
        data.detached_origin = 42;
        assert!(data.detached_transform().is_zero());
        data.detached_transforms[Origin::Room.index()] = Matrix4::IDENTITY;
        assert_eq!(*data.detached_transform(), Matrix4::IDENTITY);
    }

    #[test]
    fn test_auto_name() {
        let mut data = OverlaySettings::default();
        assert_eq!(data.auto_name(0, None), "Dashboard");

        data.capture_source = CaptureSource::DesktopDuplication as i32;
        data.desktop_id = 1;
        assert_eq!(data.auto_name(3, None), "Desktop 2");
        data.desktop_id = -1;
        assert_eq!(data.auto_name(3, None), "Combined Desktop");

        data.capture_source = CaptureSource::WinRtCapture as i32;
        data.winrt_last_window_title = "Notepad".to_string();
        assert_eq!(data.auto_name(3, None), "Notepad");
        assert_eq!(data.auto_name(3, Some("Live Title")), "Live Title");

        data.capture_source = CaptureSource::Ui as i32;
        assert_eq!(data.auto_name(3, None), "Performance Monitor");
    }

    #[test]
    fn test_apply_auto_name_keeps_custom() {
        let mut data = OverlaySettings::default();
        data.capture_source = CaptureSource::Ui as i32;
        data.name = "Mine".to_string();
        data.name_custom = true;
        data.apply_auto_name(2, None);
        assert_eq!(data.name, "Mine");

        data.name_custom = false;
        data.apply_auto_name(2, None);
        assert_eq!(data.name, "Performance Monitor");
    }
}
