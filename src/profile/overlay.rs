//! Overlay sections: one overlay block to and from `[Overlay]` / `[OverlayN]`

use tracing::{debug, info, warn};

use super::migrations::{self, CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
use crate::actions::{format_action_order, parse_action_order};
use crate::config::overlay::{
    infer_name_custom, CaptureSource, Origin, OverlaySettings, DISPLAY_MODE_ALWAYS,
    THREE_D_MODE_NONE, UPDATE_LIMIT_FPS_30, UPDATE_LIMIT_MODE_OFF,
};
use crate::config::{ConfigContext, IntId};
use crate::constants::overlay::{
    DASHBOARD_ID, DEFAULT_CURVATURE_PERCENT, DEFAULT_WIDTH_PERCENT, DESKTOP_ID_UNSET,
};
use crate::constants::sections;
use crate::host::Host;
use crate::ini::IniDocument;
use crate::ipc::ConfigMessage;
use crate::matrix::Matrix4;

/// Which section holds an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySection {
    /// `[Overlay]`, used by single-overlay profiles and old configs
    Single,
    /// `[OverlayN]`
    Indexed(usize),
}

impl OverlaySection {
    pub fn name(self) -> String {
        match self {
            OverlaySection::Single => sections::OVERLAY_SINGLE.to_string(),
            OverlaySection::Indexed(index) => sections::overlay(index),
        }
    }
}

/// Percentage keys store `value * 100` as an integer
pub(super) fn read_percent(doc: &IniDocument, section: &str, key: &str, default_percent: i32) -> f32 {
    doc.read_int(section, key, default_percent) as f32 / 100.0
}

pub(super) fn write_percent(doc: &mut IniDocument, section: &str, key: &str, value: f32) {
    doc.write_int(section, key, (value * 100.0).round() as i32);
}

/// Absent or empty means unset (zero); anything else that fails to parse
/// becomes identity
fn read_transform(doc: &IniDocument, section: &str, key: &str) -> Matrix4 {
    match doc.value(section, key) {
        None | Some("") => Matrix4::ZERO,
        Some(text) => text.parse().unwrap_or_else(|e| {
            warn!(section = section, key = key, error = %e, "Malformed transform, using identity");
            Matrix4::IDENTITY
        }),
    }
}

/// Read every key of an overlay section. Returns the block and whether the
/// name should be regenerated.
fn read_overlay_block(doc: &IniDocument, section: &str, is_dashboard: bool) -> (OverlaySettings, bool) {
    let name = doc.read_string(section, "Name", "");

    // Files older than NameIsCustom get their old default names replaced
    let request_auto_name = !doc.key_exists(section, "NameIsCustom");
    let name_custom = doc.read_bool(section, "NameIsCustom", infer_name_custom(&name));

    let mut data = OverlaySettings {
        name,
        name_custom,
        enabled: doc.read_bool(section, "Enabled", true),
        desktop_id: doc.read_int(section, "DesktopID", DESKTOP_ID_UNSET),
        capture_source: doc.read_int(section, "CaptureSource", CaptureSource::DesktopDuplication as i32),
        winrt_desktop_id: doc.read_int(section, "WinRTDesktopID", DESKTOP_ID_UNSET),
        winrt_last_window_title: doc.read_string(section, "WinRTLastWindowTitle", ""),
        winrt_last_window_exe_name: doc.read_string(section, "WinRTLastWindowExeName", ""),
        width_unscaled: doc.read_bool(section, "WidthUnscaled", false),
        width: read_percent(doc, section, "Width", DEFAULT_WIDTH_PERCENT),
        curvature: read_percent(doc, section, "Curvature", DEFAULT_CURVATURE_PERCENT),
        opacity: read_percent(doc, section, "Opacity", 100),
        brightness: read_percent(doc, section, "Brightness", 100),
        offset_right: read_percent(doc, section, "OffsetRight", 0),
        offset_up: read_percent(doc, section, "OffsetUp", 0),
        offset_forward: read_percent(doc, section, "OffsetForward", 0),
        detached_display_mode: doc.read_int(section, "DetachedDisplayMode", DISPLAY_MODE_ALWAYS),
        detached_origin: doc.read_int(section, "DetachedOrigin", Origin::Room as i32),
        crop_x: doc.read_int(section, "CroppingX", 0),
        crop_y: doc.read_int(section, "CroppingY", 0),
        crop_width: doc.read_int(section, "CroppingWidth", -1),
        crop_height: doc.read_int(section, "CroppingHeight", -1),
        three_d_mode: doc.read_int(section, "3DMode", THREE_D_MODE_NONE),
        three_d_swapped: doc.read_bool(section, "3DSwapped", false),
        gazefade_enabled: doc.read_bool(section, "GazeFade", false),
        gazefade_distance: read_percent(doc, section, "GazeFadeDistance", 0),
        gazefade_rate: read_percent(doc, section, "GazeFadeRate", 100),
        gazefade_opacity: read_percent(doc, section, "GazeFadeOpacity", 0),
        update_limit_override_mode: doc.read_int(section, "UpdateLimitModeOverride", UPDATE_LIMIT_MODE_OFF),
        update_limit_override_ms: read_percent(doc, section, "UpdateLimitMS", 0),
        update_limit_override_fps: doc.read_int(section, "UpdateLimitFPS", UPDATE_LIMIT_FPS_30),
        input_enabled: doc.read_bool(section, "InputEnabled", true),
        group_id: doc.read_int(section, "GroupID", 0),
        update_invisible: doc.read_bool(section, "UpdateInvisible", false),
        floatingui_enabled: doc.read_bool(section, "ShowFloatingUI", true),
        floatingui_desktops_enabled: doc.read_bool(section, "ShowDesktopButtons", is_dashboard),
        actionbar_enabled: doc.read_bool(section, "ShowActionBar", false),
        actionbar_order_use_global: doc.read_bool(section, "ActionBarOrderUseGlobal", true),
        winrt_window: 0,
        detached_transforms: [Matrix4::ZERO; Origin::COUNT],
        actionbar_order: parse_action_order(&doc.read_string(section, "ActionBarOrderCustom", "")),
    };

    for origin in Origin::ALL {
        data.detached_transforms[origin.index()] = read_transform(doc, section, origin.transform_key());
    }

    (data, request_auto_name)
}

impl ConfigContext {
    /// Load one overlay block from `section` into overlay `overlay_id`.
    /// Missing keys take their defaults; this never fails.
    ///
    /// # Panics
    /// If `overlay_id` is out of range.
    pub fn load_overlay_profile(
        &mut self,
        doc: &IniDocument,
        section: OverlaySection,
        overlay_id: usize,
        host: &dyn Host,
    ) {
        let section_name = section.name();
        let is_dashboard = overlay_id == DASHBOARD_ID;
        let (mut data, mut request_auto_name) = read_overlay_block(doc, &section_name, is_dashboard);

        // Re-attach the captured window if something similar is still open
        if data.winrt_desktop_id == DESKTOP_ID_UNSET && !data.winrt_last_window_title.is_empty() {
            match host.find_closest_window(&data.winrt_last_window_title, &data.winrt_last_window_exe_name) {
                Some(window) => {
                    debug!(overlay_id = overlay_id, title = %window.title, "Re-attached window");
                    data.winrt_window = window.handle;
                    data.winrt_last_window_title = window.title;
                    request_auto_name = true;
                }
                None => {
                    debug!(overlay_id = overlay_id, title = %data.winrt_last_window_title, "Window not found");
                }
            }
        }

        let mirroring = self.global.performance.single_desktop_mirroring;
        if is_dashboard {
            data.gazefade_enabled = false;
            if mirroring && data.desktop_id == DESKTOP_ID_UNSET {
                data.desktop_id = 0;
            }
        } else if mirroring {
            data.desktop_id = self.overlays.dashboard().desktop_id;
        }

        let version = migrations::schema_version(doc, &section_name);
        migrations::migrate_overlay(&mut data, is_dashboard, version);

        // A custom order that doesn't match the global one is stale
        if data.actionbar_order.len() != self.actions.main_bar_order.len() {
            data.actionbar_order = self.actions.main_bar_order.clone();
        }

        // The UI process renders these; tell the other side to hand them back
        if data.capture_source == CaptureSource::Ui as i32 {
            let id = i32::try_from(overlay_id).unwrap_or(-1);
            host.post_config_message(ConfigMessage::set_int(IntId::StateOverlayCurrentIdOverride, id));
            host.post_config_message(ConfigMessage::set_int(IntId::OverlayCaptureSource, CaptureSource::Ui as i32));
            host.post_config_message(ConfigMessage::set_int(IntId::StateOverlayCurrentIdOverride, -1));
        }

        if request_auto_name {
            let live_title = match data.winrt_window {
                0 => None,
                handle => host.window_info(handle).map(|w| w.title),
            };
            data.apply_auto_name(overlay_id, live_title.as_deref());
        }

        debug!(section = %section_name, overlay_id = overlay_id, name = %data.name, version = version, "Loaded overlay");
        self.overlays[overlay_id] = data;
    }

    /// Write overlay `overlay_id` to `section`, always the full key set
    pub fn save_overlay_profile(
        &self,
        doc: &mut IniDocument,
        section: OverlaySection,
        overlay_id: usize,
        host: &dyn Host,
    ) {
        let section_name = section.name();
        let s = section_name.as_str();
        let data = &self.overlays[overlay_id];

        doc.write_string(s, "Name", &data.name);
        doc.write_bool(s, "NameIsCustom", data.name_custom);
        doc.write_bool(s, "Enabled", data.enabled);
        doc.write_int(s, "DesktopID", data.desktop_id);
        doc.write_int(s, "CaptureSource", data.capture_source);
        doc.write_bool(s, "WidthUnscaled", data.width_unscaled);
        write_percent(doc, s, "Width", data.width);
        write_percent(doc, s, "Curvature", data.curvature);
        write_percent(doc, s, "Opacity", data.opacity);
        write_percent(doc, s, "Brightness", data.brightness);
        write_percent(doc, s, "OffsetRight", data.offset_right);
        write_percent(doc, s, "OffsetUp", data.offset_up);
        write_percent(doc, s, "OffsetForward", data.offset_forward);
        doc.write_int(s, "DetachedDisplayMode", data.detached_display_mode);
        doc.write_int(s, "DetachedOrigin", data.detached_origin);

        doc.write_int(s, "CroppingX", data.crop_x);
        doc.write_int(s, "CroppingY", data.crop_y);
        doc.write_int(s, "CroppingWidth", data.crop_width);
        doc.write_int(s, "CroppingHeight", data.crop_height);

        doc.write_int(s, "3DMode", data.three_d_mode);
        doc.write_bool(s, "3DSwapped", data.three_d_swapped);
        doc.write_bool(s, "GazeFade", data.gazefade_enabled);
        write_percent(doc, s, "GazeFadeDistance", data.gazefade_distance);
        write_percent(doc, s, "GazeFadeRate", data.gazefade_rate);
        write_percent(doc, s, "GazeFadeOpacity", data.gazefade_opacity);
        doc.write_int(s, "UpdateLimitModeOverride", data.update_limit_override_mode);
        write_percent(doc, s, "UpdateLimitMS", data.update_limit_override_ms);
        doc.write_int(s, "UpdateLimitFPS", data.update_limit_override_fps);
        doc.write_bool(s, "InputEnabled", data.input_enabled);
        doc.write_int(s, "GroupID", data.group_id);
        doc.write_bool(s, "UpdateInvisible", data.update_invisible);

        doc.write_bool(s, "ShowFloatingUI", data.floatingui_enabled);
        doc.write_bool(s, "ShowDesktopButtons", data.floatingui_desktops_enabled);
        doc.write_bool(s, "ShowActionBar", data.actionbar_enabled);
        doc.write_bool(s, "ActionBarOrderUseGlobal", data.actionbar_order_use_global);

        for origin in Origin::ALL {
            let transform = data.detached_transforms[origin.index()].to_string();
            doc.write_string(s, origin.transform_key(), &transform);
        }

        // Prefer the live window so a renamed window is found again next time
        let live = match data.winrt_window {
            0 => None,
            handle => host.window_info(handle),
        };
        let (title, exe_name) = match &live {
            Some(window) => (window.title.as_str(), window.exe_name.as_str()),
            None => (
                data.winrt_last_window_title.as_str(),
                data.winrt_last_window_exe_name.as_str(),
            ),
        };
        doc.write_string(s, "WinRTLastWindowTitle", title);
        doc.write_string(s, "WinRTLastWindowExeName", exe_name);
        doc.write_int(s, "WinRTDesktopID", data.winrt_desktop_id);

        doc.write_string(s, "ActionBarOrderCustom", &format_action_order(&data.actionbar_order));
        doc.write_int(s, SCHEMA_VERSION_KEY, CURRENT_SCHEMA_VERSION);
    }

    /// Load `Overlay0`, `Overlay1`, ... up to the first missing index.
    ///
    /// With `clear_existing` the collection is reset and the dashboard is read
    /// from `Overlay0` (or `Overlay` for configs that predate multiple
    /// overlays). Otherwise sections from `Overlay1` on are appended.
    pub fn load_multi_overlay_profile(&mut self, doc: &IniDocument, clear_existing: bool, host: &dyn Host) {
        let current_old = self.overlays.current_id();
        let mut index = 1;

        if clear_existing {
            self.overlays.remove_all();
            index = 0;

            if !doc.section_exists(&sections::overlay(0)) {
                info!("No Overlay0 section, loading dashboard from single overlay section");
                self.load_overlay_profile(doc, OverlaySection::Single, DASHBOARD_ID, host);
                index = 1;
            }
        }

        while doc.section_exists(&sections::overlay(index)) {
            let overlay_id = if index == 0 { DASHBOARD_ID } else { self.overlays.add() };
            self.load_overlay_profile(doc, OverlaySection::Indexed(index), overlay_id, host);
            index += 1;
        }

        self.overlays.set_current(current_old);
        debug!(count = self.overlays.count(), "Loaded overlay collection");
    }

    /// Replace every overlay section of `doc` with the current collection
    pub fn save_multi_overlay_profile(&self, doc: &mut IniDocument, host: &dyn Host) {
        doc.remove_section(sections::OVERLAY_SINGLE);

        let mut index = 0;
        while doc.remove_section(&sections::overlay(index)) {
            index += 1;
        }

        for overlay_id in 0..self.overlays.count() {
            self.save_overlay_profile(doc, OverlaySection::Indexed(overlay_id), overlay_id, host);
        }
    }
}
