//! Application-wide settings, grouped the way the profile file groups them

use serde::{Deserialize, Serialize};

/// `[Interface]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSettings {
    pub no_ui_auto_launch: bool,
    pub no_notification_icon: bool,
    pub large_style: bool,
    pub overlay_current_id: i32,
    pub desktop_listing: i32,
    pub desktop_include_all: bool,
    /// RGBA color, bit pattern stored as a signed integer
    pub background_color: i32,
    pub background_color_display_mode: i32,
    pub dim_ui: bool,
    pub last_vr_ui_scale: f32,
    pub warning_compositor_res_hidden: bool,
    pub warning_compositor_quality_hidden: bool,
    pub warning_process_elevation_hidden: bool,
    pub warning_elevated_mode_hidden: bool,
    pub warning_welcome_hidden: bool,
    pub wmr_ignore_vscreens: i32,
}

/// `[Input]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    pub go_home_action_id: i32,
    pub go_back_action_id: i32,
    pub shortcut01_action_id: i32,
    pub shortcut02_action_id: i32,
    pub shortcut03_action_id: i32,
    pub hotkey01_modifiers: i32,
    pub hotkey01_keycode: i32,
    pub hotkey01_action_id: i32,
    pub hotkey02_modifiers: i32,
    pub hotkey02_keycode: i32,
    pub hotkey02_action_id: i32,
    pub hotkey03_modifiers: i32,
    pub hotkey03_keycode: i32,
    pub hotkey03_action_id: i32,
    pub detached_interaction_max_distance: f32,
    pub global_hmd_pointer: bool,
    pub global_hmd_pointer_max_distance: f32,
}

/// `[Mouse]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseSettings {
    pub render_cursor: bool,
    pub render_intersection_blob: bool,
    pub dbl_click_assist_duration_ms: i32,
    pub hmd_pointer_override: bool,
}

/// `[Keyboard]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardSettings {
    pub helper_enabled: bool,
    pub detached_size: f32,
}

/// `[Windows]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowsSettings {
    pub auto_focus_scene_app_dashboard: bool,
    pub winrt_auto_focus: bool,
    pub winrt_keep_on_screen: bool,
    pub winrt_dragging_mode: i32,
    pub winrt_auto_size_overlay: bool,
    pub winrt_auto_focus_scene_app: bool,
}

/// `[Performance]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSettings {
    pub update_limit_mode: i32,
    pub update_limit_ms: f32,
    pub update_limit_fps: i32,
    pub rapid_laser_pointer_updates: bool,
    pub single_desktop_mirroring: bool,
    pub monitor_large_style: bool,
    pub monitor_show_graphs: bool,
    pub monitor_show_time: bool,
    pub monitor_show_cpu: bool,
    pub monitor_show_gpu: bool,
    pub monitor_show_fps: bool,
    pub monitor_show_battery: bool,
    pub monitor_show_trackers: bool,
    pub monitor_show_vive_wireless: bool,
    pub monitor_disable_gpu_counters: bool,
}

/// `[Misc]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscSettings {
    pub no_steam: bool,
    pub uiaccess_was_enabled: bool,
    pub apply_steamvr2_dashboard_offset: bool,
}

/// Runtime state, never written to profile files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSettings {
    pub overlay_dragmode: bool,
    pub overlay_selectmode: bool,
    pub elevated_mode_active: bool,
    pub uiaccess_enabled: bool,
    pub process_started_by_steam: bool,
    /// Overlay addressed by incoming overlay settings instead of the current one, -1 for none
    pub overlay_current_id_override: i32,
    pub desktop_count: i32,
    pub duplication_fps: i32,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            overlay_dragmode: false,
            overlay_selectmode: false,
            elevated_mode_active: false,
            uiaccess_enabled: false,
            process_started_by_steam: false,
            overlay_current_id_override: -1,
            desktop_count: -1,
            duplication_fps: -1,
        }
    }
}

impl StateSettings {
    /// Reset the transient interaction state. Detected facts (desktop count,
    /// elevation, UIAccess, Steam launch) survive.
    pub fn reset_transient(&mut self) {
        self.overlay_dragmode = false;
        self.overlay_selectmode = false;
        self.overlay_current_id_override = -1;
        self.duplication_fps = -1;
    }
}

/// All global settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub interface: InterfaceSettings,
    pub input: InputSettings,
    pub mouse: MouseSettings,
    pub keyboard: KeyboardSettings,
    pub windows: WindowsSettings,
    pub performance: PerformanceSettings,
    pub misc: MiscSettings,
    pub state: StateSettings,
}
