//! Main configuration file: global groups, custom actions, then all overlays

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use tracing::{error, info, warn};

use super::migrations;
use super::overlay::{read_percent, write_percent};
use crate::actions::{
    format_action_order, parse_action_order, ActionId, CustomAction, CustomActionFunction,
    CustomActionKind,
};
use crate::config::overlay::{UPDATE_LIMIT_FPS_30, UPDATE_LIMIT_MODE_OFF};
use crate::config::ConfigContext;
use crate::constants::global::{DEFAULT_BACKGROUND_COLOR, WMR_IGNORE_VSCREENS_UNSET};
use crate::constants::sections::{
    CUSTOM_ACTIONS, INPUT, INTERFACE, KEYBOARD, MISC, MOUSE, PERFORMANCE, WINDOWS,
};
use crate::host::Host;
use crate::ini::IniDocument;

/// `WinRTDraggingMode` value for "drag the overlay"
pub const WINDOW_DRAGGING_OVERLAY: i32 = 2;

/// RGBA hex string to the signed bit pattern it is kept as
fn parse_color(text: &str) -> Option<i32> {
    u32::from_str_radix(text.trim(), 16).ok().map(|rgba| rgba as i32)
}

fn format_color(color: i32) -> String {
    format!("{:08x}", color as u32)
}

fn read_custom_actions(doc: &IniDocument) -> Vec<CustomAction> {
    let count = doc.read_int(CUSTOM_ACTIONS, "Count", 0).max(0);

    (0..count)
        .map(|i| {
            let prefix = format!("Action{i}");
            let key = |suffix: &str| format!("{prefix}{suffix}");

            let kind = CustomActionKind::parse(&doc.read_string(CUSTOM_ACTIONS, &key("FunctionType"), ""));
            let function = match kind {
                CustomActionKind::PressKeys => CustomActionFunction::PressKeys {
                    key_codes: [
                        doc.read_int(CUSTOM_ACTIONS, &key("KeyCode1"), 0),
                        doc.read_int(CUSTOM_ACTIONS, &key("KeyCode2"), 0),
                        doc.read_int(CUSTOM_ACTIONS, &key("KeyCode3"), 0),
                    ],
                    toggle_keys: doc.read_bool(CUSTOM_ACTIONS, &key("ToggleKeys"), false),
                },
                CustomActionKind::TypeString => CustomActionFunction::TypeString {
                    text: doc.read_string(CUSTOM_ACTIONS, &key("TypeString"), ""),
                },
                CustomActionKind::LaunchApplication => CustomActionFunction::LaunchApplication {
                    executable_path: doc.read_string(CUSTOM_ACTIONS, &key("ExecutablePath"), ""),
                    arguments: doc.read_string(CUSTOM_ACTIONS, &key("ExecutableArg"), ""),
                },
                CustomActionKind::ToggleOverlayEnabledState => {
                    CustomActionFunction::ToggleOverlayEnabledState {
                        overlay_id: doc.read_int(CUSTOM_ACTIONS, &key("OverlayID"), 0),
                    }
                }
            };

            CustomAction {
                name: doc.read_string(CUSTOM_ACTIONS, &key("Name"), &prefix),
                function,
                icon_filename: doc.read_string(CUSTOM_ACTIONS, &key("IconFilename"), ""),
            }
        })
        .collect()
}

/// Rewrite the whole section so removed actions leave nothing behind
fn write_custom_actions(doc: &mut IniDocument, actions: &[CustomAction]) {
    doc.remove_section(CUSTOM_ACTIONS);
    doc.write_int(CUSTOM_ACTIONS, "Count", actions.len() as i32);

    for (i, action) in actions.iter().enumerate() {
        let prefix = format!("Action{i}");
        let key = |suffix: &str| format!("{prefix}{suffix}");

        doc.write_string(CUSTOM_ACTIONS, &key("Name"), &action.name);
        doc.write_string(CUSTOM_ACTIONS, &key("FunctionType"), action.function.kind().as_str());

        match &action.function {
            CustomActionFunction::PressKeys { key_codes, toggle_keys } => {
                doc.write_int(CUSTOM_ACTIONS, &key("KeyCode1"), key_codes[0]);
                doc.write_int(CUSTOM_ACTIONS, &key("KeyCode2"), key_codes[1]);
                doc.write_int(CUSTOM_ACTIONS, &key("KeyCode3"), key_codes[2]);
                doc.write_bool(CUSTOM_ACTIONS, &key("ToggleKeys"), *toggle_keys);
            }
            CustomActionFunction::TypeString { text } => {
                doc.write_string(CUSTOM_ACTIONS, &key("TypeString"), text);
            }
            CustomActionFunction::LaunchApplication { executable_path, arguments } => {
                doc.write_string(CUSTOM_ACTIONS, &key("ExecutablePath"), executable_path);
                doc.write_string(CUSTOM_ACTIONS, &key("ExecutableArg"), arguments);
            }
            CustomActionFunction::ToggleOverlayEnabledState { overlay_id } => {
                doc.write_int(CUSTOM_ACTIONS, &key("OverlayID"), *overlay_id);
            }
        }

        doc.write_string(CUSTOM_ACTIONS, &key("IconFilename"), &action.icon_filename);
    }
}

impl ConfigContext {
    /// Load global settings and every overlay from the main config.
    ///
    /// `config_legacy.ini` wins over `config.ini`; when neither exists the
    /// bundled `config_default.ini` is read instead. Returns whether a user
    /// config existed. Never fails: unreadable files behave like empty ones.
    pub fn load_config_from_file(&mut self, host: &dyn Host) -> bool {
        let legacy_path = self.env.legacy_config_path();
        let config_path = self.env.config_path();

        let (path, existed) = if legacy_path.exists() {
            (legacy_path, true)
        } else if config_path.exists() {
            (config_path, true)
        } else {
            info!(path = %config_path.display(), "No config file, loading defaults");
            (self.env.default_config_path(), false)
        };

        let doc = IniDocument::load(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Could not read config, using defaults");
            IniDocument::new()
        });

        self.read_global_settings(&doc);
        self.global.state.elevated_mode_active = host.is_elevated_mode_active();
        migrations::migrate_global(&doc, &mut self.global);

        self.load_multi_overlay_profile(&doc, true, host);
        let current = usize::try_from(self.global.interface.overlay_current_id).unwrap_or(0);
        self.overlays.set_current(current);

        info!(path = %path.display(), existed = existed, overlays = self.overlays.count(), "Loaded config");
        existed
    }

    fn read_global_settings(&mut self, doc: &IniDocument) {
        let interface = &mut self.global.interface;
        interface.no_ui_auto_launch = doc.read_bool(INTERFACE, "NoUIAutoLaunch", false);
        interface.no_notification_icon = doc.read_bool(INTERFACE, "NoNotificationIcon", false);
        interface.large_style = doc.read_bool(INTERFACE, "DisplaySizeLarge", false);
        interface.overlay_current_id = doc.read_int(INTERFACE, "OverlayCurrentID", 0);
        interface.desktop_listing = doc.read_int(INTERFACE, "DesktopButtonCyclingMode", 0);
        interface.desktop_include_all = doc.read_bool(INTERFACE, "DesktopButtonIncludeAll", false);
        interface.background_color = parse_color(&doc.read_string(INTERFACE, "EnvironmentBackgroundColor", DEFAULT_BACKGROUND_COLOR))
            .or_else(|| parse_color(DEFAULT_BACKGROUND_COLOR))
            .unwrap_or(0);
        interface.background_color_display_mode = doc.read_int(INTERFACE, "EnvironmentBackgroundColorDisplayMode", 0);
        interface.dim_ui = doc.read_bool(INTERFACE, "DimUI", false);
        interface.last_vr_ui_scale = read_percent(doc, INTERFACE, "LastVRUIScale", 100);
        interface.warning_compositor_res_hidden = doc.read_bool(INTERFACE, "WarningCompositorResolutionHidden", false);
        interface.warning_compositor_quality_hidden = doc.read_bool(INTERFACE, "WarningCompositorQualityHidden", false);
        interface.warning_process_elevation_hidden = doc.read_bool(INTERFACE, "WarningProcessElevationHidden", false);
        interface.warning_elevated_mode_hidden = doc.read_bool(INTERFACE, "WarningElevatedModeHidden", false);
        interface.warning_welcome_hidden = doc.read_bool(INTERFACE, "WarningWelcomeHidden", false);
        interface.wmr_ignore_vscreens = doc.read_int(INTERFACE, "WMRIgnoreVScreens", WMR_IGNORE_VSCREENS_UNSET);

        let input = &mut self.global.input;
        input.go_home_action_id = doc.read_int(INPUT, "GoHomeButtonActionID", 0);
        input.go_back_action_id = doc.read_int(INPUT, "GoBackButtonActionID", 0);
        input.shortcut01_action_id = doc.read_int(INPUT, "GlobalShortcut01ActionID", 0);
        input.shortcut02_action_id = doc.read_int(INPUT, "GlobalShortcut02ActionID", 0);
        input.shortcut03_action_id = doc.read_int(INPUT, "GlobalShortcut03ActionID", 0);
        input.hotkey01_modifiers = doc.read_int(INPUT, "GlobalHotkey01Modifiers", 0);
        input.hotkey01_keycode = doc.read_int(INPUT, "GlobalHotkey01KeyCode", 0);
        input.hotkey01_action_id = doc.read_int(INPUT, "GlobalHotkey01ActionID", 0);
        input.hotkey02_modifiers = doc.read_int(INPUT, "GlobalHotkey02Modifiers", 0);
        input.hotkey02_keycode = doc.read_int(INPUT, "GlobalHotkey02KeyCode", 0);
        input.hotkey02_action_id = doc.read_int(INPUT, "GlobalHotkey02ActionID", 0);
        input.hotkey03_modifiers = doc.read_int(INPUT, "GlobalHotkey03Modifiers", 0);
        input.hotkey03_keycode = doc.read_int(INPUT, "GlobalHotkey03KeyCode", 0);
        input.hotkey03_action_id = doc.read_int(INPUT, "GlobalHotkey03ActionID", 0);
        input.detached_interaction_max_distance = read_percent(doc, INPUT, "DetachedInteractionMaxDistance", 30);
        input.global_hmd_pointer = doc.read_bool(INPUT, "GlobalHMDPointer", false);
        input.global_hmd_pointer_max_distance = read_percent(doc, INPUT, "GlobalHMDPointerMaxDistance", 0);

        let mouse = &mut self.global.mouse;
        mouse.render_cursor = doc.read_bool(MOUSE, "RenderCursor", true);
        mouse.render_intersection_blob = doc.read_bool(MOUSE, "RenderIntersectionBlob", false);
        mouse.dbl_click_assist_duration_ms = doc.read_int(MOUSE, "DoubleClickAssistDuration", -1);
        mouse.hmd_pointer_override = doc.read_bool(MOUSE, "HMDPointerOverride", true);

        let keyboard = &mut self.global.keyboard;
        keyboard.helper_enabled = doc.read_bool(KEYBOARD, "EnableKeyboardHelper", true);
        keyboard.detached_size = read_percent(doc, KEYBOARD, "KeyboardDetachedSize", 100);

        let windows = &mut self.global.windows;
        windows.auto_focus_scene_app_dashboard = doc.read_bool(WINDOWS, "AutoFocusSceneAppDashboard", false);
        windows.winrt_auto_focus = doc.read_bool(WINDOWS, "WinRTAutoFocus", true);
        windows.winrt_keep_on_screen = doc.read_bool(WINDOWS, "WinRTKeepOnScreen", true);
        windows.winrt_dragging_mode = doc.read_int(WINDOWS, "WinRTDraggingMode", WINDOW_DRAGGING_OVERLAY);
        windows.winrt_auto_size_overlay = doc.read_bool(WINDOWS, "WinRTAutoSizeOverlay", false);
        windows.winrt_auto_focus_scene_app = doc.read_bool(WINDOWS, "WinRTAutoFocusSceneApp", false);

        let performance = &mut self.global.performance;
        performance.update_limit_mode = doc.read_int(PERFORMANCE, "UpdateLimitMode", UPDATE_LIMIT_MODE_OFF);
        performance.update_limit_ms = read_percent(doc, PERFORMANCE, "UpdateLimitMS", 0);
        performance.update_limit_fps = doc.read_int(PERFORMANCE, "UpdateLimitFPS", UPDATE_LIMIT_FPS_30);
        performance.rapid_laser_pointer_updates = doc.read_bool(PERFORMANCE, "RapidLaserPointerUpdates", false);
        performance.single_desktop_mirroring = doc.read_bool(PERFORMANCE, "SingleDesktopMirroring", false);
        performance.monitor_large_style = doc.read_bool(PERFORMANCE, "PerformanceMonitorStyleLarge", true);
        performance.monitor_show_graphs = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowGraphs", true);
        performance.monitor_show_time = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowTime", false);
        performance.monitor_show_cpu = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowCPU", true);
        performance.monitor_show_gpu = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowGPU", true);
        performance.monitor_show_fps = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowFPS", true);
        performance.monitor_show_battery = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowBattery", true);
        performance.monitor_show_trackers = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowTrackers", true);
        performance.monitor_show_vive_wireless = doc.read_bool(PERFORMANCE, "PerformanceMonitorShowViveWireless", false);
        performance.monitor_disable_gpu_counters = doc.read_bool(PERFORMANCE, "PerformanceMonitorDisableGPUCounters", false);

        let misc = &mut self.global.misc;
        misc.no_steam = doc.read_bool(MISC, "NoSteam", false);
        misc.uiaccess_was_enabled = doc.read_bool(MISC, "UIAccessWasEnabled", false);
        misc.apply_steamvr2_dashboard_offset = doc.read_bool(MISC, "ApplySteamVR2DashboardOffset", true);

        self.actions.custom_actions = read_custom_actions(doc);
        self.actions.main_bar_order = parse_action_order(&doc.read_string(INTERFACE, "ActionOrder", ""));
        self.actions.normalize_main_bar_order();

        // Bindings to deleted custom actions or unknown ids fall back to none
        let input = &mut self.global.input;
        for binding in [
            &mut input.go_home_action_id,
            &mut input.go_back_action_id,
            &mut input.shortcut01_action_id,
            &mut input.shortcut02_action_id,
            &mut input.shortcut03_action_id,
        ] {
            *binding = self.actions.validated(ActionId(*binding)).0;
        }
    }

    /// Write global settings and all overlays back to the main config,
    /// keeping unrelated content of the existing file
    pub fn save_config_to_file(&self, host: &dyn Host) -> Result<()> {
        let legacy_path = self.env.legacy_config_path();
        let path = if legacy_path.exists() {
            legacy_path
        } else {
            self.env.config_path()
        };

        let mut doc = IniDocument::load(&path)?;
        self.save_multi_overlay_profile(&mut doc, host);
        self.write_global_settings(&mut doc);

        doc.save(&path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to save config");
        })?;
        info!(path = %path.display(), overlays = self.overlays.count(), "Saved config");
        Ok(())
    }

    fn write_global_settings(&self, doc: &mut IniDocument) {
        let interface = &self.global.interface;
        doc.write_bool(INTERFACE, "NoUIAutoLaunch", interface.no_ui_auto_launch);
        doc.write_bool(INTERFACE, "NoNotificationIcon", interface.no_notification_icon);
        doc.write_int(INTERFACE, "OverlayCurrentID", interface.overlay_current_id);
        doc.write_int(INTERFACE, "DesktopButtonCyclingMode", interface.desktop_listing);
        doc.write_bool(INTERFACE, "DisplaySizeLarge", interface.large_style);
        doc.write_bool(INTERFACE, "DesktopButtonIncludeAll", interface.desktop_include_all);
        doc.write_string(INTERFACE, "EnvironmentBackgroundColor", &format_color(interface.background_color));
        doc.write_int(INTERFACE, "EnvironmentBackgroundColorDisplayMode", interface.background_color_display_mode);
        doc.write_bool(INTERFACE, "DimUI", interface.dim_ui);
        write_percent(doc, INTERFACE, "LastVRUIScale", interface.last_vr_ui_scale);
        doc.write_bool(INTERFACE, "WarningCompositorResolutionHidden", interface.warning_compositor_res_hidden);
        doc.write_bool(INTERFACE, "WarningCompositorQualityHidden", interface.warning_compositor_quality_hidden);
        doc.write_bool(INTERFACE, "WarningProcessElevationHidden", interface.warning_process_elevation_hidden);
        doc.write_bool(INTERFACE, "WarningElevatedModeHidden", interface.warning_elevated_mode_hidden);
        doc.write_bool(INTERFACE, "WarningWelcomeHidden", interface.warning_welcome_hidden);

        // Non-WMR systems report -1; keep the stored value for users switching headsets
        if interface.wmr_ignore_vscreens != WMR_IGNORE_VSCREENS_UNSET {
            doc.write_int(INTERFACE, "WMRIgnoreVScreens", interface.wmr_ignore_vscreens);
        }

        doc.write_string(INTERFACE, "ActionOrder", &format_action_order(&self.actions.main_bar_order));

        let input = &self.global.input;
        doc.write_int(INPUT, "GoHomeButtonActionID", input.go_home_action_id);
        doc.write_int(INPUT, "GoBackButtonActionID", input.go_back_action_id);
        doc.write_int(INPUT, "GlobalShortcut01ActionID", input.shortcut01_action_id);
        doc.write_int(INPUT, "GlobalShortcut02ActionID", input.shortcut02_action_id);
        doc.write_int(INPUT, "GlobalShortcut03ActionID", input.shortcut03_action_id);
        doc.write_int(INPUT, "GlobalHotkey01Modifiers", input.hotkey01_modifiers);
        doc.write_int(INPUT, "GlobalHotkey01KeyCode", input.hotkey01_keycode);
        doc.write_int(INPUT, "GlobalHotkey01ActionID", input.hotkey01_action_id);
        doc.write_int(INPUT, "GlobalHotkey02Modifiers", input.hotkey02_modifiers);
        doc.write_int(INPUT, "GlobalHotkey02KeyCode", input.hotkey02_keycode);
        doc.write_int(INPUT, "GlobalHotkey02ActionID", input.hotkey02_action_id);
        doc.write_int(INPUT, "GlobalHotkey03Modifiers", input.hotkey03_modifiers);
        doc.write_int(INPUT, "GlobalHotkey03KeyCode", input.hotkey03_keycode);
        doc.write_int(INPUT, "GlobalHotkey03ActionID", input.hotkey03_action_id);
        write_percent(doc, INPUT, "DetachedInteractionMaxDistance", input.detached_interaction_max_distance);
        doc.write_bool(INPUT, "GlobalHMDPointer", input.global_hmd_pointer);
        write_percent(doc, INPUT, "GlobalHMDPointerMaxDistance", input.global_hmd_pointer_max_distance);

        let mouse = &self.global.mouse;
        doc.write_bool(MOUSE, "RenderCursor", mouse.render_cursor);
        doc.write_bool(MOUSE, "RenderIntersectionBlob", mouse.render_intersection_blob);
        doc.write_bool(MOUSE, "HMDPointerOverride", mouse.hmd_pointer_override);
        doc.write_int(MOUSE, "DoubleClickAssistDuration", mouse.dbl_click_assist_duration_ms);

        let keyboard = &self.global.keyboard;
        doc.write_bool(KEYBOARD, "EnableKeyboardHelper", keyboard.helper_enabled);
        write_percent(doc, KEYBOARD, "KeyboardDetachedSize", keyboard.detached_size);

        let windows = &self.global.windows;
        doc.write_bool(WINDOWS, "AutoFocusSceneAppDashboard", windows.auto_focus_scene_app_dashboard);
        doc.write_bool(WINDOWS, "WinRTAutoFocus", windows.winrt_auto_focus);
        doc.write_bool(WINDOWS, "WinRTKeepOnScreen", windows.winrt_keep_on_screen);
        doc.write_int(WINDOWS, "WinRTDraggingMode", windows.winrt_dragging_mode);
        doc.write_bool(WINDOWS, "WinRTAutoSizeOverlay", windows.winrt_auto_size_overlay);
        doc.write_bool(WINDOWS, "WinRTAutoFocusSceneApp", windows.winrt_auto_focus_scene_app);

        let performance = &self.global.performance;
        doc.write_int(PERFORMANCE, "UpdateLimitMode", performance.update_limit_mode);
        write_percent(doc, PERFORMANCE, "UpdateLimitMS", performance.update_limit_ms);
        doc.write_int(PERFORMANCE, "UpdateLimitFPS", performance.update_limit_fps);
        doc.write_bool(PERFORMANCE, "RapidLaserPointerUpdates", performance.rapid_laser_pointer_updates);
        doc.write_bool(PERFORMANCE, "SingleDesktopMirroring", performance.single_desktop_mirroring);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorStyleLarge", performance.monitor_large_style);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowGraphs", performance.monitor_show_graphs);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowTime", performance.monitor_show_time);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowCPU", performance.monitor_show_cpu);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowGPU", performance.monitor_show_gpu);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowFPS", performance.monitor_show_fps);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowBattery", performance.monitor_show_battery);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowTrackers", performance.monitor_show_trackers);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorShowViveWireless", performance.monitor_show_vive_wireless);
        doc.write_bool(PERFORMANCE, "PerformanceMonitorDisableGPUCounters", performance.monitor_disable_gpu_counters);

        let misc = &self.global.misc;
        doc.write_bool(MISC, "NoSteam", misc.no_steam);
        doc.write_bool(MISC, "ApplySteamVR2DashboardOffset", misc.apply_steamvr2_dashboard_offset);
        doc.write_bool(
            MISC,
            "UIAccessWasEnabled",
            misc.uiaccess_was_enabled || self.global.state.uiaccess_enabled,
        );

        write_custom_actions(doc, &self.actions.custom_actions);
    }

    /// Delete `config.ini` and load again, which falls back to the bundled
    /// defaults unless a legacy config is present
    pub fn restore_config_from_default(&mut self, host: &dyn Host) -> Result<bool> {
        let path = self.env.config_path();
        match fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "Deleted config"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to delete config {}", path.display()));
            }
        }

        Ok(self.load_config_from_file(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionBarEntry;
    use crate::environment::AppEnvironment;
    use crate::host::testing::RecordingHost;
    use tempfile::TempDir;

    fn context_in(dir: &TempDir) -> ConfigContext {
        let host = RecordingHost::new();
        ConfigContext::new(AppEnvironment::with_application_path(dir.path().to_path_buf()), &host)
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(parse_color("00000080"), Some(0x80));
        assert_eq!(parse_color("ff102030"), Some(0xff102030u32 as i32));
        assert_eq!(format_color(0xff102030u32 as i32), "ff102030");
        assert_eq!(format_color(0x80), "00000080");
        assert_eq!(parse_color("zz"), None);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        let mut ctx = context_in(&dir);

        assert!(!ctx.load_config_from_file(&host));
        assert_eq!(ctx.global.interface.background_color, 0x80);
        assert_eq!(ctx.global.interface.wmr_ignore_vscreens, -1);
        assert!(ctx.global.mouse.render_cursor);
        assert_eq!(ctx.global.mouse.dbl_click_assist_duration_ms, -1);
        assert_eq!(ctx.global.windows.winrt_dragging_mode, WINDOW_DRAGGING_OVERLAY);
        assert!((ctx.global.input.detached_interaction_max_distance - 0.3).abs() < 1e-6);
        assert!(ctx.global.misc.apply_steamvr2_dashboard_offset);
        assert_eq!(ctx.overlays.count(), 1);
        assert_eq!(ctx.overlays.dashboard().name, "Dashboard");

        // Empty order gets every built-in action, hidden
        let ids: Vec<i32> = ctx.actions.main_bar_order.iter().map(|e| e.action.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_default_config_fallback() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        fs::write(dir.path().join("config_default.ini"), "[Interface]\nDisplaySizeLarge=true\n").unwrap();

        let mut ctx = context_in(&dir);
        assert!(!ctx.load_config_from_file(&host));
        assert!(ctx.global.interface.large_style);
    }

    #[test]
    fn test_legacy_config_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        fs::write(dir.path().join("config.ini"), "[Misc]\nNoSteam=false\n").unwrap();
        fs::write(dir.path().join("config_legacy.ini"), "[Misc]\nNoSteam=true\n").unwrap();

        let mut ctx = context_in(&dir);
        assert!(ctx.load_config_from_file(&host));
        assert!(ctx.global.misc.no_steam);

        ctx.global.misc.no_steam = false;
        ctx.save_config_to_file(&host).unwrap();
        let legacy = IniDocument::load(&dir.path().join("config_legacy.ini")).unwrap();
        assert!(!legacy.read_bool(MISC, "NoSteam", true));
        let main = IniDocument::load(&dir.path().join("config.ini")).unwrap();
        assert!(!main.section_exists("Overlay0"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        let mut ctx = context_in(&dir);
        ctx.load_config_from_file(&host);

        ctx.global.interface.background_color = 0xff8000c0u32 as i32;
        ctx.global.interface.dim_ui = true;
        ctx.global.keyboard.detached_size = 1.25;
        ctx.global.performance.single_desktop_mirroring = true;
        ctx.actions.custom_actions = vec![
            CustomAction {
                name: "Copy".to_string(),
                function: CustomActionFunction::PressKeys { key_codes: [17, 67, 0], toggle_keys: true },
                icon_filename: "copy.png".to_string(),
            },
            CustomAction {
                name: "Editor".to_string(),
                function: CustomActionFunction::LaunchApplication {
                    executable_path: "C:\\Tools\\edit.exe".to_string(),
                    arguments: "--new".to_string(),
                },
                icon_filename: String::new(),
            },
        ];
        ctx.actions.main_bar_order.push(ActionBarEntry::new(ActionId::custom(0), true));
        ctx.global.input.go_home_action_id = ActionId::custom(1).0;
        let id = ctx.overlays.add();
        ctx.overlays[id].name = "Second".to_string();
        ctx.overlays[id].name_custom = true;
        ctx.overlays.set_current(id);
        ctx.global.interface.overlay_current_id = id as i32;

        ctx.save_config_to_file(&host).unwrap();

        let mut reloaded = context_in(&dir);
        assert!(reloaded.load_config_from_file(&host));

        assert_eq!(reloaded.global.interface.background_color, 0xff8000c0u32 as i32);
        assert!(reloaded.global.interface.dim_ui);
        assert_eq!(reloaded.global.keyboard.detached_size, 1.25);
        assert!(reloaded.global.performance.single_desktop_mirroring);
        assert_eq!(reloaded.actions.custom_actions, ctx.actions.custom_actions);
        assert_eq!(reloaded.global.input.go_home_action_id, 1001);
        assert_eq!(reloaded.overlays.count(), 2);
        assert_eq!(reloaded.overlays[1].name, "Second");
        assert_eq!(reloaded.overlays.current_id(), 1);

        // Custom action 1000 is visible, 1001 was appended hidden
        let order = &reloaded.actions.main_bar_order;
        assert!(order.contains(&ActionBarEntry::new(ActionId(1000), true)));
        assert!(order.contains(&ActionBarEntry::new(ActionId(1001), false)));
    }

    #[test]
    fn test_invalid_bindings_reset_to_none() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        fs::write(
            dir.path().join("config.ini"),
            "[Input]\nGoHomeButtonActionID=1005\nGoBackButtonActionID=3\nGlobalShortcut01ActionID=99\n[Interface]\nActionOrder=3 1;42 1;\n",
        )
        .unwrap();

        let mut ctx = context_in(&dir);
        ctx.load_config_from_file(&host);

        assert_eq!(ctx.global.input.go_home_action_id, 0);
        assert_eq!(ctx.global.input.go_back_action_id, 3);
        assert_eq!(ctx.global.input.shortcut01_action_id, 0);
        assert_eq!(ctx.actions.main_bar_order[0], ActionBarEntry::new(ActionId(3), true));
        assert!(!ctx.actions.main_bar_order.iter().any(|e| e.action.0 == 42));
    }

    #[test]
    fn test_wmr_setting_written_only_when_set() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        let mut ctx = context_in(&dir);
        ctx.load_config_from_file(&host);

        ctx.save_config_to_file(&host).unwrap();
        let doc = IniDocument::load(&dir.path().join("config.ini")).unwrap();
        assert!(!doc.key_exists(INTERFACE, "WMRIgnoreVScreens"));

        ctx.global.interface.wmr_ignore_vscreens = 1;
        ctx.save_config_to_file(&host).unwrap();
        let doc = IniDocument::load(&dir.path().join("config.ini")).unwrap();
        assert_eq!(doc.read_int(INTERFACE, "WMRIgnoreVScreens", -1), 1);
    }

    #[test]
    fn test_uiaccess_was_enabled_is_sticky() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        let mut ctx = context_in(&dir);
        ctx.global.state.uiaccess_enabled = true;

        ctx.save_config_to_file(&host).unwrap();
        let doc = IniDocument::load(&dir.path().join("config.ini")).unwrap();
        assert!(doc.read_bool(MISC, "UIAccessWasEnabled", false));
    }

    #[test]
    fn test_custom_actions_section_rewritten_whole() {
        let mut doc = IniDocument::parse("[CustomActions]\nCount=2\nAction1Name=Gone\nAction1FunctionType=TypeString\n");
        let actions = vec![CustomAction {
            name: "Hello".to_string(),
            function: CustomActionFunction::TypeString { text: "hi".to_string() },
            icon_filename: String::new(),
        }];

        write_custom_actions(&mut doc, &actions);
        assert!(!doc.key_exists(CUSTOM_ACTIONS, "Action1Name"));
        assert_eq!(read_custom_actions(&doc), actions);
    }

    #[test]
    fn test_custom_action_defaults() {
        let doc = IniDocument::parse("[CustomActions]\nCount=1\nAction0FunctionType=Unknown\nAction0KeyCode2=65\n");
        let actions = read_custom_actions(&doc);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "Action0");
        assert_eq!(
            actions[0].function,
            CustomActionFunction::PressKeys { key_codes: [0, 65, 0], toggle_keys: false }
        );
    }

    #[test]
    fn test_elevated_state_from_host() {
        let dir = TempDir::new().unwrap();
        let mut host = RecordingHost::new();
        host.elevated = true;

        let mut ctx = context_in(&dir);
        ctx.load_config_from_file(&host);
        assert!(ctx.global.state.elevated_mode_active);
    }

    #[test]
    fn test_restore_config_from_default() {
        let dir = TempDir::new().unwrap();
        let host = RecordingHost::new();
        fs::write(dir.path().join("config.ini"), "[Interface]\nDisplaySizeLarge=false\nDimUI=true\n").unwrap();
        fs::write(dir.path().join("config_default.ini"), "[Interface]\nDisplaySizeLarge=true\n").unwrap();

        let mut ctx = context_in(&dir);
        assert!(ctx.load_config_from_file(&host));
        assert!(!ctx.global.interface.large_style);

        assert!(!ctx.restore_config_from_default(&host).unwrap());
        assert!(!dir.path().join("config.ini").exists());
        assert!(ctx.global.interface.large_style);

        // Restoring twice is fine
        assert!(!ctx.restore_config_from_default(&host).unwrap());
    }
}
