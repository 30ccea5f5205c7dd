//! Setting identifiers
//!
//! Each value type has its own identifier enum. The first `OVERLAY_COUNT`
//! variants address the per-overlay block, the rest address global settings.
//! Identifiers are how settings travel between processes: every bool, int,
//! float and handle id maps to a stable wire parameter.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::global::GlobalSettings;
use super::overlay::OverlaySettings;
use crate::host::WindowHandle;

/// Common interface of the identifier enums
pub trait SettingId: Copy + Debug {
    type Value;

    /// Position of this id within its enum
    fn index(self) -> usize;

    /// Whether the id addresses an overlay block rather than global settings
    fn is_overlay(self) -> bool;

    /// Field this id names, looked up in `overlay` or `global` by partition
    fn field<'a>(self, overlay: &'a OverlaySettings, global: &'a GlobalSettings) -> &'a Self::Value;

    fn field_mut<'a>(
        self,
        overlay: &'a mut OverlaySettings,
        global: &'a mut GlobalSettings,
    ) -> &'a mut Self::Value;
}

macro_rules! setting_ids {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $value:ty {
            overlay { $($ov:ident => $($ovf:ident).+,)* }
            global { $($gl:ident => $($glf:ident).+,)* }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($ov,)*
            $($gl,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$ov,)* $($name::$gl,)*];

            /// Number of per-overlay ids; they precede all global ids
            pub const OVERLAY_COUNT: usize = <[&str]>::len(&[$(stringify!($ov)),*]);
        }

        impl SettingId for $name {
            type Value = $value;

            fn index(self) -> usize {
                self as usize
            }

            fn is_overlay(self) -> bool {
                (self as usize) < Self::OVERLAY_COUNT
            }

            #[allow(unused_variables)]
            fn field<'a>(self, overlay: &'a OverlaySettings, global: &'a GlobalSettings) -> &'a $value {
                match self {
                    $($name::$ov => &overlay.$($ovf).+,)*
                    $($name::$gl => &global.$($glf).+,)*
                }
            }

            #[allow(unused_variables)]
            fn field_mut<'a>(
                self,
                overlay: &'a mut OverlaySettings,
                global: &'a mut GlobalSettings,
            ) -> &'a mut $value {
                match self {
                    $($name::$ov => &mut overlay.$($ovf).+,)*
                    $($name::$gl => &mut global.$($glf).+,)*
                }
            }
        }
    };
}

setting_ids! {
    pub enum BoolId: bool {
        overlay {
            OverlayNameCustom => name_custom,
            OverlayEnabled => enabled,
            OverlayWidthUnscaled => width_unscaled,
            Overlay3DSwapped => three_d_swapped,
            OverlayGazeFadeEnabled => gazefade_enabled,
            OverlayInputEnabled => input_enabled,
            OverlayUpdateInvisible => update_invisible,
            OverlayFloatingUiEnabled => floatingui_enabled,
            OverlayFloatingUiDesktopsEnabled => floatingui_desktops_enabled,
            OverlayActionBarEnabled => actionbar_enabled,
            OverlayActionBarOrderUseGlobal => actionbar_order_use_global,
        }
        global {
            InterfaceNoUi => interface.no_ui_auto_launch,
            InterfaceNoNotificationIcon => interface.no_notification_icon,
            InterfaceLargeStyle => interface.large_style,
            InterfaceDesktopIncludeAll => interface.desktop_include_all,
            InterfaceDimUi => interface.dim_ui,
            InterfaceWarningCompositorResHidden => interface.warning_compositor_res_hidden,
            InterfaceWarningCompositorQualityHidden => interface.warning_compositor_quality_hidden,
            InterfaceWarningProcessElevationHidden => interface.warning_process_elevation_hidden,
            InterfaceWarningElevatedModeHidden => interface.warning_elevated_mode_hidden,
            InterfaceWarningWelcomeHidden => interface.warning_welcome_hidden,
            InputGlobalHmdPointer => input.global_hmd_pointer,
            MouseRenderCursor => mouse.render_cursor,
            MouseRenderIntersectionBlob => mouse.render_intersection_blob,
            MouseHmdPointerOverride => mouse.hmd_pointer_override,
            KeyboardHelperEnabled => keyboard.helper_enabled,
            WindowsAutoFocusSceneAppDashboard => windows.auto_focus_scene_app_dashboard,
            WindowsWinRtAutoFocus => windows.winrt_auto_focus,
            WindowsWinRtKeepOnScreen => windows.winrt_keep_on_screen,
            WindowsWinRtAutoSizeOverlay => windows.winrt_auto_size_overlay,
            WindowsWinRtAutoFocusSceneApp => windows.winrt_auto_focus_scene_app,
            PerformanceRapidLaserPointerUpdates => performance.rapid_laser_pointer_updates,
            PerformanceSingleDesktopMirroring => performance.single_desktop_mirroring,
            PerformanceMonitorLargeStyle => performance.monitor_large_style,
            PerformanceMonitorShowGraphs => performance.monitor_show_graphs,
            PerformanceMonitorShowTime => performance.monitor_show_time,
            PerformanceMonitorShowCpu => performance.monitor_show_cpu,
            PerformanceMonitorShowGpu => performance.monitor_show_gpu,
            PerformanceMonitorShowFps => performance.monitor_show_fps,
            PerformanceMonitorShowBattery => performance.monitor_show_battery,
            PerformanceMonitorShowTrackers => performance.monitor_show_trackers,
            PerformanceMonitorShowViveWireless => performance.monitor_show_vive_wireless,
            PerformanceMonitorDisableGpuCounters => performance.monitor_disable_gpu_counters,
            MiscNoSteam => misc.no_steam,
            MiscUiAccessWasEnabled => misc.uiaccess_was_enabled,
            MiscApplySteamVr2DashboardOffset => misc.apply_steamvr2_dashboard_offset,
            StateOverlayDragMode => state.overlay_dragmode,
            StateOverlaySelectMode => state.overlay_selectmode,
            StateElevatedModeActive => state.elevated_mode_active,
            StateUiAccessEnabled => state.uiaccess_enabled,
            StateProcessStartedBySteam => state.process_started_by_steam,
        }
    }
}

setting_ids! {
    pub enum IntId: i32 {
        overlay {
            OverlayDesktopId => desktop_id,
            OverlayCaptureSource => capture_source,
            OverlayWinRtDesktopId => winrt_desktop_id,
            OverlayDetachedDisplayMode => detached_display_mode,
            OverlayDetachedOrigin => detached_origin,
            OverlayCropX => crop_x,
            OverlayCropY => crop_y,
            OverlayCropWidth => crop_width,
            OverlayCropHeight => crop_height,
            Overlay3DMode => three_d_mode,
            OverlayUpdateLimitOverrideMode => update_limit_override_mode,
            OverlayUpdateLimitOverrideFps => update_limit_override_fps,
            OverlayGroupId => group_id,
        }
        global {
            InterfaceOverlayCurrentId => interface.overlay_current_id,
            InterfaceDesktopListing => interface.desktop_listing,
            InterfaceBackgroundColor => interface.background_color,
            InterfaceBackgroundColorDisplayMode => interface.background_color_display_mode,
            InterfaceWmrIgnoreVScreens => interface.wmr_ignore_vscreens,
            InputGoHomeActionId => input.go_home_action_id,
            InputGoBackActionId => input.go_back_action_id,
            InputShortcut01ActionId => input.shortcut01_action_id,
            InputShortcut02ActionId => input.shortcut02_action_id,
            InputShortcut03ActionId => input.shortcut03_action_id,
            InputHotkey01Modifiers => input.hotkey01_modifiers,
            InputHotkey01KeyCode => input.hotkey01_keycode,
            InputHotkey01ActionId => input.hotkey01_action_id,
            InputHotkey02Modifiers => input.hotkey02_modifiers,
            InputHotkey02KeyCode => input.hotkey02_keycode,
            InputHotkey02ActionId => input.hotkey02_action_id,
            InputHotkey03Modifiers => input.hotkey03_modifiers,
            InputHotkey03KeyCode => input.hotkey03_keycode,
            InputHotkey03ActionId => input.hotkey03_action_id,
            MouseDoubleClickAssistDurationMs => mouse.dbl_click_assist_duration_ms,
            WindowsWinRtDraggingMode => windows.winrt_dragging_mode,
            PerformanceUpdateLimitMode => performance.update_limit_mode,
            PerformanceUpdateLimitFps => performance.update_limit_fps,
            StateOverlayCurrentIdOverride => state.overlay_current_id_override,
            StateDesktopCount => state.desktop_count,
            StateDuplicationFps => state.duplication_fps,
        }
    }
}

setting_ids! {
    pub enum FloatId: f32 {
        overlay {
            OverlayWidth => width,
            OverlayCurvature => curvature,
            OverlayOpacity => opacity,
            OverlayBrightness => brightness,
            OverlayOffsetRight => offset_right,
            OverlayOffsetUp => offset_up,
            OverlayOffsetForward => offset_forward,
            OverlayGazeFadeDistance => gazefade_distance,
            OverlayGazeFadeRate => gazefade_rate,
            OverlayGazeFadeOpacity => gazefade_opacity,
            OverlayUpdateLimitOverrideMs => update_limit_override_ms,
        }
        global {
            InterfaceLastVrUiScale => interface.last_vr_ui_scale,
            InputDetachedInteractionMaxDistance => input.detached_interaction_max_distance,
            InputGlobalHmdPointerMaxDistance => input.global_hmd_pointer_max_distance,
            KeyboardDetachedSize => keyboard.detached_size,
            PerformanceUpdateLimitMs => performance.update_limit_ms,
        }
    }
}

setting_ids! {
    pub enum StrId: String {
        overlay {
            OverlayWinRtLastWindowTitle => winrt_last_window_title,
            OverlayWinRtLastWindowExeName => winrt_last_window_exe_name,
        }
        global {}
    }
}

setting_ids! {
    /// Pointer-sized runtime handles; overlay-only
    pub enum HandleId: WindowHandle {
        overlay {
            OverlayWinRtWindow => winrt_window,
        }
        global {}
    }
}

/// Identifier carried by a wire parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireId {
    Bool(BoolId),
    Int(IntId),
    Float(FloatId),
    Handle(HandleId),
}

impl WireId {
    /// Wire parameter: bool ids first, then int, float and handle ids
    pub fn param(self) -> u32 {
        let param = match self {
            WireId::Bool(id) => id.index(),
            WireId::Int(id) => BoolId::ALL.len() + id.index(),
            WireId::Float(id) => BoolId::ALL.len() + IntId::ALL.len() + id.index(),
            WireId::Handle(id) => {
                BoolId::ALL.len() + IntId::ALL.len() + FloatId::ALL.len() + id.index()
            }
        };
        param as u32
    }
}

impl From<BoolId> for WireId {
    fn from(id: BoolId) -> Self {
        WireId::Bool(id)
    }
}

impl From<IntId> for WireId {
    fn from(id: IntId) -> Self {
        WireId::Int(id)
    }
}

impl From<FloatId> for WireId {
    fn from(id: FloatId) -> Self {
        WireId::Float(id)
    }
}

impl From<HandleId> for WireId {
    fn from(id: HandleId) -> Self {
        WireId::Handle(id)
    }
}
