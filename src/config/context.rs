//! Settings owner passed to everything that reads or writes configuration

use serde::Serialize;

use super::collection::OverlayCollection;
use super::global::GlobalSettings;
use super::ids::SettingId;
use crate::actions::ActionRegistry;
use crate::constants::overlay::DASHBOARD_ID;
use crate::environment::AppEnvironment;
use crate::host::Host;
use crate::matrix::Matrix4;

/// All settings of the running application
#[derive(Debug, Clone, Serialize)]
pub struct ConfigContext {
    pub env: AppEnvironment,
    pub global: GlobalSettings,
    pub overlays: OverlayCollection,
    pub actions: ActionRegistry,
}

impl ConfigContext {
    /// Fresh context with detected facts filled into the state group
    pub fn new(env: AppEnvironment, host: &dyn Host) -> Self {
        let mut global = GlobalSettings::default();
        global.state.desktop_count = host.monitor_count();
        global.state.uiaccess_enabled = env.ui_access_enabled();

        Self {
            env,
            global,
            overlays: OverlayCollection::new(),
            actions: ActionRegistry::default(),
        }
    }

    /// Overlay that overlay-scoped changes should address: the override when
    /// one is set, otherwise the UI selection
    pub fn target_overlay_id(&self) -> usize {
        usize::try_from(self.global.state.overlay_current_id_override)
            .ok()
            .filter(|id| *id < self.overlays.count())
            .unwrap_or_else(|| self.overlays.current_id())
    }

    /// Value of a setting. `overlay_id` addresses the block for overlay ids and
    /// is ignored for global ids.
    ///
    /// # Panics
    /// If `id` is an overlay id and `overlay_id` is out of range.
    pub fn get<I: SettingId>(&self, id: I, overlay_id: usize) -> I::Value
    where
        I::Value: Clone,
    {
        self.get_ref(id, overlay_id).clone()
    }

    pub fn get_ref<I: SettingId>(&self, id: I, overlay_id: usize) -> &I::Value {
        let overlay = if id.is_overlay() {
            &self.overlays[overlay_id]
        } else {
            self.overlays.dashboard()
        };
        id.field(overlay, &self.global)
    }

    pub fn get_mut<I: SettingId>(&mut self, id: I, overlay_id: usize) -> &mut I::Value {
        let block = if id.is_overlay() { overlay_id } else { DASHBOARD_ID };
        id.field_mut(&mut self.overlays[block], &mut self.global)
    }

    pub fn set<I: SettingId>(&mut self, id: I, overlay_id: usize, value: I::Value) {
        *self.get_mut(id, overlay_id) = value;
    }

    /// Transform of the overlay's active origin
    pub fn detached_transform(&self, overlay_id: usize) -> &Matrix4 {
        self.overlays[overlay_id].detached_transform()
    }

    pub fn detached_transform_mut(&mut self, overlay_id: usize) -> &mut Matrix4 {
        self.overlays[overlay_id].detached_transform_mut()
    }

    /// Reset transient interaction state
    pub fn reset_state_values(&mut self) {
        self.global.state.reset_transient();
    }
}
