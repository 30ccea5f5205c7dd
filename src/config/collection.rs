//! Ordered overlay list with the dashboard pinned at index 0

use serde::Serialize;
use std::ops::{Index, IndexMut};

use super::overlay::OverlaySettings;
use crate::constants::overlay::DASHBOARD_ID;

#[derive(Debug, Clone, Serialize)]
pub struct OverlayCollection {
    overlays: Vec<OverlaySettings>,
    /// Overlay selected in the UI; never used to route settings
    current: usize,
}

impl Default for OverlayCollection {
    fn default() -> Self {
        Self {
            overlays: vec![OverlaySettings::default()],
            current: DASHBOARD_ID,
        }
    }
}

impl OverlayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank overlay and return its id
    pub fn add(&mut self) -> usize {
        self.overlays.push(OverlaySettings::default());
        self.overlays.len() - 1
    }

    /// Remove an overlay. The dashboard can't be removed; returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: usize) -> bool {
        if id == DASHBOARD_ID || id >= self.overlays.len() {
            return false;
        }

        self.overlays.remove(id);
        if self.current >= self.overlays.len() {
            self.current = self.overlays.len() - 1;
        }
        true
    }

    /// Remove every overlay except the dashboard and select it
    pub fn remove_all(&mut self) {
        self.overlays.truncate(1);
        self.current = DASHBOARD_ID;
    }

    pub fn count(&self) -> usize {
        self.overlays.len()
    }

    pub fn dashboard(&self) -> &OverlaySettings {
        &self.overlays[DASHBOARD_ID]
    }

    pub fn dashboard_mut(&mut self) -> &mut OverlaySettings {
        &mut self.overlays[DASHBOARD_ID]
    }

    pub fn current_id(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &OverlaySettings {
        &self.overlays[self.current]
    }

    /// Select an overlay, clamped to the last one
    pub fn set_current(&mut self, id: usize) {
        self.current = id.min(self.overlays.len() - 1);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlaySettings> {
        self.overlays.iter()
    }
}

impl Index<usize> for OverlayCollection {
    type Output = OverlaySettings;

    fn index(&self, id: usize) -> &OverlaySettings {
        &self.overlays[id]
    }
}

impl IndexMut<usize> for OverlayCollection {
    fn index_mut(&mut self, id: usize) -> &mut OverlaySettings {
        &mut self.overlays[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_always_present() {
        let mut overlays = OverlayCollection::new();
        assert_eq!(overlays.count(), 1);
        assert!(!overlays.remove(DASHBOARD_ID));

        overlays.add();
        overlays.add();
        overlays.remove_all();
        assert_eq!(overlays.count(), 1);
        assert_eq!(overlays.current_id(), DASHBOARD_ID);
    }

    #[test]
    fn test_remove_clamps_current() {
        let mut overlays = OverlayCollection::new();
        overlays.add();
        let last = overlays.add();
        overlays.set_current(last);

        assert!(overlays.remove(last));
        assert_eq!(overlays.current_id(), 1);
        assert!(!overlays.remove(5));
    }

    #[test]
    fn test_set_current_clamps() {
        let mut overlays = OverlayCollection::new();
        overlays.add();
        overlays.set_current(9);
        assert_eq!(overlays.current_id(), 1);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let overlays = OverlayCollection::new();
        let _ = &overlays[3];
    }
}
