//! Named profile files under `profiles/overlays` and `profiles/multi-overlays`

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::overlay::OverlaySection;
use crate::config::ConfigContext;
use crate::constants::listing::{DEFAULT_ENTRY, NEW_PROFILE_ENTRY};
use crate::constants::overlay::{DASHBOARD_ID, DEFAULT_PROFILE_WIDTH_PERCENT};
use crate::constants::paths::PROFILE_EXTENSION;
use crate::constants::sections;
use crate::host::Host;
use crate::ini::IniDocument;

fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl ConfigContext {
    fn checked_profile_path(&self, name: &str, multi_overlay: bool) -> Result<PathBuf> {
        if !is_valid_profile_name(name) {
            bail!("Invalid profile name: {name:?}");
        }
        Ok(self.env.profile_path(name, multi_overlay))
    }

    /// Read an existing profile file. `None` when the name is invalid, the
    /// file is missing or it can't be read.
    fn read_profile_file(&self, name: &str, multi_overlay: bool) -> Option<IniDocument> {
        let path = match self.checked_profile_path(name, multi_overlay) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Not loading profile");
                return None;
            }
        };

        if !path.exists() {
            info!(path = %path.display(), "Profile not found");
            return None;
        }

        match IniDocument::load(&path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read profile");
                None
            }
        }
    }

    /// Load a single-overlay profile into `overlay_id`. Returns whether the
    /// profile existed.
    pub fn load_overlay_profile_from_file(&mut self, name: &str, overlay_id: usize, host: &dyn Host) -> bool {
        let Some(doc) = self.read_profile_file(name, false) else {
            return false;
        };
        self.load_overlay_profile(&doc, OverlaySection::Single, overlay_id, host);
        info!(profile = name, overlay_id = overlay_id, "Loaded overlay profile");
        true
    }

    /// Save overlay `overlay_id` as a single-overlay profile
    pub fn save_overlay_profile_to_file(&self, name: &str, overlay_id: usize, host: &dyn Host) -> Result<()> {
        let path = self.checked_profile_path(name, false)?;
        let mut doc = IniDocument::load(&path)?;
        self.save_overlay_profile(&mut doc, OverlaySection::Single, overlay_id, host);
        doc.save(&path)?;
        info!(path = %path.display(), overlay_id = overlay_id, "Saved overlay profile");
        Ok(())
    }

    /// Load a multi-overlay profile. Returns whether the profile existed.
    pub fn load_multi_overlay_profile_from_file(
        &mut self,
        name: &str,
        clear_existing: bool,
        host: &dyn Host,
    ) -> bool {
        let Some(doc) = self.read_profile_file(name, true) else {
            return false;
        };
        self.load_multi_overlay_profile(&doc, clear_existing, host);
        info!(profile = name, clear_existing = clear_existing, "Loaded multi-overlay profile");
        true
    }

    /// Save every overlay as a multi-overlay profile
    pub fn save_multi_overlay_profile_to_file(&self, name: &str, host: &dyn Host) -> Result<()> {
        let path = self.checked_profile_path(name, true)?;
        let mut doc = IniDocument::load(&path)?;
        self.save_multi_overlay_profile(&mut doc, host);
        doc.save(&path)?;
        info!(path = %path.display(), overlays = self.overlays.count(), "Saved multi-overlay profile");
        Ok(())
    }

    /// The "Default" profile: a normal load of an empty document.
    ///
    /// For a single overlay other than the dashboard the width is seeded,
    /// since an empty transform carries no scale for the legacy width to be
    /// folded into. The multi-overlay default leaves just the dashboard.
    pub fn load_overlay_profile_default(&mut self, multi_overlay: bool, overlay_id: usize, host: &dyn Host) {
        let mut doc = IniDocument::new();

        if multi_overlay {
            self.overlays.remove_all();
            self.load_overlay_profile(&doc, OverlaySection::Single, DASHBOARD_ID, host);
            return;
        }

        if overlay_id != DASHBOARD_ID {
            doc.write_int(sections::OVERLAY_SINGLE, "Width", DEFAULT_PROFILE_WIDTH_PERCENT);
        }
        self.load_overlay_profile(&doc, OverlaySection::Single, overlay_id, host);
    }

    pub fn delete_overlay_profile(&self, name: &str, multi_overlay: bool) -> Result<()> {
        let path = self.checked_profile_path(name, multi_overlay)?;
        fs::remove_file(&path).with_context(|| format!("Failed to delete profile {}", path.display()))?;
        info!(path = %path.display(), "Deleted profile");
        Ok(())
    }

    /// Profile names for a picker: `Default`, the stored profiles sorted by
    /// name, then `[New Profile]`
    pub fn overlay_profile_list(&self, multi_overlay: bool) -> Vec<String> {
        let dir = self.env.profile_dir(multi_overlay);
        let mut names = Vec::new();

        match fs::read_dir(&dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file()
                        && path.extension().is_some_and(|ext| ext == PROFILE_EXTENSION)
                        && let Some(stem) = path.file_stem()
                    {
                        names.push(stem.to_string_lossy().into_owned());
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "No profile directory");
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Could not list profiles");
            }
        }

        names.sort();

        let mut list = Vec::with_capacity(names.len() + 2);
        list.push(DEFAULT_ENTRY.to_string());
        list.extend(names);
        list.push(NEW_PROFILE_ENTRY.to_string());
        list
    }
}
