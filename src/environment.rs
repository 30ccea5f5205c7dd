//! Install location and process capabilities

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::environment::{STEAM_INSTALL_FRAGMENT, UI_ACCESS_MARKER};
use crate::constants::paths;

/// Where the application lives and how it was installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEnvironment {
    /// Directory holding the executable and the config files
    pub application_path: PathBuf,
    pub executable_name: String,
    pub is_steam_install: bool,
}

impl AppEnvironment {
    /// Resolve the application directory: `OVERLAY_APP_DIR`, then the running
    /// executable's directory, then the platform config directory.
    pub fn detect() -> Self {
        if let Ok(dir) = std::env::var(paths::APP_DIR_ENV)
            && !dir.is_empty()
        {
            debug!(dir = %dir, "Application directory from environment");
            return Self::with_application_path(PathBuf::from(dir));
        }

        match std::env::current_exe() {
            Ok(exe) => Self::from_exe_path(&exe),
            Err(e) => {
                warn!(error = %e, "Could not resolve executable path, using config dir");
                let dir = dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(paths::APP_DIR);
                Self::with_application_path(dir)
            }
        }
    }

    /// Derive the environment from the executable's full path
    pub fn from_exe_path(exe: &Path) -> Self {
        let application_path = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        let executable_name = exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let normalized = exe.to_string_lossy().replace('\\', "/").to_lowercase();
        let is_steam_install = normalized.contains(STEAM_INSTALL_FRAGMENT);

        Self {
            application_path,
            executable_name,
            is_steam_install,
        }
    }

    /// Environment rooted at an explicit directory
    pub fn with_application_path(application_path: PathBuf) -> Self {
        Self {
            application_path,
            executable_name: env!("CARGO_PKG_NAME").to_string(),
            is_steam_install: false,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.application_path.join(paths::CONFIG_FILE)
    }

    pub fn legacy_config_path(&self) -> PathBuf {
        self.application_path.join(paths::CONFIG_LEGACY_FILE)
    }

    pub fn default_config_path(&self) -> PathBuf {
        self.application_path.join(paths::CONFIG_DEFAULT_FILE)
    }

    /// Directory of single- or multi-overlay profiles
    pub fn profile_dir(&self, multi_overlay: bool) -> PathBuf {
        let dir = if multi_overlay {
            paths::MULTI_OVERLAY_PROFILES_DIR
        } else {
            paths::OVERLAY_PROFILES_DIR
        };
        self.application_path.join(dir)
    }

    pub fn profile_path(&self, name: &str, multi_overlay: bool) -> PathBuf {
        self.profile_dir(multi_overlay)
            .join(format!("{name}.{}", paths::PROFILE_EXTENSION))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.application_path
            .join(format!("{}.manifest", self.executable_name))
    }

    /// Whether the executable's manifest requests UIAccess
    pub fn ui_access_enabled(&self) -> bool {
        match fs::read_to_string(self.manifest_path()) {
            Ok(manifest) => manifest.contains(UI_ACCESS_MARKER),
            Err(e) => {
                debug!(path = %self.manifest_path().display(), error = %e, "No readable manifest");
                false
            }
        }
    }
}
