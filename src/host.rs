//! Collaborators provided by the surrounding application
//!
//! The settings layer never enumerates windows, inspects processes or talks to
//! the rendering process itself. It asks a [`Host`] instead.

use std::path::PathBuf;
use tracing::debug;

use crate::ipc::ConfigMessage;

/// Opaque native window handle, 0 when no window is attached
pub type WindowHandle = isize;

/// Window as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub exe_name: String,
}

/// Services the settings layer consumes. Every method has a neutral default,
/// so a host only implements what it can actually provide.
pub trait Host {
    /// Best match for a window remembered by title and executable name
    fn find_closest_window(&self, _title: &str, _exe_name: &str) -> Option<WindowInfo> {
        None
    }

    /// Live information about an attached window
    fn window_info(&self, _handle: WindowHandle) -> Option<WindowInfo> {
        None
    }

    /// Fire-and-forget notification to the rendering process
    fn post_config_message(&self, _message: ConfigMessage) {}

    /// Whether the elevated helper process is running
    fn is_elevated_mode_active(&self) -> bool {
        false
    }

    fn monitor_count(&self) -> i32 {
        1
    }
}

/// Host for command-line use: no windows, no monitors beyond one, and
/// notifications sent over the config socket when one is configured.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    socket_path: Option<PathBuf>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_socket(socket_path: PathBuf) -> Self {
        Self {
            socket_path: Some(socket_path),
        }
    }
}

impl Host for HeadlessHost {
    fn post_config_message(&self, message: ConfigMessage) {
        let Some(path) = &self.socket_path else {
            debug!(?message, "No config socket, dropping notification");
            return;
        };

        #[cfg(unix)]
        if let Err(e) = crate::ipc::send_message(path, &message) {
            debug!(socket = %path.display(), error = %e, "Notification not delivered");
        }

        #[cfg(not(unix))]
        debug!(socket = %path.display(), ?message, "Config socket unsupported on this platform");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording host for tests

    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub windows: Vec<WindowInfo>,
        pub elevated: bool,
        pub monitors: i32,
        pub messages: RefCell<Vec<ConfigMessage>>,
        pub lookups: RefCell<Vec<(String, String)>>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self {
                monitors: 1,
                ..Default::default()
            }
        }

        pub fn with_window(mut self, handle: WindowHandle, title: &str, exe_name: &str) -> Self {
            self.windows.push(WindowInfo {
                handle,
                title: title.to_string(),
                exe_name: exe_name.to_string(),
            });
            self
        }

        pub fn take_messages(&self) -> Vec<ConfigMessage> {
            self.messages.take()
        }
    }

    impl Host for RecordingHost {
        fn find_closest_window(&self, title: &str, exe_name: &str) -> Option<WindowInfo> {
            self.lookups
                .borrow_mut()
                .push((title.to_string(), exe_name.to_string()));

            // Exact executable match wins, then any window sharing a title prefix
            self.windows
                .iter()
                .find(|w| w.exe_name == exe_name && w.title == title)
                .or_else(|| self.windows.iter().find(|w| w.exe_name == exe_name))
                .or_else(|| self.windows.iter().find(|w| title.starts_with(&w.title)))
                .cloned()
        }

        fn window_info(&self, handle: WindowHandle) -> Option<WindowInfo> {
            self.windows.iter().find(|w| w.handle == handle).cloned()
        }

        fn post_config_message(&self, message: ConfigMessage) {
            self.messages.borrow_mut().push(message);
        }

        fn is_elevated_mode_active(&self) -> bool {
            self.elevated
        }

        fn monitor_count(&self) -> i32 {
            self.monitors
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoolId;

    struct NullHost;
    impl Host for NullHost {}

    #[test]
    fn test_default_host_methods() {
        let host = NullHost;
        assert_eq!(host.find_closest_window("a", "b"), None);
        assert_eq!(host.window_info(5), None);
        assert!(!host.is_elevated_mode_active());
        assert_eq!(host.monitor_count(), 1);
    }

    #[test]
    fn test_headless_without_socket_drops_messages() {
        let host = HeadlessHost::new();
        // Must not panic or block
        host.post_config_message(ConfigMessage::set_bool(BoolId::InterfaceDimUi, true));
    }
}
