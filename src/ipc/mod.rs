//! Settings notifications via Unix sockets
//!
//! Uses length-prefixed JSON over Unix domain sockets. Delivery is
//! best-effort: the sender connects, writes one message and hangs up.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

mod messages;
pub use messages::ConfigMessage;

#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;

/// Maximum message size the renderer accepts; notifications are tiny
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

const SOCKET_FILE: &str = "overlay-settings/config.sock";

/// Get default socket path (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_socket_path() -> Result<PathBuf> {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(runtime_dir).join(SOCKET_FILE));
    }

    let cache = dirs::cache_dir()
        .context("Failed to determine cache directory (no XDG_RUNTIME_DIR or HOME)")?;
    Ok(cache.join(SOCKET_FILE))
}

/// Connect, send one message, disconnect
#[cfg(unix)]
pub fn send_message(path: &Path, msg: &ConfigMessage) -> Result<()> {
    let mut stream = UnixStream::connect(path)
        .with_context(|| format!("Failed to connect to config socket at {}", path.display()))?;
    write_message(&mut stream, msg)
}

/// Write length-prefixed message to stream
fn write_message<T: Serialize>(stream: &mut impl Write, msg: &T) -> Result<()> {
    let json = serde_json::to_vec(msg).context("Failed to serialize message to JSON")?;
    if json.len() > MAX_MESSAGE_SIZE {
        bail!("Message too large: {} bytes (max: {})", json.len(), MAX_MESSAGE_SIZE);
    }

    // u32 little-endian length prefix
    let len = json.len() as u32;
    stream
        .write_all(&len.to_le_bytes())
        .context("Failed to write message length")?;
    stream
        .write_all(&json)
        .context("Failed to write message payload")?;
    stream.flush().context("Failed to flush stream")?;

    Ok(())
}
