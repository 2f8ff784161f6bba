//! Directory where the executable lives. Preferences and exported images are
//! stored next to the binary so a standalone copy keeps its own state.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Directory for storing exported frames.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

/// Timestamp for file names (seconds since epoch).
pub fn now_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", dur.as_secs())
}
