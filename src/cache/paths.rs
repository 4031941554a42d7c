// Cache and config path utilities.
// Resolves platform directories and maps cache keys to file names.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ainav")
}

/// Get the base cache directory (~/.cache/ainav on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one file per cached search page.
pub fn search_cache_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("search"))
}

/// Directory for log files.
pub fn log_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("logs"))
}

/// Path to the persisted user settings.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("settings.json"))
}

/// File name for a cache key.
pub fn entry_file_name(key: &str) -> String {
    format!("{}.json", encode_key(key))
}

/// Percent-encode everything outside `[A-Za-z0-9_-]`.
///
/// Unlike a lossy sanitizer this keeps distinct keys in distinct files.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
