//! Default locations for sequence logs
//!
//! Scenarios normally name their own log file. When they do not, logs land
//! in a platform-appropriate data directory so repeated runs of the same
//! scenario append to a stable path.

use std::io;
use std::path::{Path, PathBuf};

/// Application name used for platform directory lookups
const APP_NAME: &str = "diagrun";

/// Get the default log directory
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.local/share/diagrun/logs/`
/// - macOS: `~/Library/Application Support/diagrun/logs/`
/// - Windows: `%APPDATA%\diagrun\data\logs\`
///
/// Falls back to `<tmp>/diagrun/logs` when no home directory is available
/// (CI containers, stripped-down environments).
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME).join("logs"))
}

/// Compute the default log path for a scenario name
///
/// The name is slugified (non-alphanumeric runs become single dashes) so
/// scenario titles like "dotnet sdk smoke" map to `dotnet-sdk-smoke.log`.
pub fn default_log_path(scenario_name: &str) -> PathBuf {
    let mut slug = String::with_capacity(scenario_name.len());
    let mut last_dash = true;
    for c in scenario_name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    let file = if slug.is_empty() {
        "scenario.log".to_string()
    } else {
        format!("{slug}.log")
    };
    default_log_dir().join(file)
}

/// Ensure the parent directory of a log path exists
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_dir_is_valid() {
        let dir = default_log_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_default_log_path_slugifies_name() {
        let path = default_log_path("dotnet sdk smoke");
        assert!(path.ends_with("dotnet-sdk-smoke.log"));
    }

    #[test]
    fn test_default_log_path_empty_name() {
        let path = default_log_path("  ");
        assert!(path.ends_with("scenario.log"));
    }
}
