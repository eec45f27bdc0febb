//! File System Utilities
//!
//! Configuration directory management.

use crate::constants::{PROJECT_APPLICATION, PROJECT_ORGANIZATION, PROJECT_QUALIFIER};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get or create the configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/dashboard-filters/` or `$XDG_CONFIG_HOME/dashboard-filters/`
/// - **macOS**: `~/Library/Application Support/com.dashboard.dashboard-filters/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\dashboard\dashboard-filters\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let Some(project_dirs) =
        ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
    else {
        return Err(Error::InvalidConfig {
            message: "Could not determine project directories".to_string(),
        });
    };

    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}
