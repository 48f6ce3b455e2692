use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `~/.local/state/burst`, or the platform data dir when HOME is unset
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("burst"))
        } else {
            ProjectDirs::from("", "", "burst").map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn state_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("state.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("burst.log"))
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "burst").map(|dirs| dirs.config_dir().join("config.json"))
    }
}
