use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Cross-invocation UI state, currently just the sticky project selection.
#[derive(Serialize, Deserialize, Default)]
pub struct AppState {
    pub selected_project: Option<i64>,
}

impl AppState {
    /// Best-effort load; an unreadable or malformed file means defaults.
    pub fn load() -> Self {
        let path = match Self::state_path() {
            Ok(p) => p,
            Err(_) => return Self::default(),
        };

        Self::read_from(&path)
    }

    pub fn save(&self) {
        let path = match Self::state_path() {
            Ok(p) => p,
            Err(_) => return,
        };

        self.write_to(&path);
    }

    fn state_path() -> Result<PathBuf, ()> {
        Config::config_path()
            .map(|p| p.with_file_name("state.json"))
            .map_err(|_| ())
    }

    fn read_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(_) => Self::default(),
        }
    }

    fn write_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let contents = match serde_json::to_string_pretty(self) {
            Ok(c) => c,
            Err(_) => return,
        };

        let _ = std::fs::write(path, contents);
    }
}
