//! Editor-wide settings document.
//!
//! Settings are presentation preferences, reproducible from defaults,
//! so the corruption policy is reset-and-warn rather than the project
//! store's hard failure: losing a theme choice is an annoyance, losing
//! authored scenes is not.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Process-wide editor preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_ui_scale")]
    pub ui_scale: f64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub custom_theme: String,
    #[serde(default)]
    pub bookmarked_projects: Vec<String>,
}

fn default_ui_scale() -> f64 {
    1.0
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_scale: default_ui_scale(),
            theme: default_theme(),
            custom_theme: String::new(),
            bookmarked_projects: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file is first-run and a
    /// corrupt file is reset: either way the defaults are written back
    /// and returned. Only real IO failures surface.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        if !path.is_file() {
            let settings = Settings::default();
            settings.save(path)?;
            return Ok(settings);
        }
        let contents = fs::read_to_string(path)?;
        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("settings file corrupt ({e}), resetting to defaults");
                Self::reset_to_default(path)
            }
        }
    }

    /// Overwrite `path` with the defaults and return them.
    pub fn reset_to_default(path: &Path) -> Result<Settings, SettingsError> {
        let settings = Settings::default();
        settings.save(path)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::Io(io::Error::other(e)))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Scale a pixel size by the configured UI scale.
    pub fn scaled_size(&self, size: u32) -> u32 {
        (size as f64 * self.ui_scale) as u32
    }

    pub fn is_bookmarked(&self, name: &str) -> bool {
        self.bookmarked_projects.iter().any(|n| n == name)
    }

    pub fn bookmark(&mut self, name: &str) {
        if !self.is_bookmarked(name) {
            self.bookmarked_projects.push(name.to_string());
        }
    }

    pub fn unbookmark(&mut self, name: &str) {
        self.bookmarked_projects.retain(|n| n != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.is_file());
    }

    #[test]
    fn load_corrupt_resets_and_rewrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{broken").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
        // Unlike a corrupt project file, the settings file IS replaced
        let reread: Settings =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.ui_scale = 1.5;
        settings.theme = "light".to_string();
        settings.bookmark("Demo");
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme": "light"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.ui_scale, 1.0);
        assert!(settings.bookmarked_projects.is_empty());
    }

    #[test]
    fn scaled_size_applies_ui_scale() {
        let mut settings = Settings::default();
        assert_eq!(settings.scaled_size(16), 16);
        settings.ui_scale = 1.5;
        assert_eq!(settings.scaled_size(16), 24);
        settings.ui_scale = 0.5;
        assert_eq!(settings.scaled_size(16), 8);
    }

    #[test]
    fn bookmarks_deduplicate() {
        let mut settings = Settings::default();
        settings.bookmark("Demo");
        settings.bookmark("Demo");
        assert_eq!(settings.bookmarked_projects.len(), 1);
        settings.unbookmark("Demo");
        assert!(!settings.is_bookmarked("Demo"));
    }
}
