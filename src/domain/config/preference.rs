// Copyright 2025 Kompo Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::{PREFERENCE_DIR, PREFERENCE_FILE};
use crate::shared::error::{ComponentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-level tool preferences, stored at `~/.kompo/preference.toml`.
/// Missing file means defaults; a malformed file is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preference {
    /// Whether to check for a newer release at startup.
    pub update_notification: bool,

    /// Default application scope when --app is not given.
    pub application: Option<String>,

    /// Default project scope when --project is not given.
    pub project: Option<String>,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            update_notification: true,
            application: None,
            project: None,
        }
    }
}

/// Keys accepted by `kompo preference set` / `unset`.
pub const SETTABLE_KEYS: &[&str] = &["update_notification", "application", "project"];

impl Preference {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(PREFERENCE_DIR).join(PREFERENCE_FILE))
    }

    /// Load preferences from the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ComponentError::config(format!(
                "Failed to read preference file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "update_notification" => {
                self.update_notification = value.parse().map_err(|_| {
                    ComponentError::config(format!(
                        "Invalid value '{}' for update_notification, expected 'true' or 'false'",
                        value
                    ))
                })?;
            }
            "application" => self.application = Some(value.to_string()),
            "project" => self.project = Some(value.to_string()),
            _ => return Err(Self::unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "update_notification" => self.update_notification = true,
            "application" => self.application = None,
            "project" => self.project = None,
            _ => return Err(Self::unknown_key(key)),
        }
        Ok(())
    }

    fn unknown_key(key: &str) -> ComponentError {
        ComponentError::config(format!(
            "Unknown preference key '{}'. Supported keys: {}",
            key,
            SETTABLE_KEYS.join(", ")
        ))
    }

    /// Persist to the default location, creating `~/.kompo` if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().ok_or_else(|| {
            ComponentError::config("Could not determine the home directory for the preference file")
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ComponentError::config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pref = Preference::default();
        assert!(pref.update_notification);
        assert!(pref.application.is_none());
        assert!(pref.project.is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference.toml");

        let pref = Preference {
            update_notification: false,
            application: Some("shop".to_string()),
            project: Some("staging".to_string()),
        };
        pref.save_to(&path).unwrap();

        let loaded = Preference::from_file(&path).unwrap();
        assert!(!loaded.update_notification);
        assert_eq!(loaded.application.as_deref(), Some("shop"));
        assert_eq!(loaded.project.as_deref(), Some("staging"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference.toml");
        std::fs::write(&path, "project = \"dev\"\n").unwrap();

        let loaded = Preference::from_file(&path).unwrap();
        assert!(loaded.update_notification);
        assert_eq!(loaded.project.as_deref(), Some("dev"));
    }

    #[test]
    fn test_set_and_unset_keys() {
        let mut pref = Preference::default();
        pref.set("application", "shop").unwrap();
        pref.set("update_notification", "false").unwrap();
        assert_eq!(pref.application.as_deref(), Some("shop"));
        assert!(!pref.update_notification);

        pref.unset("application").unwrap();
        pref.unset("update_notification").unwrap();
        assert!(pref.application.is_none());
        assert!(pref.update_notification);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_bool() {
        let mut pref = Preference::default();
        assert!(pref.set("colour", "red").is_err());
        assert!(pref.set("update_notification", "maybe").is_err());
    }

    #[test]
    fn test_set_then_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference.toml");

        let mut pref = Preference::default();
        pref.set("project", "staging").unwrap();
        pref.save_to(&path).unwrap();

        let loaded = Preference::from_file(&path).unwrap();
        assert_eq!(loaded.project.as_deref(), Some("staging"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference.toml");
        std::fs::write(&path, "update_notification = \"maybe\"\n").unwrap();

        assert!(Preference::from_file(&path).is_err());
    }
}
