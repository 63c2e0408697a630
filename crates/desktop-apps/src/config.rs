//! Provider configuration, stored as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default edge length of placeholder icons.
pub const DEFAULT_ICON_SIZE: u32 = 48;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Edge length of generated placeholder icons.
    pub icon_size: u32,
    /// Additional .desktop directories, searched before the XDG ones.
    pub extra_application_dirs: Vec<PathBuf>,
    /// Icon themes to prefer over the defaults.
    pub icon_themes: Vec<String>,
    /// Uninstall command, `{package}` is replaced with the package identifier.
    /// e.g. ["flatpak", "uninstall", "-y", "{package}"]
    pub uninstall_command: Option<Vec<String>>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            icon_size: DEFAULT_ICON_SIZE,
            extra_application_dirs: Vec::new(),
            icon_themes: Vec::new(),
            uninstall_command: None,
        }
    }
}

impl DesktopConfig {
    /// ~/.config/get-apps/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("get-apps").join("config.json"))
    }

    /// Load from config file, or return default if missing or invalid.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| match serde_json::from_str(&s) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save to config file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DesktopConfig::load(&tmp.path().join("nope.json"));
        assert_eq!(config, DesktopConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "icon_themes": ["Papirus"] }"#).unwrap();

        let config = DesktopConfig::load(&path);
        assert_eq!(config.icon_themes, vec!["Papirus"]);
        assert_eq!(config.icon_size, DEFAULT_ICON_SIZE);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(DesktopConfig::load(&path), DesktopConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/config.json");
        let config = DesktopConfig {
            icon_size: 64,
            uninstall_command: Some(vec!["flatpak".into(), "uninstall".into(), "{package}".into()]),
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(DesktopConfig::load(&path), config);
    }
}
