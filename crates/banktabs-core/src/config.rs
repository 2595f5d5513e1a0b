use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User settings for the bank tabs feature, read from `config.toml`.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Keep the selected tab between banking sessions.
    pub remember_selection: bool,
    /// The "All" tab only shows items no other tab claims.
    pub hide_from_all: bool,
    /// Dim unmatched slots instead of hiding them.
    pub gray_out: bool,
    /// Assigning an item to a tab removes it from every other tab.
    pub mutually_exclusive: bool,
    pub allow_resize: bool,
    pub allow_add_remove: bool,
    pub show_reordering: bool,
    pub appearance: Appearance,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remember_selection: false,
            hide_from_all: true,
            gray_out: false,
            mutually_exclusive: true,
            allow_resize: false,
            allow_add_remove: true,
            show_reordering: false,
            appearance: Appearance::default(),
        }
    }
}

/// Colours and padding of the tab controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub inactive_color: String,
    pub active_color: String,
    pub hovered_color: String,
    pub padding_width: u16,
    pub padding_height: u16,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            inactive_color: "#464646".to_string(),
            active_color: "#878787ff".to_string(),
            hovered_color: "#787878ff".to_string(),
            padding_width: 8,
            padding_height: 8,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/bank-tabs/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("bank-tabs/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("bank-tabs\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => Self::default(),
        }
    }

    /// Read a config file, falling back to defaults when it is missing or unparsable.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_plugin_settings() {
        let config = AppConfig::default();
        assert!(!config.remember_selection);
        assert!(config.hide_from_all);
        assert!(!config.gray_out);
        assert!(config.mutually_exclusive);
        assert!(config.allow_add_remove);
        assert_eq!(config.appearance.inactive_color, "#464646");
        assert_eq!(config.appearance.padding_width, 8);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gray_out = true\n\n[appearance]\nactive_color = \"#ffffff\"\n")
            .unwrap();

        let config = AppConfig::load_from(&path);
        assert!(config.gray_out);
        assert!(config.hide_from_all);
        assert_eq!(config.appearance.active_color, "#ffffff");
        assert_eq!(config.appearance.hovered_color, "#787878ff");
    }

    #[test]
    fn test_missing_or_broken_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(AppConfig::load_from(&missing), AppConfig::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "gray_out = = true").unwrap();
        assert_eq!(AppConfig::load_from(&broken), AppConfig::default());
    }
}
