// Application settings
// Loaded from ~/.config/sendforge/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use sendforge_core::ChainFamily;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Send flow
    #[serde(rename = "send.defaultChain")]
    pub default_chain: Option<ChainFamily>,

    /// Display currency code for the fiat field (display only; the
    /// engine derives in USD).
    #[serde(rename = "send.fiatCurrency")]
    pub fiat_currency: String,

    // Price/gas feed
    #[serde(rename = "feed.endpoint")]
    pub feed_endpoint: String,

    #[serde(rename = "feed.timeoutSecs")]
    pub feed_timeout_secs: u64,

    #[serde(rename = "feed.refreshSecs")]
    pub feed_refresh_secs: u64,

    // Input guard
    #[serde(rename = "input.noticeDebounceMs")]
    pub notice_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Send flow
            default_chain: Some(ChainFamily::Ethereum),
            fiat_currency: "USD".to_string(),
            // Feed
            feed_endpoint: "http://localhost:8787".to_string(),
            feed_timeout_secs: 10,
            feed_refresh_secs: 30,
            // Input guard
            notice_debounce_ms: 1500,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sendforge");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path (tests point this at a temp dir).
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Send flow
    // Chain options: "ethereum", "solana", "bitcoin"
    "send.defaultChain": "ethereum",
    "send.fiatCurrency": "USD",

    // Price/gas feed (stub endpoint by default)
    "feed.endpoint": "http://localhost:8787",
    "feed.timeoutSecs": 10,
    "feed.refreshSecs": 30,

    // Input guard
    "input.noticeDebounceMs": 1500
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.default_chain, Some(ChainFamily::Ethereum));
        assert_eq!(settings.fiat_currency, "USD");
        assert!(settings.feed_timeout_secs > 0);
    }

    #[test]
    fn roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.default_chain = Some(ChainFamily::Bitcoin);
        settings.notice_debounce_ms = 900;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.default_chain, Some(ChainFamily::Bitcoin));
        assert_eq!(loaded.notice_debounce_ms, 900);
    }

    #[test]
    fn comment_lines_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{\n// a comment\n\"send.fiatCurrency\": \"EUR\"\n}").unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.fiat_currency, "EUR");
        // Unspecified keys fall back to defaults.
        assert_eq!(loaded.feed_timeout_secs, 10);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.fiat_currency, "USD");
    }
}
