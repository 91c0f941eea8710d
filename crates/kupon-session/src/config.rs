//! # Kiosk Configuration
//!
//! Rendering and display settings for the kiosk.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KUPON_QR_SIZE=512                                                  │
//! │     KUPON_TICK_INTERVAL_MS=500                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kupon/kupon.toml (Linux)                                 │
//! │     ~/Library/Application Support/id.kupon.kupon/kupon.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     300px QR, 2-module margin, 1 second tick                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kupon.toml
//! [qr]
//! size = 300
//! margin = 2
//! error_correction = "medium"  # low | medium | quartile | high
//! dark = "#000000"
//! light = "#FFFFFF"
//!
//! [barcode]
//! module_width = 2
//! bar_height = 128
//! margin = 5
//! padding = 10
//! canvas_height = 128
//!
//! [countdown]
//! tick_interval_ms = 1000
//!
//! [display]
//! validity_notice = "Kode QR akan kedaluwarsa dalam 10 menit. Muat ulang untuk memperbarui."
//! ```
//!
//! The validity window, forced outlet values and forced description are
//! not configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use kupon_core::copy::VALIDITY_NOTICE;
use kupon_render::{BarcodeOptions, ErrorCorrection, LinearRenderer, QrOptions, QrRenderer};

use crate::error::{SessionError, SessionResult};

/// File name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "kupon.toml";

// =============================================================================
// Countdown Settings
// =============================================================================

/// Countdown ticker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSettings {
    /// Time between countdown updates (milliseconds).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval() -> u64 {
    1000
}

impl Default for CountdownSettings {
    fn default() -> Self {
        CountdownSettings {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl CountdownSettings {
    /// Returns the tick interval.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Display copy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Notice shown under the code.
    ///
    /// The stock text says ten minutes; codes actually live for 48 hours.
    #[serde(default = "default_validity_notice")]
    pub validity_notice: String,
}

fn default_validity_notice() -> String {
    VALIDITY_NOTICE.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            validity_notice: default_validity_notice(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete kiosk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KuponConfig {
    /// QR renderer options.
    #[serde(default)]
    pub qr: QrOptions,

    /// Linear barcode renderer options.
    #[serde(default)]
    pub barcode: BarcodeOptions,

    /// Countdown ticker settings.
    #[serde(default)]
    pub countdown: CountdownSettings,

    /// Display copy.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl KuponConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kupon.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kupon config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kupon config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads a config file without environment overrides.
    pub fn from_file(path: &Path) -> SessionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Kupon config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Renderers are built once here so a bad color is reported at startup
    /// rather than on the first issuance.
    pub fn validate(&self) -> SessionResult<()> {
        if self.qr.size == 0 {
            return Err(SessionError::InvalidConfig("qr.size must be greater than 0".into()));
        }

        if self.barcode.module_width == 0 || self.barcode.bar_height == 0 {
            return Err(SessionError::InvalidConfig(
                "barcode.module_width and barcode.bar_height must be greater than 0".into(),
            ));
        }

        if self.barcode.canvas_height == 0 {
            return Err(SessionError::InvalidConfig(
                "barcode.canvas_height must be greater than 0".into(),
            ));
        }

        if self.countdown.tick_interval_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "countdown.tick_interval_ms must be greater than 0".into(),
            ));
        }

        self.qr_renderer()?;
        self.barcode_renderer()?;

        Ok(())
    }

    /// Builds the QR renderer described by `[qr]`.
    pub fn qr_renderer(&self) -> SessionResult<QrRenderer> {
        QrRenderer::new(self.qr.clone())
            .map_err(|e| SessionError::InvalidConfig(format!("[qr] {e}")))
    }

    /// Builds the barcode renderer described by `[barcode]`.
    pub fn barcode_renderer(&self) -> SessionResult<LinearRenderer> {
        LinearRenderer::new(self.barcode.clone())
            .map_err(|e| SessionError::InvalidConfig(format!("[barcode] {e}")))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let number = |key: &str| -> Option<u32> {
            let raw = lookup(key)?;
            match raw.trim().parse::<u32>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric override");
                    None
                }
            }
        };

        // QR
        if let Some(size) = number("KUPON_QR_SIZE") {
            debug!(size, "Overriding QR size from environment");
            self.qr.size = size;
        }
        if let Some(margin) = number("KUPON_QR_MARGIN") {
            self.qr.margin = margin;
        }
        if let Some(dark) = lookup("KUPON_QR_DARK") {
            self.qr.dark = dark;
        }
        if let Some(light) = lookup("KUPON_QR_LIGHT") {
            self.qr.light = light;
        }
        if let Some(level) = lookup("KUPON_QR_ERROR_CORRECTION") {
            match level.to_lowercase().as_str() {
                "l" | "low" => self.qr.error_correction = ErrorCorrection::Low,
                "m" | "medium" => self.qr.error_correction = ErrorCorrection::Medium,
                "q" | "quartile" => self.qr.error_correction = ErrorCorrection::Quartile,
                "h" | "high" => self.qr.error_correction = ErrorCorrection::High,
                _ => warn!(level = %level, "Unknown error correction level in environment"),
            }
        }

        // Barcode
        if let Some(width) = number("KUPON_BARCODE_MODULE_WIDTH") {
            self.barcode.module_width = width;
        }
        if let Some(height) = number("KUPON_BARCODE_BAR_HEIGHT") {
            self.barcode.bar_height = height;
        }

        // Countdown
        if let Some(raw) = lookup("KUPON_TICK_INTERVAL_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding tick interval from environment");
                    self.countdown.tick_interval_ms = ms;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric tick interval"),
            }
        }

        // Display
        if let Some(notice) = lookup("KUPON_VALIDITY_NOTICE") {
            self.display.validity_notice = notice;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "kupon", "kupon")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = KuponConfig::default();
        assert_eq!(config.qr.size, 300);
        assert_eq!(config.qr.margin, 2);
        assert_eq!(config.barcode.bar_height, 128);
        assert_eq!(config.countdown.tick_interval(), Duration::from_secs(1));
        assert!(config.display.validity_notice.contains("10 menit"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KuponConfig::default();

        config.qr.size = 0;
        assert!(config.validate().is_err());

        config.qr.size = 300;
        config.qr.dark = "not-a-color".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());

        config.qr.dark = "#000".to_string();
        config.countdown.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: KuponConfig = toml::from_str(
            r#"
            [qr]
            size = 512

            [countdown]
            tick_interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.qr.size, 512);
        assert_eq!(config.qr.margin, 2);
        assert_eq!(config.qr.dark, "#000000");
        assert_eq!(config.barcode, BarcodeOptions::default());
        assert_eq!(config.countdown.tick_interval_ms, 250);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("KUPON_QR_SIZE", "400"),
            ("KUPON_QR_ERROR_CORRECTION", "H"),
            ("KUPON_BARCODE_BAR_HEIGHT", "tall"),
            ("KUPON_VALIDITY_NOTICE", "Berlaku 48 jam."),
        ]
        .into_iter()
        .collect();

        let mut config = KuponConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.qr.size, 400);
        assert_eq!(config.qr.error_correction, ErrorCorrection::High);
        assert_eq!(config.barcode.bar_height, 128);
        assert_eq!(config.display.validity_notice, "Berlaku 48 jam.");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = KuponConfig::default();
        config.qr.size = 256;
        config.barcode.padding = 20;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[qr]"));
        assert!(contents.contains("[barcode]"));

        let reloaded = KuponConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[qr\nsize = ").unwrap();

        let err = KuponConfig::load(Some(path.clone())).unwrap_err();
        assert!(matches!(err, SessionError::ConfigLoadFailed(_)));

        // load_or_default still yields something usable.
        assert_eq!(KuponConfig::load_or_default(Some(path)).qr.size, 300);
    }
}
