//! Configuration management for the pad tester
//!
//! Handles loading, parsing and validation of the optional YAML configuration
//! file. Every key has a default, so a missing file yields a usable config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub guide: GuideConfig,
    #[serde(default)]
    pub pairing: PairingConfig,
}

/// Window / screen configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

/// Controller detection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Substring expected in the controller name (case-insensitive)
    #[serde(default = "default_expected_name")]
    pub expected_name: String,
    /// Re-enumeration interval while no controller is bound
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Pairing guide configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuideConfig {
    /// How long the "unplug the cable" step stays up before advancing
    #[serde(default = "default_unplug_dwell")]
    pub unplug_dwell_ms: u64,
}

/// External pairing helper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PairingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_pairing_program")]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_pairing_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_success_marker")]
    pub success_marker: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fullscreen: false,
            frame_rate: default_frame_rate(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            expected_name: default_expected_name(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl DeviceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            unplug_dwell_ms: default_unplug_dwell(),
        }
    }
}

impl GuideConfig {
    pub fn unplug_dwell(&self) -> Duration {
        Duration::from_millis(self.unplug_dwell_ms)
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_pairing_program(),
            args: Vec::new(),
            timeout_ms: default_pairing_timeout(),
            success_marker: default_success_marker(),
        }
    }
}

impl PairingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from file with validation
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::load(path)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document is a valid "all defaults" config
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.display.width == 0 || self.display.height == 0 {
            anyhow::bail!(
                "display size {}x{} must be non-zero",
                self.display.width,
                self.display.height
            );
        }
        if self.display.frame_rate == 0 || self.display.frame_rate > 240 {
            anyhow::bail!(
                "display frame_rate {} is invalid (must be 1-240)",
                self.display.frame_rate
            );
        }

        if self.device.poll_interval_ms == 0 {
            anyhow::bail!("device poll_interval_ms must be greater than zero");
        }

        if self.pairing.enabled {
            if self.pairing.program.trim().is_empty() {
                anyhow::bail!("pairing program cannot be empty when pairing is enabled");
            }
            if self.pairing.timeout_ms == 0 {
                anyhow::bail!("pairing timeout_ms must be greater than zero");
            }
            if self.pairing.success_marker.is_empty() {
                anyhow::bail!("pairing success_marker cannot be empty");
            }
        }

        Ok(())
    }
}

// Default value functions
fn default_width() -> u32 { 480 }
fn default_height() -> u32 { 320 }
fn default_frame_rate() -> u32 { 60 }
fn default_expected_name() -> String { "PLAYSTATION(R)3".to_string() }
fn default_poll_interval() -> u64 { 1500 }
fn default_unplug_dwell() -> u64 { 5000 }
fn default_true() -> bool { true }
fn default_pairing_program() -> String { "sixpair".to_string() }
fn default_pairing_timeout() -> u64 { 5000 }
fn default_success_marker() -> String { "Setting master bd_addr".to_string() }
