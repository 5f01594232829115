// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Configuration module

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::sensors::ThermalZonePaths;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Web dashboard configuration
    pub web: WebConfig,

    /// Terminal dashboard configuration
    pub terminal: TerminalConfig,

    /// Metric sources
    pub sensors: SensorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            web: WebConfig::default(),
            terminal: TerminalConfig::default(),
            sensors: SensorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("hostwatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Reject values that would stall the sampler or the redraw loop
    pub fn validate(&self) -> Result<()> {
        if self.web.broadcast_interval_ms == 0 {
            bail!("web.broadcast_interval_ms must be greater than zero");
        }
        if self.web.subscriber_buffer == 0 {
            bail!("web.subscriber_buffer must be greater than zero");
        }
        if self.terminal.refresh_interval_ms == 0 {
            bail!("terminal.refresh_interval_ms must be greater than zero");
        }
        Ok(())
    }
}

/// Web dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,

    /// HTTP port
    pub port: u16,

    /// Push cadence for WebSocket subscribers
    pub broadcast_interval_ms: u64,

    /// Snapshots queued per subscriber before it is considered stalled
    pub subscriber_buffer: usize,

    /// Maximum concurrent WebSocket subscribers
    pub max_clients: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            broadcast_interval_ms: 2000,
            subscriber_buffer: 8,
            max_clients: 64,
        }
    }
}

impl WebConfig {
    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_millis(self.broadcast_interval_ms)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Terminal dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Redraw cadence
    pub refresh_interval_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 1000,
        }
    }
}

impl TerminalConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Metric source locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// procfs mount
    pub proc_root: PathBuf,

    /// sysfs mount
    pub sys_root: PathBuf,

    /// Filesystem reported in the disk panel
    pub disk_mount: PathBuf,

    /// Block devices whose I/O counters are reported, first match wins
    pub disk_devices: Vec<String>,

    /// GPIO sysfs root, defaults to `<sys_root>/class/gpio`
    pub gpio_root: Option<PathBuf>,

    /// Thermal zone files, relative to `sys_root` unless absolute
    pub thermal_zones: ThermalZoneConfig,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            disk_mount: PathBuf::from("/"),
            disk_devices: vec!["sda".to_string(), "mmcblk0".to_string()],
            gpio_root: None,
            thermal_zones: ThermalZoneConfig::default(),
        }
    }
}

impl SensorConfig {
    /// Sources rooted at fixture trees, for tests and chroots
    pub fn rooted(proc_root: &Path, sys_root: &Path, disk_mount: &Path) -> Self {
        Self {
            proc_root: proc_root.to_path_buf(),
            sys_root: sys_root.to_path_buf(),
            disk_mount: disk_mount.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn gpio_path(&self) -> PathBuf {
        self.gpio_root
            .clone()
            .unwrap_or_else(|| self.sys_root.join("class/gpio"))
    }

    pub fn thermal_paths(&self) -> ThermalZonePaths {
        let zones = &self.thermal_zones;
        ThermalZonePaths {
            cpu: self.sys_root.join(&zones.cpu),
            gpu: self.sys_root.join(&zones.gpu),
            board: self.sys_root.join(&zones.board),
            ambient: self.sys_root.join(&zones.ambient),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalZoneConfig {
    pub cpu: PathBuf,
    pub gpu: PathBuf,
    pub board: PathBuf,
    pub ambient: PathBuf,
}

impl Default for ThermalZoneConfig {
    fn default() -> Self {
        let zone = |n: u8| PathBuf::from(format!("class/thermal/thermal_zone{}/temp", n));
        Self {
            cpu: zone(0),
            gpu: zone(1),
            board: zone(2),
            ambient: zone(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.broadcast_interval(), Duration::from_secs(2));
        assert_eq!(config.terminal.refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.sensors.gpio_path(), PathBuf::from("/sys/class/gpio"));
        assert_eq!(
            config.sensors.thermal_paths(),
            ThermalZonePaths::standard(Path::new("/sys"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[web]\nport = 9000\n").unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.broadcast_interval_ms, 2000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.sensors.disk_devices, vec!["sda", "mmcblk0"]);
    }

    #[test]
    fn test_absolute_thermal_zone_overrides_sys_root() {
        let mut sensors = SensorConfig::default();
        sensors.thermal_zones.ambient = PathBuf::from("/run/sensors/ambient");
        assert_eq!(sensors.thermal_paths().ambient, PathBuf::from("/run/sensors/ambient"));
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let mut config = Config::default();
        config.web.broadcast_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.web.subscriber_buffer = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_create_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.web.port, created.web.port);
        assert_eq!(loaded.sensors.proc_root, created.sensors.proc_root);
    }
}
