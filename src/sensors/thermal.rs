// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Thermal zone sensors - millidegree sysfs files

use std::path::{Path, PathBuf};

use tracing::trace;

use super::MetricReader;
use crate::core::{MetricFamily, TemperatureStats};
use crate::error::{read_to_string, Result, SensorError};

/// Where each temperature slot is read from
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalZonePaths {
    pub cpu: PathBuf,
    pub gpu: PathBuf,
    pub board: PathBuf,
    pub ambient: PathBuf,
}

impl ThermalZonePaths {
    /// `thermal_zone0..3` under `<sys_root>/class/thermal`
    pub fn standard(sys_root: &Path) -> Self {
        let zone = |n: u8| sys_root.join(format!("class/thermal/thermal_zone{}/temp", n));
        Self {
            cpu: zone(0),
            gpu: zone(1),
            board: zone(2),
            ambient: zone(3),
        }
    }
}

pub struct ThermalReader {
    zones: ThermalZonePaths,
}

impl ThermalReader {
    pub fn new(zones: ThermalZonePaths) -> Self {
        Self { zones }
    }
}

impl MetricReader for ThermalReader {
    type Output = TemperatureStats;

    fn family(&self) -> MetricFamily {
        MetricFamily::Temperature
    }

    /// Every zone is optional; an unreadable one stays at 0.
    fn read(&self) -> Result<TemperatureStats> {
        let zone = |path: &Path| {
            read_celsius(path).unwrap_or_else(|e| {
                trace!("Thermal zone skipped: {}", e);
                0.0
            })
        };

        Ok(TemperatureStats {
            cpu: zone(&self.zones.cpu),
            gpu: zone(&self.zones.gpu),
            board: zone(&self.zones.board),
            ambient: zone(&self.zones.ambient),
        })
    }
}

/// Read a millidegree sensor file as °C
pub fn read_celsius(path: &Path) -> Result<f64> {
    let raw = read_to_string(path)?;
    parse_millidegrees(&raw).ok_or_else(|| SensorError::parse(path, "expected an integer"))
}

pub fn parse_millidegrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().map(|milli| milli / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_zone(sys_root: &Path, n: u8, content: &str) {
        let dir = sys_root.join(format!("class/thermal/thermal_zone{}", n));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("temp"), content).unwrap();
    }

    #[test]
    fn test_parse_millidegrees() {
        assert_eq!(parse_millidegrees("45000\n"), Some(45.0));
        assert_eq!(parse_millidegrees("-5500"), Some(-5.5));
        assert_eq!(parse_millidegrees("hot"), None);
    }

    #[test]
    fn test_cpu_zone() {
        let dir = tempfile::tempdir().unwrap();
        write_zone(dir.path(), 0, "45000\n");

        let stats = ThermalReader::new(ThermalZonePaths::standard(dir.path())).read().unwrap();
        assert_eq!(stats.cpu, 45.0);
    }

    #[test]
    fn test_missing_zone_does_not_hide_others() {
        let dir = tempfile::tempdir().unwrap();
        write_zone(dir.path(), 0, "51234\n");
        write_zone(dir.path(), 2, "garbage\n");
        write_zone(dir.path(), 3, "23000\n");

        let stats = ThermalReader::new(ThermalZonePaths::standard(dir.path())).read().unwrap();
        assert!((stats.cpu - 51.234).abs() < 1e-9);
        assert_eq!(stats.gpu, 0.0);
        assert_eq!(stats.board, 0.0);
        assert_eq!(stats.ambient, 23.0);
    }
}
