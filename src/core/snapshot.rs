// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Snapshot data model shared by every presentation surface

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete sample of every metric family at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture time, taken when the build started
    pub timestamp: DateTime<Utc>,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub disk: DiskStats,
    pub temperature: TemperatureStats,
    pub gpio: GpioStats,
    /// Families whose reader failed during this build
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<MetricFamily>,
}

impl Snapshot {
    /// Empty snapshot stamped at `timestamp`
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            cpu: CpuStats::default(),
            memory: MemoryStats::default(),
            disk: DiskStats::default(),
            temperature: TemperatureStats::default(),
            gpio: GpioStats::default(),
            failed: Vec::new(),
        }
    }

    /// Whether the reader for `family` failed
    pub fn is_degraded(&self, family: MetricFamily) -> bool {
        self.failed.contains(&family)
    }
}

/// Metric families sampled on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    Cpu,
    Memory,
    Disk,
    Temperature,
    Gpio,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::Cpu,
        MetricFamily::Memory,
        MetricFamily::Disk,
        MetricFamily::Temperature,
        MetricFamily::Gpio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricFamily::Cpu => "cpu",
            MetricFamily::Memory => "memory",
            MetricFamily::Disk => "disk",
            MetricFamily::Temperature => "temperature",
            MetricFamily::Gpio => "gpio",
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU usage, load and clock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    pub usage_percent: f64,
    /// 1, 5 and 15 minute load; empty when unavailable
    pub load_average: Vec<f64>,
    /// Clock of the first core in MHz
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub usage_percent: f64,
}

/// Root filesystem usage plus block device counters.
///
/// `io_read` and `io_write` are completed operations since boot, not rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub usage_percent: f64,
    pub io_read: u64,
    pub io_write: u64,
}

/// Thermal zone readings in °C; 0 means the zone was not readable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub cpu: f64,
    pub gpu: f64,
    pub board: f64,
    pub ambient: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpioStats {
    pub pins: BTreeMap<String, GpioState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpioState {
    pub pin: String,
    pub value: i32,
    /// "in" or "out"
    pub mode: String,
}

/// `part` as a percentage of `whole`, kept within 0..=100
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    clamp_percent(part as f64 / whole as f64 * 100.0)
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(50, 200), 25.0);
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(percent_of(300, 200), 100.0);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(140.0), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn test_wire_format_keeps_every_family() {
        let snapshot = Snapshot::empty(Utc::now());
        let json = serde_json::to_value(&snapshot).unwrap();

        for key in ["timestamp", "cpu", "memory", "disk", "temperature", "gpio"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("failed").is_none());
        assert_eq!(json["cpu"]["load_average"], serde_json::json!([]));
        assert_eq!(json["gpio"]["pins"], serde_json::json!({}));
        assert!(json["disk"].get("io_read").is_some());
    }

    #[test]
    fn test_failed_families_serialize_lowercase() {
        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.failed.push(MetricFamily::Memory);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["failed"], serde_json::json!(["memory"]));
        assert!(snapshot.is_degraded(MetricFamily::Memory));
        assert!(!snapshot.is_degraded(MetricFamily::Disk));
    }
}
