// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Snapshot builder - runs every reader once and merges the results

use chrono::Utc;
use tracing::{trace, warn};

use super::{CpuReader, DiskReader, GpioReader, MemoryReader, MetricReader, ThermalReader};
use crate::config::SensorConfig;
use crate::core::{MetricFamily, Snapshot};

/// Owns one reader per metric family
pub struct SnapshotBuilder {
    cpu: CpuReader,
    memory: MemoryReader,
    disk: DiskReader,
    thermal: ThermalReader,
    gpio: GpioReader,
}

impl SnapshotBuilder {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            cpu: CpuReader::new(&config.proc_root, &config.sys_root),
            memory: MemoryReader::new(&config.proc_root),
            disk: DiskReader::new(&config.disk_mount, &config.proc_root, &config.disk_devices),
            thermal: ThermalReader::new(config.thermal_paths()),
            gpio: GpioReader::new(&config.gpio_path()),
        }
    }

    /// Sample every family now.
    ///
    /// Never fails: a family whose reader errors is logged, left at its
    /// default value and listed in `Snapshot::failed`. The timestamp is
    /// taken before the first read.
    pub fn build(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty(Utc::now());
        let failed = &mut snapshot.failed;

        snapshot.cpu = absorb(&self.cpu, failed);
        snapshot.memory = absorb(&self.memory, failed);
        snapshot.disk = absorb(&self.disk, failed);
        snapshot.temperature = absorb(&self.thermal, failed);
        snapshot.gpio = absorb(&self.gpio, failed);

        trace!("Snapshot built ({} families failed)", snapshot.failed.len());
        snapshot
    }
}

fn absorb<R: MetricReader>(reader: &R, failed: &mut Vec<MetricFamily>) -> R::Output {
    match reader.read() {
        Ok(output) => output,
        Err(e) => {
            let family = reader.family();
            warn!("Failed to read {} stats: {}", family, e);
            failed.push(family);
            R::Output::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiskStats, GpioStats, MemoryStats};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("proc")).unwrap();
            fs::create_dir_all(dir.path().join("sys")).unwrap();
            Self { dir }
        }

        fn proc(&self) -> PathBuf {
            self.dir.path().join("proc")
        }

        fn sys(&self) -> PathBuf {
            self.dir.path().join("sys")
        }

        fn write(&self, relative: &str, content: &str) {
            let path = self.dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn healthy(meminfo: &str) -> Self {
            let fixture = Self::new();
            fixture.write("proc/loadavg", "0.10 0.25 0.30 2/310 4242\n");
            fixture.write("proc/cpuinfo", "processor\t: 0\ncpu MHz\t\t: 1200.000\n");
            fixture.write("proc/meminfo", meminfo);
            fixture.write(
                "proc/diskstats",
                "   8       0 sda 100 5 2000 30 50 2 1000 40 0 70 70\n",
            );
            fixture.write("sys/class/thermal/thermal_zone0/temp", "45000\n");
            fixture.write("sys/class/gpio/gpio17/direction", "out\n");
            fixture.write("sys/class/gpio/gpio17/value", "1\n");
            fixture
        }

        fn builder(&self) -> SnapshotBuilder {
            SnapshotBuilder::new(&SensorConfig::rooted(&self.proc(), &self.sys(), self.dir.path()))
        }
    }

    const MEMINFO: &str = "MemTotal: 2048000 kB\nMemFree: 512000 kB\nMemAvailable: 1024000 kB\nBuffers: 1000 kB\nCached: 300000 kB\n";

    fn assert_well_formed(snapshot: &Snapshot) {
        for value in [
            snapshot.cpu.usage_percent,
            snapshot.memory.usage_percent,
            snapshot.disk.usage_percent,
        ] {
            assert!((0.0..=100.0).contains(&value), "percentage out of range: {}", value);
        }
        if snapshot.memory.total > 0 && snapshot.memory.used > 0 {
            assert!(snapshot.memory.used <= snapshot.memory.total);
        }
        if snapshot.disk.total > 0 && snapshot.disk.used > 0 {
            assert!(snapshot.disk.used <= snapshot.disk.total);
        }
    }

    #[test]
    fn test_build_from_fixture() {
        let fixture = Fixture::healthy(MEMINFO);
        let snapshot = fixture.builder().build();

        assert!(snapshot.failed.is_empty(), "failed: {:?}", snapshot.failed);
        assert_eq!(snapshot.cpu.load_average, vec![0.10, 0.25, 0.30]);
        assert_eq!(snapshot.cpu.frequency, 1200.0);
        assert_eq!(snapshot.memory.total, 2_048_000 * 1024);
        assert_eq!(snapshot.disk.io_read, 100);
        assert_eq!(snapshot.disk.io_write, 50);
        assert_eq!(snapshot.temperature.cpu, 45.0);
        assert_eq!(snapshot.gpio.pins["gpio17"].value, 1);
        assert_well_formed(&snapshot);
    }

    #[test]
    fn test_percentages_stay_in_range_across_fixtures() {
        let meminfos = [
            "MemTotal: 1 kB\nMemFree: 0 kB\n",
            "MemTotal: 4096 kB\nMemFree: 4096 kB\nMemAvailable: 4096 kB\n",
            "MemTotal: 1000 kB\nMemFree: 10 kB\nBuffers: 5000 kB\n",
            "MemTotal: 16384000 kB\nMemFree: 123 kB\nCached: 77 kB\nSReclaimable: 3 kB\n",
        ];

        for meminfo in meminfos {
            let snapshot = Fixture::healthy(meminfo).builder().build();
            assert!(snapshot.failed.is_empty());
            assert_well_formed(&snapshot);
        }
    }

    #[test]
    fn test_gpio_absent_keeps_other_families() {
        let fixture = Fixture::healthy(MEMINFO);
        fs::remove_dir_all(fixture.sys().join("class/gpio")).unwrap();

        let snapshot = fixture.builder().build();
        assert!(snapshot.failed.is_empty());
        assert_eq!(snapshot.gpio, GpioStats::default());
        assert!(snapshot.memory.total > 0);
        assert!(snapshot.disk.total > 0);
        assert_eq!(snapshot.temperature.cpu, 45.0);
    }

    #[test]
    fn test_failed_families_fall_back_to_defaults() {
        let fixture = Fixture::new();
        let config = SensorConfig::rooted(
            &fixture.proc(),
            &fixture.sys(),
            &fixture.dir.path().join("missing-mount"),
        );

        let snapshot = SnapshotBuilder::new(&config).build();
        assert_eq!(snapshot.failed, vec![MetricFamily::Memory, MetricFamily::Disk]);
        assert_eq!(snapshot.memory, MemoryStats::default());
        assert_eq!(snapshot.disk, DiskStats::default());
        assert!(snapshot.cpu.load_average.is_empty());
        assert!(snapshot.gpio.pins.is_empty());
    }

    #[test]
    fn test_timestamp_taken_before_reads() {
        let fixture = Fixture::healthy(MEMINFO);
        let builder = fixture.builder();

        let before = Utc::now();
        let snapshot = builder.build();
        let after = Utc::now();

        assert!(snapshot.timestamp >= before && snapshot.timestamp <= after);
    }
}
