// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! CPU usage, load average and clock frequency

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use sysinfo::System;
use tracing::debug;

use super::MetricReader;
use crate::core::{clamp_percent, CpuStats, MetricFamily};
use crate::error::{read_to_string, Result, SensorError};

/// Samples global CPU usage through sysinfo and reads load and clock from procfs
pub struct CpuReader {
    loadavg_path: PathBuf,
    cpuinfo_path: PathBuf,
    scaling_freq_path: PathBuf,
    system: Mutex<System>,
}

impl CpuReader {
    pub fn new(proc_root: &Path, sys_root: &Path) -> Self {
        let mut system = System::new();
        // Usage is the delta between two refreshes; prime the first one.
        system.refresh_cpu();

        Self {
            loadavg_path: proc_root.join("loadavg"),
            cpuinfo_path: proc_root.join("cpuinfo"),
            scaling_freq_path: sys_root.join("devices/system/cpu/cpu0/cpufreq/scaling_cur_freq"),
            system: Mutex::new(system),
        }
    }

    /// Usage since the previous call
    fn sample_usage(&self) -> f64 {
        let mut system = self.system.lock();
        system.refresh_cpu();
        clamp_percent(system.global_cpu_info().cpu_usage() as f64)
    }

    fn read_load_average(&self) -> Result<Vec<f64>> {
        let content = read_to_string(&self.loadavg_path)?;
        parse_loadavg(&content)
            .ok_or_else(|| SensorError::parse(&self.loadavg_path, "expected three load figures"))
    }

    fn read_frequency(&self) -> Result<f64> {
        let cpuinfo = read_to_string(&self.cpuinfo_path)?;
        if let Some(mhz) = parse_cpu_mhz(&cpuinfo) {
            return Ok(mhz);
        }

        // ARM boards omit "cpu MHz"; cpufreq reports kHz.
        let khz = read_to_string(&self.scaling_freq_path)?;
        khz.trim()
            .parse::<f64>()
            .map(|khz| khz / 1000.0)
            .map_err(|e| SensorError::parse(&self.scaling_freq_path, e.to_string()))
    }
}

impl MetricReader for CpuReader {
    type Output = CpuStats;

    fn family(&self) -> MetricFamily {
        MetricFamily::Cpu
    }

    fn read(&self) -> Result<CpuStats> {
        let mut stats = CpuStats {
            usage_percent: self.sample_usage(),
            ..CpuStats::default()
        };

        match self.read_load_average() {
            Ok(load) => stats.load_average = load,
            Err(e) => debug!("Load average unavailable: {}", e),
        }

        match self.read_frequency() {
            Ok(freq) => stats.frequency = freq,
            Err(e) => debug!("CPU frequency unavailable: {}", e),
        }

        Ok(stats)
    }
}

/// First three whitespace separated figures of `/proc/loadavg`
pub fn parse_loadavg(content: &str) -> Option<Vec<f64>> {
    let loads = content
        .split_whitespace()
        .take(3)
        .map(|field| field.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    (loads.len() == 3).then_some(loads)
}

/// Value of the first `cpu MHz` line of `/proc/cpuinfo`
pub fn parse_cpu_mhz(cpuinfo: &str) -> Option<f64> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("cpu MHz"))
        .find_map(|line| {
            let (_, value) = line.split_once(':')?;
            value.trim().parse::<f64>().ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_loadavg() {
        let loads = parse_loadavg("0.10 0.25 0.30 1/234 5678\n").unwrap();
        assert_eq!(loads, vec![0.10, 0.25, 0.30]);
    }

    #[test]
    fn test_parse_loadavg_rejects_short_or_garbled() {
        assert!(parse_loadavg("0.10 0.25").is_none());
        assert!(parse_loadavg("0.10 abc 0.30").is_none());
        assert!(parse_loadavg("").is_none());
    }

    #[test]
    fn test_parse_cpu_mhz_first_core() {
        let cpuinfo = "processor\t: 0\ncpu MHz\t\t: 1800.000\n\nprocessor\t: 1\ncpu MHz\t\t: 2400.500\n";
        assert_eq!(parse_cpu_mhz(cpuinfo), Some(1800.0));
    }

    #[test]
    fn test_parse_cpu_mhz_missing() {
        assert_eq!(parse_cpu_mhz("processor\t: 0\nBogoMIPS\t: 38.40\n"), None);
    }

    #[test]
    fn test_reader_degrades_without_procfs() {
        let dir = tempfile::tempdir().unwrap();
        let reader = CpuReader::new(dir.path(), dir.path());

        let stats = reader.read().unwrap();
        assert!(stats.load_average.is_empty());
        assert_eq!(stats.frequency, 0.0);
        assert!((0.0..=100.0).contains(&stats.usage_percent));
    }

    #[test]
    fn test_reader_uses_cpufreq_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let proc_root = dir.path().join("proc");
        let sys_root = dir.path().join("sys");
        let cpufreq = sys_root.join("devices/system/cpu/cpu0/cpufreq");
        fs::create_dir_all(&proc_root).unwrap();
        fs::create_dir_all(&cpufreq).unwrap();
        fs::write(proc_root.join("loadavg"), "0.10 0.25 0.30 1/99 100\n").unwrap();
        fs::write(proc_root.join("cpuinfo"), "processor\t: 0\nBogoMIPS\t: 108.00\n").unwrap();
        fs::write(cpufreq.join("scaling_cur_freq"), "1500000\n").unwrap();

        let stats = CpuReader::new(&proc_root, &sys_root).read().unwrap();
        assert_eq!(stats.load_average, vec![0.10, 0.25, 0.30]);
        assert_eq!(stats.frequency, 1500.0);
    }
}
