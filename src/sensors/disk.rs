// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Filesystem usage and block device I/O counters

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::MetricReader;
use crate::core::{percent_of, DiskStats, MetricFamily};
use crate::error::{read_to_string, Result, SensorError};

/// Minimum columns of a `/proc/diskstats` line
const DISKSTATS_MIN_FIELDS: usize = 14;

pub struct DiskReader {
    mount_point: PathBuf,
    diskstats_path: PathBuf,
    devices: Vec<String>,
}

impl DiskReader {
    pub fn new(mount_point: &Path, proc_root: &Path, devices: &[String]) -> Self {
        Self {
            mount_point: mount_point.to_path_buf(),
            diskstats_path: proc_root.join("diskstats"),
            devices: devices.to_vec(),
        }
    }

    fn read_io_counters(&self) -> (u64, u64) {
        match read_to_string(&self.diskstats_path) {
            Ok(content) => parse_diskstats(&content, &self.devices).unwrap_or_else(|| {
                debug!("No diskstats entry for {:?}", self.devices);
                (0, 0)
            }),
            Err(e) => {
                debug!("Disk I/O counters unavailable: {}", e);
                (0, 0)
            }
        }
    }
}

impl MetricReader for DiskReader {
    type Output = DiskStats;

    fn family(&self) -> MetricFamily {
        MetricFamily::Disk
    }

    fn read(&self) -> Result<DiskStats> {
        let usage = filesystem_usage(&self.mount_point)?;
        let (io_read, io_write) = self.read_io_counters();

        Ok(DiskStats {
            total: usage.total,
            used: usage.used,
            free: usage.free,
            usage_percent: percent_of(usage.used, usage.used.saturating_add(usage.free)),
            io_read,
            io_write,
        })
    }
}

/// Byte counts reported by `statvfs(2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsUsage {
    pub total: u64,
    pub used: u64,
    /// Space available to unprivileged users
    pub free: u64,
}

pub fn filesystem_usage(path: &Path) -> Result<FsUsage> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| SensorError::parse(path, "mount point contains a NUL byte"))?;

    // SAFETY: `c_path` is a valid NUL terminated string and `stat` is a
    // plain C struct that statvfs fills in completely on success.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(SensorError::io(path, io::Error::last_os_error()));
    }

    let fragment = if stat.f_frsize > 0 {
        stat.f_frsize as u64
    } else {
        stat.f_bsize as u64
    };
    let blocks = stat.f_blocks as u64;
    let bfree = stat.f_bfree as u64;
    let bavail = stat.f_bavail as u64;

    Ok(FsUsage {
        total: blocks.saturating_mul(fragment),
        used: blocks.saturating_sub(bfree).saturating_mul(fragment),
        free: bavail.saturating_mul(fragment),
    })
}

/// Completed read and write operations of the first listed device found.
///
/// Fields are 1-based: 4 is reads completed, 8 is writes completed.
pub fn parse_diskstats(content: &str, devices: &[String]) -> Option<(u64, u64)> {
    content.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < DISKSTATS_MIN_FIELDS || !devices.iter().any(|d| d == fields[2]) {
            return None;
        }
        let reads = fields[3].parse().unwrap_or(0);
        let writes = fields[7].parse().unwrap_or(0);
        Some((reads, writes))
    })
}
