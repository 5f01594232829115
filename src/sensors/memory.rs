// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Virtual memory statistics from `/proc/meminfo`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::MetricReader;
use crate::core::{percent_of, MemoryStats, MetricFamily};
use crate::error::{read_to_string, Result, SensorError};

pub struct MemoryReader {
    meminfo_path: PathBuf,
}

impl MemoryReader {
    pub fn new(proc_root: &Path) -> Self {
        Self {
            meminfo_path: proc_root.join("meminfo"),
        }
    }
}

impl MetricReader for MemoryReader {
    type Output = MemoryStats;

    fn family(&self) -> MetricFamily {
        MetricFamily::Memory
    }

    fn read(&self) -> Result<MemoryStats> {
        let content = read_to_string(&self.meminfo_path)?;
        parse_meminfo(&content)
    }
}

/// Convert `/proc/meminfo` content into byte counts.
///
/// Used memory excludes buffers and reclaimable caches, matching `free(1)`.
pub fn parse_meminfo(content: &str) -> Result<MemoryStats> {
    let fields: HashMap<&str, u64> = content
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let kib = rest.split_whitespace().next()?.parse::<u64>().ok()?;
            Some((key.trim(), kib.saturating_mul(1024)))
        })
        .collect();

    let field = |key: &str| fields.get(key).copied().unwrap_or(0);

    let total = *fields.get("MemTotal").ok_or(SensorError::Missing("MemTotal"))?;
    let free = field("MemFree");
    let available = fields.get("MemAvailable").copied().unwrap_or(free);
    let used = total
        .saturating_sub(free)
        .saturating_sub(field("Buffers"))
        .saturating_sub(field("Cached"))
        .saturating_sub(field("SReclaimable"));

    Ok(MemoryStats {
        total,
        used,
        free,
        available,
        usage_percent: percent_of(used, total),
    })
}
