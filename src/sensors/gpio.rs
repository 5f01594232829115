// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! GPIO pin state from the sysfs interface

use std::path::{Path, PathBuf};

use tracing::trace;

use super::MetricReader;
use crate::core::{GpioState, GpioStats, MetricFamily};
use crate::error::{read_to_string, Result, SensorError};

const PIN_PREFIX: &str = "gpio";
const CHIP_PREFIX: &str = "gpiochip";

pub struct GpioReader {
    root: PathBuf,
}

impl GpioReader {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl MetricReader for GpioReader {
    type Output = GpioStats;

    fn family(&self) -> MetricFamily {
        MetricFamily::Gpio
    }

    fn read(&self) -> Result<GpioStats> {
        let mut stats = GpioStats::default();

        if !self.root.exists() {
            return Ok(stats);
        }

        let entries = std::fs::read_dir(&self.root).map_err(|e| SensorError::io(&self.root, e))?;

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(PIN_PREFIX) || name.starts_with(CHIP_PREFIX) {
                continue;
            }

            match read_pin(&entry.path()) {
                Ok((value, mode)) => {
                    stats.pins.insert(
                        name.clone(),
                        GpioState {
                            pin: name,
                            value,
                            mode,
                        },
                    );
                }
                Err(e) => trace!("Skipping pin {}: {}", name, e),
            }
        }

        Ok(stats)
    }
}

/// `(value, direction)` of one exported pin directory
fn read_pin(pin_dir: &Path) -> Result<(i32, String)> {
    let mode = read_to_string(&pin_dir.join("direction"))?.trim().to_string();

    let value_path = pin_dir.join("value");
    let value = read_to_string(&value_path)?
        .trim()
        .parse::<i32>()
        .map_err(|e| SensorError::parse(&value_path, e.to_string()))?;

    Ok((value, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn export_pin(root: &Path, name: &str, direction: Option<&str>, value: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(direction) = direction {
            fs::write(dir.join("direction"), direction).unwrap();
        }
        if let Some(value) = value {
            fs::write(dir.join("value"), value).unwrap();
        }
    }

    #[test]
    fn test_absent_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let stats = GpioReader::new(&dir.path().join("class/gpio")).read().unwrap();
        assert!(stats.pins.is_empty());
    }

    #[test]
    fn test_reads_exported_pins() {
        let dir = tempfile::tempdir().unwrap();
        export_pin(dir.path(), "gpio17", Some("out\n"), Some("1\n"));
        export_pin(dir.path(), "gpio4", Some("in\n"), Some("0\n"));
        fs::write(dir.path().join("export"), "").unwrap();

        let stats = GpioReader::new(dir.path()).read().unwrap();
        assert_eq!(stats.pins.len(), 2);

        let pin = &stats.pins["gpio17"];
        assert_eq!(pin.pin, "gpio17");
        assert_eq!(pin.value, 1);
        assert_eq!(pin.mode, "out");
        assert_eq!(stats.pins["gpio4"].mode, "in");
    }

    #[test]
    fn test_broken_pin_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        export_pin(dir.path(), "gpio5", Some("in"), None);
        export_pin(dir.path(), "gpio6", Some("out"), Some("high"));
        export_pin(dir.path(), "gpio7", Some("out"), Some("0"));
        export_pin(dir.path(), "gpiochip0", None, None);

        let stats = GpioReader::new(dir.path()).read().unwrap();
        assert_eq!(stats.pins.keys().collect::<Vec<_>>(), vec!["gpio7"]);
    }
}
