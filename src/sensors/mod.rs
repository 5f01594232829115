//! Sensor module - one reader per metric family plus the snapshot builder

mod builder;
mod cpu;
mod disk;
mod gpio;
mod memory;
mod thermal;
mod traits;

pub use builder::SnapshotBuilder;
pub use cpu::{parse_cpu_mhz, parse_loadavg, CpuReader};
pub use disk::{filesystem_usage, parse_diskstats, DiskReader, FsUsage};
pub use gpio::GpioReader;
pub use memory::{parse_meminfo, MemoryReader};
pub use thermal::{parse_millidegrees, read_celsius, ThermalReader, ThermalZonePaths};
pub use traits::MetricReader;
