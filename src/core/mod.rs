//! Core pipeline - snapshot model, broadcast hub, sampler and pulls

mod hub;
mod monitor;
mod sampler;
mod snapshot;

pub use hub::{BroadcastHub, DeliveryReport, SubscriberId, Subscription};
pub use monitor::Monitor;
pub use sampler::{Sampler, SamplerHandle};
pub use snapshot::{
    clamp_percent, percent_of, CpuStats, DiskStats, GpioState, GpioStats, MemoryStats,
    MetricFamily, Snapshot, TemperatureStats,
};
