// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! hostwatch - Lightweight host monitor for embedded Linux
//!
//! Samples CPU, memory, disk, thermal zones and GPIO pins from procfs and
//! sysfs and presents them through:
//! - a web dashboard with live WebSocket push and a JSON pull endpoint
//! - a full-screen terminal dashboard
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          hostwatch                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌──────────┐   ┌─────────┐   ┌────────────┐   │
//! │  │ Sensors │ → │ Snapshot │ → │ Sampler │ → │ Broadcast  │   │
//! │  │ Readers │   │ Builder  │   │ (timer) │   │ Hub        │   │
//! │  └─────────┘   └──────────┘   └─────────┘   └────────────┘   │
//! │                     ↓                             ↓          │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐ │
//! │  │ Terminal UI (own timer)  │   │ Web: /, /api/stats, /ws  │ │
//! │  └──────────────────────────┘   └──────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod sensors;
pub mod streaming;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{BroadcastHub, Monitor, Sampler, Snapshot};
pub use error::{MonitorError, SensorError};
pub use sensors::SnapshotBuilder;
pub use streaming::WebServer;

/// hostwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// hostwatch name
pub const NAME: &str = "hostwatch";
