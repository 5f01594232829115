// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! On-demand snapshot pulls

use std::sync::Arc;

use crate::error::MonitorError;
use crate::sensors::SnapshotBuilder;

use super::Snapshot;

/// Answers one-shot queries with a fresh build, bypassing the hub
#[derive(Clone)]
pub struct Monitor {
    builder: Arc<SnapshotBuilder>,
}

impl Monitor {
    pub fn new(builder: Arc<SnapshotBuilder>) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &Arc<SnapshotBuilder> {
        &self.builder
    }

    /// Build a new snapshot on the blocking pool.
    ///
    /// Every call re-reads all sources; nothing is cached from the last
    /// broadcast tick.
    pub async fn snapshot(&self) -> Result<Snapshot, MonitorError> {
        let builder = Arc::clone(&self.builder);
        tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| MonitorError::Acquisition(e.to_string()))
    }
}
