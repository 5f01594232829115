// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Sampling clock driving broadcast ticks

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, trace};

use super::{BroadcastHub, DeliveryReport};
use crate::sensors::SnapshotBuilder;

/// Builds a snapshot on every tick and hands it to the hub
pub struct Sampler {
    builder: Arc<SnapshotBuilder>,
    hub: Arc<BroadcastHub>,
    period: Duration,
}

/// Owned handle of a running sampler task
pub struct SamplerHandle {
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Wait for the task to stop after shutdown was signalled
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("Sampler task ended abnormally: {}", e);
        }
    }
}

impl Sampler {
    pub fn new(builder: Arc<SnapshotBuilder>, hub: Arc<BroadcastHub>, period: Duration) -> Self {
        Self { builder, hub, period }
    }

    /// Run until `shutdown` fires, then drop every subscriber
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> SamplerHandle {
        SamplerHandle {
            task: tokio::spawn(self.run(shutdown)),
        }
    }

    async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        info!("Sampler started ({:?} period)", self.period);

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.recv() => {
                    info!("Sampler shutting down...");
                    break;
                }
            }
        }

        self.hub.close_all();
    }

    /// One broadcast tick: build, then deliver
    pub async fn tick(&self) -> Option<DeliveryReport> {
        let builder = Arc::clone(&self.builder);
        match tokio::task::spawn_blocking(move || builder.build()).await {
            Ok(snapshot) => {
                let report = self.hub.broadcast(Arc::new(snapshot));
                trace!(
                    "Tick delivered to {} subscriber(s), dropped {}",
                    report.delivered,
                    report.dropped
                );
                Some(report)
            }
            Err(e) => {
                error!("Snapshot build failed: {}", e);
                None
            }
        }
    }
}
