// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Broadcast hub - subscriber registry and snapshot fan-out

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::Snapshot;

/// Identity of one registered subscriber
pub type SubscriberId = Uuid;

/// Consumer side of a registration.
///
/// The stream ends once the hub drops the subscriber, either through
/// `unsubscribe`, a failed delivery or `close_all`.
pub struct Subscription {
    pub id: SubscriberId,
    rx: mpsc::Receiver<Arc<Snapshot>>,
}

impl Subscription {
    /// Next delivered snapshot, `None` once the hub has dropped us
    pub async fn recv(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.recv().await
    }

    /// Non-waiting variant of `recv`
    pub fn try_recv(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.try_recv().ok()
    }
}

struct SubscriberSlot {
    tx: mpsc::Sender<Arc<Snapshot>>,
    peer: Option<SocketAddr>,
    connected_at: DateTime<Utc>,
}

/// Outcome of one broadcast tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub dropped: usize,
}

/// Registry of live subscribers.
///
/// Delivery holds the read lock and never waits on a consumer; inserts and
/// removals take the write lock briefly.
pub struct BroadcastHub {
    subscribers: RwLock<HashMap<SubscriberId, SubscriberSlot>>,
    buffer: usize,
    ticks: AtomicU64,
}

impl BroadcastHub {
    /// `buffer` is how many snapshots may queue per subscriber before it is
    /// treated as stalled and dropped.
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
            ticks: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self, peer: Option<SocketAddr>) -> Subscription {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = Uuid::new_v4();

        self.subscribers.write().insert(
            id,
            SubscriberSlot {
                tx,
                peer,
                connected_at: Utc::now(),
            },
        );

        debug!("Subscriber {} registered ({:?})", id, peer);
        Subscription { id, rx }
    }

    /// Remove a subscriber; returns false if it was already gone
    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let removed = self.subscribers.write().remove(id);
        if let Some(slot) = &removed {
            let connected_for = Utc::now() - slot.connected_at;
            debug!(
                "Subscriber {} removed after {}s",
                id,
                connected_for.num_seconds()
            );
        }
        removed.is_some()
    }

    /// Offer `snapshot` to every subscriber without waiting on any of them.
    ///
    /// Subscribers whose queue is full or closed are removed; dropping their
    /// sender ends their stream.
    pub fn broadcast(&self, snapshot: Arc<Snapshot>) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let mut stale = Vec::new();

        {
            let subscribers = self.subscribers.read();
            for (id, slot) in subscribers.iter() {
                match slot.tx.try_send(Arc::clone(&snapshot)) {
                    Ok(()) => report.delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!("Subscriber {} ({:?}) is not keeping up, dropping it", id, slot.peer);
                        stale.push(*id);
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!("Subscriber {} ({:?}) is gone", id, slot.peer);
                        stale.push(*id);
                    }
                }
            }
        }

        if !stale.is_empty() {
            let mut subscribers = self.subscribers.write();
            for id in &stale {
                subscribers.remove(id);
            }
        }

        report.dropped = stale.len();
        self.ticks.fetch_add(1, Ordering::Relaxed);
        report
    }

    /// Drop every subscriber, ending all streams
    pub fn close_all(&self) -> usize {
        let drained = {
            let mut subscribers = self.subscribers.write();
            let count = subscribers.len();
            subscribers.clear();
            count
        };
        if drained > 0 {
            info!("Closed {} subscriber(s)", drained);
        }
        drained
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.read().contains_key(id)
    }

    /// Remote addresses of current subscribers
    pub fn peers(&self) -> Vec<SocketAddr> {
        self.subscribers
            .read()
            .values()
            .filter_map(|slot| slot.peer)
            .collect()
    }

    /// Broadcast ticks performed so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}
