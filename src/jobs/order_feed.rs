//! Pending-order feed.
//!
//! A read-only recurring re-fetch of the pending-order count, delivered
//! as eventually-consistent snapshots over a watch channel. Drives the
//! admin badge; participates in no write path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::OrderStatus;
use crate::infra::OrderRepository;

/// Handle to the background re-fetch task.
pub struct PendingOrderFeed {
    handle: JoinHandle<()>,
    receiver: watch::Receiver<usize>,
}

impl PendingOrderFeed {
    /// Spawn the feed. The first fetch happens immediately, then every
    /// `interval`. Fetch failures keep the previous snapshot.
    pub fn spawn(orders: Arc<dyn OrderRepository>, interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(0usize);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match orders.count_by_status(OrderStatus::Pending).await {
                    Ok(count) => {
                        sender.send_replace(count);
                    }
                    Err(e) => {
                        tracing::warn!("Pending-order refresh failed: {}", e.user_message());
                    }
                }
            }
        });

        Self { handle, receiver }
    }

    /// Subscribe to count snapshots.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.receiver.clone()
    }

    /// Stop re-fetching.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for PendingOrderFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
