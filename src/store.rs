//! The published snapshot.
//!
//! [`SnapshotStore`] holds the result of the most recently *completed*
//! snapshot. Each [`publish`](SnapshotStore::publish) rebuilds every index
//! from scratch and swaps in a new [`Arc`]; readers holding the previous
//! value keep a consistent view until they ask again.
//!
//! When several fetches are in flight, whichever finishes last wins, no
//! matter which one started first.

use crate::dashboard::Dashboard;
use crate::snapshot::TrainingSnapshot;
use kiwitrain_auth::Session;
use kiwitrain_progress::{CompletionIndex, HierarchyIndex};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, info};

/// A snapshot together with everything computed from it.
#[derive(Debug, Default)]
pub struct PublishedSnapshot {
    /// Starts at 0 for the empty store and grows by one per publish
    pub revision: u64,
    pub snapshot: TrainingSnapshot,
    pub index: HierarchyIndex,
    pub completion: CompletionIndex,
}

impl PublishedSnapshot {
    pub fn dashboard(&self, session: &Session) -> Dashboard {
        Dashboard::compose_indexed(session, &self.snapshot.users, &self.index, &self.completion)
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    sender: Arc<watch::Sender<Arc<PublishedSnapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(PublishedSnapshot::default()));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Index `snapshot` and make it the current one. Returns its revision.
    pub fn publish(&self, snapshot: TrainingSnapshot) -> u64 {
        let started = Instant::now();
        let index = snapshot.index();
        let completion = snapshot.completion();

        let mut revision = 0;
        self.sender.send_modify(|current| {
            revision = current.revision + 1;
            *current = Arc::new(PublishedSnapshot {
                revision,
                snapshot,
                index,
                completion,
            });
        });

        info!(
            revision,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Published training snapshot"
        );
        revision
    }

    /// Run one fetch and publish its result once it completes.
    ///
    /// A failed fetch leaves the current snapshot untouched.
    pub async fn refresh<F, E>(&self, fetch: F) -> Result<u64, E>
    where
        F: Future<Output = Result<TrainingSnapshot, E>>,
    {
        let snapshot = fetch.await?;
        Ok(self.publish(snapshot))
    }

    pub fn current(&self) -> Arc<PublishedSnapshot> {
        self.sender.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.sender.borrow().revision
    }

    /// Receiver that is notified after every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PublishedSnapshot>> {
        self.sender.subscribe()
    }

    /// Compose the dashboard for `session` from the current snapshot.
    pub fn dashboard(&self, session: &Session) -> Dashboard {
        let current = self.current();
        debug!(revision = current.revision, "Composing dashboard from store");
        current.dashboard(session)
    }
}
