//! Connection → forwarder registry.
//!
//! One entry per open connection, created after the dispatcher constructs
//! the forwarder and removed exactly once when the connection closes.  The
//! map is behind a `tokio::sync::RwLock` so independent connection tasks
//! can insert, look up, and remove concurrently; each forwarder sits behind
//! its own `Mutex`, which the single task driving that connection locks for
//! the duration of a forward call.  Distinct connections therefore forward
//! in parallel while one connection's events stay strictly ordered.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use touch_core::event::TouchEvent;

use crate::application::forwarder::{ForwardError, Forwarder};

/// Identifies one live connection.
pub type ConnectionId = Uuid;

type Entry = Arc<Mutex<Box<dyn Forwarder>>>;

/// The shared connection → forwarder table.
#[derive(Default)]
pub struct ForwarderRegistry {
    entries: RwLock<HashMap<ConnectionId, Entry>>,
}

impl ForwarderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the forwarder for a newly opened connection.
    pub async fn insert(&self, id: ConnectionId, forwarder: Box<dyn Forwarder>) {
        self.entries
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(forwarder)));
    }

    /// Forwards one valid event on the connection's sink.
    ///
    /// Returns `None` for an unregistered connection (a no-op by contract)
    /// and `Some(result)` with the sink's outcome otherwise.  The map lock
    /// is released before the forward call so a slow sink never blocks
    /// other connections' lookups.
    pub async fn forward(
        &self,
        id: &ConnectionId,
        event: &TouchEvent,
    ) -> Option<Result<(), ForwardError>> {
        let entry = self.entries.read().await.get(id).cloned();
        match entry {
            Some(forwarder) => Some(forwarder.lock().await.forward(event)),
            None => None,
        }
    }

    /// Removes the connection's entry, dropping (disposing) its forwarder.
    ///
    /// Returns `true` if an entry existed.  The per-connection session task
    /// calls this exactly once on its single exit path, so a forwarder is
    /// never disposed twice even when close and error signals race.
    pub async fn remove(&self, id: &ConnectionId) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    /// Number of live connections.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
