//! Registry of open WebSocket sessions.
//!
//! [`ConnectionRegistry`] is the only shared mutable state in the gateway.
//! Entries are inserted through [`ConnectionRegistry::register`], which hands
//! back a [`ConnectionGuard`]. Dropping the guard removes the entry, so a
//! session is deregistered exactly once on every exit path: clean close,
//! processing error, panic, or task cancellation at shutdown.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::ConnectionId;

/// Bookkeeping kept for each open session.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Identifier assigned at registration.
    pub id: ConnectionId,
    /// When the accept handshake completed.
    pub connected_at: DateTime<Utc>,
}

/// Concurrent set of open sessions.
///
/// Backed by a [`DashMap`], so sessions running on different worker threads
/// can register and deregister without a global lock.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session and returns the guard that owns its entry.
    #[must_use = "dropping the guard immediately deregisters the connection"]
    pub fn register(self: &Arc<Self>) -> ConnectionGuard {
        let id = ConnectionId::new();
        self.connections.insert(
            id,
            ConnectionInfo {
                id,
                connected_at: Utc::now(),
            },
        );
        ConnectionGuard {
            registry: Arc::clone(self),
            id,
        }
    }

    /// Removes a session. Returns `false` if it was not registered.
    pub fn remove(&self, id: ConnectionId) -> bool {
        self.connections.remove(&id).is_some()
    }

    /// Returns `true` if the session is currently registered.
    #[must_use]
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// Returns the bookkeeping entry for a session, if registered.
    #[must_use]
    pub fn get(&self, id: ConnectionId) -> Option<ConnectionInfo> {
        self.connections.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` if no session is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// Scoped ownership of one registry entry.
///
/// The entry lives exactly as long as the guard.
#[derive(Debug)]
pub struct ConnectionGuard {
    registry: Arc<ConnectionRegistry>,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// Identifier of the guarded session.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if !self.registry.remove(self.id) {
            tracing::warn!(connection_id = %self.id, "connection was already deregistered");
        }
    }
}
