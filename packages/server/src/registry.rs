//! Connection Registry: who is reachable right now.
//!
//! In-memory map from room name to the set of live connections joined
//! to it, plus per-connection session state (bound username, current
//! room, outbound channel). This is a volatile cache; the durable
//! store stays authoritative for membership, and the cache is rebuilt
//! empty on process restart.
//!
//! All methods take the internal lock briefly and return owned
//! snapshots; the lock is never held across an `.await`, so broadcast
//! targets are always computed at send time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc::UnboundedSender};

/// Registry-assigned identifier for one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(u64);

/// Outbound channel type: serialized server events, forwarded to the
/// socket by the connection's writer task.
pub type EventSender = UnboundedSender<String>;

/// Session state for one live connection.
struct ConnEntry {
    sender: EventSender,
    /// Bound by the first `init` event, then fixed.
    username: Option<String>,
    /// Overwritten on every join; at most one room at a time.
    room: Option<String>,
}

#[derive(Default)]
struct RegistryInner {
    conns: HashMap<ConnId, ConnEntry>,
    /// room name -> ids of live connections currently joined
    rooms: HashMap<String, HashSet<ConnId>>,
}

impl RegistryInner {
    /// Remove `conn` from `room`'s live set, dropping the set when it
    /// empties. Removing a non-member is a no-op.
    fn leave(&mut self, room: &str, conn: ConnId) {
        if let Some(set) = self.rooms.get_mut(room) {
            set.remove(&conn);
            if set.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}

/// Shared, mutex-guarded connection registry.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted connection. No username, no room.
    pub async fn register(&self, sender: EventSender) -> ConnId {
        let id = ConnId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut inner = self.inner.lock().await;
        inner.conns.insert(
            id,
            ConnEntry {
                sender,
                username: None,
                room: None,
            },
        );
        id
    }

    /// Bind a username to the connection. The first bind wins; later
    /// calls return false and leave the binding untouched.
    pub async fn bind_username(&self, conn: ConnId, username: &str) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.conns.get_mut(&conn) {
            Some(entry) if entry.username.is_none() => {
                entry.username = Some(username.to_string());
                true
            }
            _ => false,
        }
    }

    /// Username bound to the connection, if any.
    pub async fn username(&self, conn: ConnId) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.conns.get(&conn).and_then(|e| e.username.clone())
    }

    /// Room the connection currently occupies, if any.
    pub async fn current_room(&self, conn: ConnId) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.conns.get(&conn).and_then(|e| e.room.clone())
    }

    /// Put the connection into `room`'s live set, recording `room` as
    /// its current room. Re-joining is switching: if the connection
    /// occupied a different room, it is removed from that room's live
    /// set and the old name is returned. Joining the room it is
    /// already in is a no-op.
    pub async fn join(&self, room: &str, conn: ConnId) -> Option<String> {
        let mut inner = self.inner.lock().await;
        if !inner.conns.contains_key(&conn) {
            return None;
        }

        let previous = inner
            .conns
            .get(&conn)
            .and_then(|e| e.room.clone())
            .filter(|prev| prev != room);
        if let Some(prev) = &previous {
            inner.leave(prev, conn);
        }

        if let Some(entry) = inner.conns.get_mut(&conn) {
            entry.room = Some(room.to_string());
        }
        inner.rooms.entry(room.to_string()).or_default().insert(conn);
        previous
    }

    /// Idempotent remove of `conn` from `room`'s live set. Clears the
    /// connection's recorded room if it pointed there.
    pub async fn leave(&self, room: &str, conn: ConnId) {
        let mut inner = self.inner.lock().await;
        inner.leave(room, conn);
        if let Some(entry) = inner.conns.get_mut(&conn)
            && entry.room.as_deref() == Some(room)
        {
            entry.room = None;
        }
    }

    /// Snapshot of the outbound channels of every live connection in
    /// `room`; empty if none.
    pub async fn members(&self, room: &str) -> Vec<EventSender> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(room)
            .map(|set| {
                set.iter()
                    .filter_map(|id| inner.conns.get(id))
                    .map(|e| e.sender.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Like [`Self::members`], but excluding one connection (the
    /// sender of a "joined" notice, say).
    pub async fn members_except(&self, room: &str, excluded: ConnId) -> Vec<EventSender> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(room)
            .map(|set| {
                set.iter()
                    .filter(|id| **id != excluded)
                    .filter_map(|id| inner.conns.get(id))
                    .map(|e| e.sender.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop `room`'s entire live set, clearing the recorded room on
    /// every evicted connection. Returns their outbound channels so
    /// the caller can deliver a deletion notice.
    pub async fn evict_room(&self, room: &str) -> Vec<EventSender> {
        let mut inner = self.inner.lock().await;
        let Some(set) = inner.rooms.remove(room) else {
            return Vec::new();
        };
        let mut senders = Vec::with_capacity(set.len());
        for id in set {
            if let Some(entry) = inner.conns.get_mut(&id) {
                entry.room = None;
                senders.push(entry.sender.clone());
            }
        }
        senders
    }

    /// Snapshot of (channel, username) for every connection with a
    /// bound username, whatever room they are in.
    pub async fn identified(&self) -> Vec<(EventSender, String)> {
        let inner = self.inner.lock().await;
        inner
            .conns
            .values()
            .filter_map(|e| {
                e.username
                    .clone()
                    .map(|name| (e.sender.clone(), name))
            })
            .collect()
    }

    /// Remove the connection entirely; called exactly once on
    /// transport close. Returns the room it occupied and its bound
    /// username, if any, for the "left" notice.
    pub async fn disconnect(&self, conn: ConnId) -> (Option<String>, Option<String>) {
        let mut inner = self.inner.lock().await;
        let Some(entry) = inner.conns.remove(&conn) else {
            return (None, None);
        };
        if let Some(room) = &entry.room {
            inner.leave(room, conn);
        }
        (entry.room, entry.username)
    }

    /// Number of live connections (diagnostics).
    pub async fn connection_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.conns.len()
    }
}
