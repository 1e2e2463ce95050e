use super::KeyValueStore;
use super::error::{Result, StorageError};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Position of a node inside the router that owns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Availability of a node as seen by readers.
///
/// Nodes start `Down`. Nothing in this crate flips the state on its own; a
/// health checker or test harness is expected to call [`NodeStore::mark_up`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeState {
    Up,
    #[default]
    Down,
}

impl From<bool> for NodeState {
    fn from(available: bool) -> Self {
        if available { NodeState::Up } else { NodeState::Down }
    }
}

/// A single-node key-value table.
///
/// Values are stored and returned verbatim. The availability flag gates
/// [`read`](KeyValueStore::read) only: writes, updates and deletes go through
/// even while the node is `Down`.
///
/// Open question kept as observed behavior: a new store is `Down`, so reads
/// fail with `Unavailable` until the environment marks it up.
pub struct NodeStore<V> {
    id: NodeId,
    entries: DashMap<String, V>,
    available: AtomicBool,
}

impl<V> NodeStore<V> {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            entries: DashMap::new(),
            available: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn state(&self) -> NodeState {
        self.available.load(Ordering::Acquire).into()
    }

    pub fn is_available(&self) -> bool {
        self.state() == NodeState::Up
    }

    pub fn set_state(&self, state: NodeState) {
        self.available.store(state == NodeState::Up, Ordering::Release);
        tracing::debug!("{} is now {:?}", self.id, state);
    }

    pub fn mark_up(&self) {
        self.set_state(NodeState::Up);
    }

    pub fn mark_down(&self) {
        self.set_state(NodeState::Down);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Presence check that bypasses the availability gate.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<V: Clone> NodeStore<V> {
    /// Copies out every record held by this node, in no particular order.
    pub fn dump(&self) -> Vec<(String, V)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl<V: Clone> KeyValueStore<V> for NodeStore<V> {
    fn create(&self, key: &str, value: V) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn read(&self, key: &str) -> Result<V> {
        if !self.is_available() {
            return Err(StorageError::Unavailable { node: self.id });
        }

        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::not_found(key))
    }

    fn update(&self, key: &str, value: V) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(mut slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(StorageError::not_found(key)),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(key))
    }
}
