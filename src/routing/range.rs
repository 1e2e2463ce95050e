use super::hash::{HashRange, range_hash};
use super::{TopologySnapshot, build_nodes, node_at, summarize};
use crate::storage::KeyValueStore;
use crate::storage::error::{Result, StorageError};
use crate::storage::node::{NodeId, NodeState, NodeStore};

use serde::{Deserialize, Serialize};

/// A hash range and the node that owns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeAssignment {
    pub range: HashRange,
    pub node: NodeId,
}

/// Consistent-hashing router over a fixed set of hash ranges.
///
/// With [`RangeRouter::new`] the ranges partition the hash space, so every key
/// has exactly one owner and a read fail-over has a single candidate.
/// [`RangeRouter::with_replicas`] assigns each range to extra nodes as well,
/// which makes the ranges overlap and gives reads somewhere to fail over to.
pub struct RangeRouter<V> {
    stores: Vec<NodeStore<V>>,
    assignments: Vec<RangeAssignment>,
    replicas: usize,
}

impl<V> RangeRouter<V> {
    /// `n` nodes, range `i` owned by node `i` only.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_replicas(n, 0)
    }

    /// `n` nodes, range `i` owned by node `i` and then by the next `replicas`
    /// nodes around the ring. `replicas` is capped at `n - 1`.
    pub fn with_replicas(n: usize, replicas: usize) -> Result<Self> {
        let stores = build_nodes(n)?;
        let replicas = replicas.min(n - 1);

        let mut assignments = Vec::with_capacity(n * (replicas + 1));
        for (i, range) in HashRange::partition(n).into_iter().enumerate() {
            for k in 0..=replicas {
                assignments.push(RangeAssignment {
                    range,
                    node: NodeId((i + k) % n),
                });
            }
        }

        Ok(Self {
            stores,
            assignments,
            replicas,
        })
    }

    /// Nodes owning `key`, primary first.
    pub fn owners(&self, key: &str) -> Vec<usize> {
        self.owners_for_hash(range_hash(key))
    }

    /// Every assignment is checked, so overlapping ranges yield several owners.
    pub fn owners_for_hash(&self, hash: u64) -> Vec<usize> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.range.contains(hash))
            .map(|assignment| assignment.node.0)
            .collect()
    }

    pub fn assignments(&self) -> &[RangeAssignment] {
        &self.assignments
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn node_count(&self) -> usize {
        self.stores.len()
    }

    pub fn node(&self, index: usize) -> Option<&NodeStore<V>> {
        self.stores.get(index)
    }

    pub fn nodes(&self) -> &[NodeStore<V>] {
        &self.stores
    }

    pub fn set_node_state(&self, index: usize, state: NodeState) -> Result<()> {
        node_at(&self.stores, index)?.set_state(state);
        Ok(())
    }

    /// Marks every node `Up`.
    pub fn mark_all_up(&self) {
        self.stores.iter().for_each(NodeStore::mark_up);
    }

    /// Records held across all nodes, replicas counted separately.
    pub fn entry_count(&self) -> usize {
        self.stores.iter().map(NodeStore::len).sum()
    }

    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            strategy: "consistent-hashing".to_string(),
            nodes: summarize(&self.stores),
            ranges: self.assignments.clone(),
        }
    }

    fn route(&self, op: &str, key: &str) -> Vec<usize> {
        let hash = range_hash(key);
        let owners = self.owners_for_hash(hash);
        tracing::debug!("{}: key {} (hash {:#018x}) owned by {:?}", op, key, hash, owners);
        owners
    }
}

impl<V: Clone> KeyValueStore<V> for RangeRouter<V> {
    fn create(&self, key: &str, value: V) -> Result<()> {
        for owner in self.route("CREATE", key) {
            self.stores[owner].create(key, value.clone())?;
        }
        Ok(())
    }

    /// Tries each owner in turn. `Unavailable` moves on to the next one, any
    /// other error ends the read.
    fn read(&self, key: &str) -> Result<V> {
        for owner in self.route("READ", key) {
            match self.stores[owner].read(key) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    tracing::warn!("READ: {}, trying next owner of {}", e, key);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!("READ: every owner of {} is down", key);
        Err(StorageError::AllReplicasDown {
            key: key.to_string(),
        })
    }

    /// Stops at the first owner that fails; owners already updated keep the
    /// new value.
    fn update(&self, key: &str, value: V) -> Result<()> {
        for owner in self.route("UPDATE", key) {
            self.stores[owner].update(key, value.clone())?;
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        for owner in self.route("DELETE", key) {
            self.stores[owner].delete(key)?;
        }
        Ok(())
    }
}
