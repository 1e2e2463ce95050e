use super::hash::shard_hash;
use super::{TopologySnapshot, build_nodes, node_at, summarize};
use crate::storage::KeyValueStore;
use crate::storage::error::Result;
use crate::storage::node::{NodeState, NodeStore};

/// Modulo-hash router: every key lives on exactly one node.
///
/// Errors from the owning node are returned untouched. There is no fail-over,
/// so while a node is `Down` its keys cannot be read.
pub struct ShardRouter<V> {
    shards: Vec<NodeStore<V>>,
}

impl<V> ShardRouter<V> {
    /// Builds a router over `n` fresh (and `Down`) nodes.
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            shards: build_nodes(n)?,
        })
    }

    /// Index of the node owning `key`.
    pub fn shard_for(&self, key: &str) -> usize {
        (shard_hash(key) % self.shards.len() as u64) as usize
    }

    pub fn node_count(&self) -> usize {
        self.shards.len()
    }

    pub fn node(&self, index: usize) -> Option<&NodeStore<V>> {
        self.shards.get(index)
    }

    pub fn nodes(&self) -> &[NodeStore<V>] {
        &self.shards
    }

    pub fn set_node_state(&self, index: usize, state: NodeState) -> Result<()> {
        node_at(&self.shards, index)?.set_state(state);
        Ok(())
    }

    /// Marks every node `Up`.
    pub fn mark_all_up(&self) {
        self.shards.iter().for_each(NodeStore::mark_up);
    }

    pub fn entry_count(&self) -> usize {
        self.shards.iter().map(NodeStore::len).sum()
    }

    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            strategy: "sharding".to_string(),
            nodes: summarize(&self.shards),
            ranges: Vec::new(),
        }
    }

    fn owner(&self, key: &str) -> &NodeStore<V> {
        let shard = self.shard_for(key);
        tracing::debug!("Key {} routed to shard {}", key, shard);
        &self.shards[shard]
    }
}

impl<V: Clone> KeyValueStore<V> for ShardRouter<V> {
    fn create(&self, key: &str, value: V) -> Result<()> {
        self.owner(key).create(key, value)
    }

    fn read(&self, key: &str) -> Result<V> {
        self.owner(key).read(key)
    }

    fn update(&self, key: &str, value: V) -> Result<()> {
        self.owner(key).update(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.owner(key).delete(key)
    }
}
