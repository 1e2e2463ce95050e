//! Routing Module
//!
//! Decides which node(s) own a key and delegates CRUD calls to them.
//!
//! ## Strategies
//! - **Sharding** (`ShardRouter`): `hash(key) mod n` picks exactly one node. No
//!   fail-over, a down node makes its keys unreadable.
//! - **Consistent hashing** (`RangeRouter`): the SHA-512 based hash is matched
//!   against every range assignment. Writes fan out to all owners, reads fail
//!   over across them while they report `Unavailable`.

pub mod hash;
pub mod range;
pub mod shard;

use crate::storage::error::{Result, StorageError};
use crate::storage::node::{NodeId, NodeState, NodeStore};
use range::RangeAssignment;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a router, for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub strategy: String,
    pub nodes: Vec<NodeSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeSummary {
    pub id: NodeId,
    pub state: NodeState,
    pub entries: usize,
}

fn build_nodes<V>(n: usize) -> Result<Vec<NodeStore<V>>> {
    if n == 0 {
        return Err(StorageError::InvalidNodeCount);
    }
    Ok((0..n).map(|i| NodeStore::new(NodeId(i))).collect())
}

fn node_at<V>(nodes: &[NodeStore<V>], index: usize) -> Result<&NodeStore<V>> {
    nodes.get(index).ok_or(StorageError::NodeOutOfRange {
        index,
        len: nodes.len(),
    })
}

fn summarize<V>(nodes: &[NodeStore<V>]) -> Vec<NodeSummary> {
    nodes
        .iter()
        .map(|node| NodeSummary {
            id: node.id(),
            state: node.state(),
            entries: node.len(),
        })
        .collect()
}
