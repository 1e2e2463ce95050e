use thiserror::Error;

use super::node::NodeId;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by node stores and routers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The key is absent from the node that owns it.
    #[error("Key not found: {key}")]
    NotFound { key: String },

    /// The node is `Down`. Only raised by reads.
    #[error("Node {node} is unavailable")]
    Unavailable { node: NodeId },

    /// Every node owning the key was `Down` during a range-router read.
    #[error("No node holding key {key} is available")]
    AllReplicasDown { key: String },

    #[error("A router needs at least one node")]
    InvalidNodeCount,

    #[error("Node index {index} out of range (router has {len} nodes)")]
    NodeOutOfRange { index: usize, len: usize },
}

impl StorageError {
    pub fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Whether another owner may still serve the request.
    ///
    /// Only `Unavailable` qualifies; the range router's read fail-over skips
    /// those and surfaces everything else.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
