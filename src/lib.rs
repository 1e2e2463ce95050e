//! Partitioned Key-Value Store Library
//!
//! An in-memory key-value storage layer with two partitioning strategies built
//! on top of a common single-node store.
//!
//! ## Modules
//! - **`storage`**: The single-node layer. `NodeStore` is a plain key-value table
//!   guarded by an availability flag (`Up`/`Down`) that only gates reads. Also
//!   hosts the shared `StorageError` type and the `KeyValueStore` trait.
//! - **`routing`**: The partitioning layer. `ShardRouter` sends each key to exactly
//!   one node with `hash mod n`; `RangeRouter` splits the 64-bit hash space into
//!   contiguous ranges and fails reads over across every owner of a key.

pub mod routing;
pub mod storage;

pub use routing::range::RangeRouter;
pub use routing::shard::ShardRouter;
pub use storage::error::{Result, StorageError};
pub use storage::node::{NodeId, NodeState, NodeStore};
pub use storage::KeyValueStore;
