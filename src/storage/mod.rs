//! Single-Node Storage Module
//!
//! The atomic unit of storage that both routers are built from.
//!
//! ## Core Concepts
//! - **NodeStore**: A key-value table owned by one node. Holds values verbatim and
//!   never inspects them.
//! - **Availability**: Every node is either `Up` or `Down`. The flag is external
//!   state set by the environment and it gates `read` only.
//! - **KeyValueStore**: The CRUD contract shared by the node store and both
//!   routers, so callers can be written against any of them.

pub mod error;
pub mod node;

use error::Result;

/// The four CRUD operations every storage layer in this crate exposes.
///
/// All methods take `&self`: node stores use interior locking, routers hold no
/// mutable state of their own.
pub trait KeyValueStore<V> {
    /// Inserts the record, overwriting any previous value.
    fn create(&self, key: &str, value: V) -> Result<()>;

    /// Returns a copy of the stored value.
    fn read(&self, key: &str) -> Result<V>;

    /// Overwrites an existing record. Never creates one.
    fn update(&self, key: &str, value: V) -> Result<()>;

    /// Removes an existing record.
    fn delete(&self, key: &str) -> Result<()>;
}
