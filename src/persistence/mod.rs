//! Snapshot persistence: the stored document schema and the stores that
//! write and read it.

mod snapshot;
mod store;

pub use snapshot::Snapshot;
pub use store::{FileStore, MemoryStore, SnapshotStore};
