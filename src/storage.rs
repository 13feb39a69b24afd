pub mod adapter;
pub mod disk;
pub mod engine;
pub mod iter;
pub mod memory;

pub use adapter::StorageAdapter;
pub use disk::OnDiskWorldState;
pub use engine::{StorageError, WorldState};
pub use iter::{KeyValue, ScanTracker, StateIterator};
pub use memory::InMemoryWorldState;
