pub mod initialize;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod store;

pub use memory::MemoryStore;
pub use store::{EventStore, FeedQuery, SortOrder, SqliteStore};
