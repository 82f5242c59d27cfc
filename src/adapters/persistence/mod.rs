//! Persistence adapters: content sources and page stores.

pub mod json_sink;
pub mod memory_repo;
pub mod page_cache;
pub mod sqlite_repo;

pub use json_sink::JsonPageSink;
pub use memory_repo::InMemoryRepo;
pub use page_cache::MemoryPageCache;
pub use sqlite_repo::SqliteRepo;
