//! Queue adapters

mod sqlite_queue;

pub use sqlite_queue::SqliteQueue;
