//! In-process adapters used when no database is configured.

mod connection_history;

pub use connection_history::InMemoryConnectionHistoryRepository;
