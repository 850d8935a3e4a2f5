//! # dataroom-database
//!
//! PostgreSQL connection management, sqlx repositories, and the
//! transactional [`HierarchyStore`] abstraction the hierarchy engine runs
//! against. An in-memory store with the same transaction semantics backs
//! development mode and tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, connect_store};
pub use store::{HierarchyStore, MemoryStore, PgHierarchyStore, StoreTransaction};
