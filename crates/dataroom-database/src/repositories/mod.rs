//! Repository implementations for DataRoom entities.
//!
//! Repositories are stateless: every query takes the executor it runs on,
//! so the same statements serve both pooled reads and open transactions.

pub mod document;
pub mod folder;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
