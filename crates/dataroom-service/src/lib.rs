//! # dataroom-service
//!
//! Business logic service layer for DataRoom. The folder module holds the
//! hierarchy engine (path and breadcrumb resolution, collision and cycle
//! checks, cascading delete) and the [`FolderService`] use cases built on
//! it; the document module manages document attachment records.
//!
//! Services follow constructor injection. Each use case opens exactly one
//! store transaction and commits it once every check has passed.

pub mod context;
pub mod document;
pub mod folder;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use document::{DocumentService, RegisterDocumentRequest};
pub use folder::{CreateFolderRequest, FolderService};
