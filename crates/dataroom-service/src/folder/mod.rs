//! Folder hierarchy engine and folder use cases.

pub mod cascade;
pub mod hierarchy;
pub mod service;

pub use service::{CreateFolderRequest, FolderService};
