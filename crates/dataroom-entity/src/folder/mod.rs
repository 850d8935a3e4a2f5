//! Folder domain entities.

pub mod model;
pub mod view;

pub use model::{CreateFolder, Folder, FolderPatch};
pub use view::{BreadcrumbEntry, DeleteOutcome, FolderContents, FolderDetail, FolderView};
