//! Document attachment entities.

pub mod model;

pub use model::{CreateDocument, Document, DocumentPatch};
