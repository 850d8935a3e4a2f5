//! Document attachment records.

pub mod service;

pub use service::{DocumentService, RegisterDocumentRequest};
