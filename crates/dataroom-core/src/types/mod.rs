//! Core type definitions used across the DataRoom workspace.

pub mod id;

pub use id::*;
