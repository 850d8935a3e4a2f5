//! # dataroom-entity
//!
//! Domain entity models for DataRoom. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod document;
pub mod folder;
pub mod user;
