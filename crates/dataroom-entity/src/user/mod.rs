//! User identity value types.

pub mod role;

pub use role::UserRole;
