//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/upsert DTOs for inserts
//! - Query parameter enums used by the matching repository

pub mod bookmark;
pub mod session;
pub mod user;
