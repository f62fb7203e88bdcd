//! Domain types and pure logic shared by every linkvault crate.
//!
//! Nothing in this crate touches the network or the database; it holds the
//! closed error set, the content-source taxonomy, and the small pure
//! computations (hashing, password verification, pagination math) that the
//! db/scrape/api/worker crates build on.

pub mod error;
pub mod hashing;
pub mod pagination;
pub mod password;
pub mod source;
pub mod types;
pub mod validate;

pub use error::{CoreError, CoreResult};
pub use types::{DbId, Timestamp};
