//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod bookmark_repo;
pub mod session_repo;
pub mod user_repo;

pub use bookmark_repo::BookmarkRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
