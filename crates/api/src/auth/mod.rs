//! Authentication building blocks.
//!
//! - [`token`] -- public-token codec (signed JWT over a session token) and
//!   the auth configuration.
//! - [`session`] -- the login / validate / refresh / logout session
//!   lifecycle.

pub mod session;
pub mod token;
