//! Bookmark content retrieval and metadata extraction.
//!
//! Provides the HTTP page fetcher, the content-source classifier, the
//! per-source extraction strategies, and the pipeline that ties them
//! together with bookmark persistence. The pipeline is driven either by
//! the API server's background refresh task or by the maintenance CLI.

pub mod classify;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod pipeline;
