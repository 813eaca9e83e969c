//! Job listings: the upstream client, its cache, feed selection and the
//! public HTTP handlers.

pub mod cache;
pub mod client;
pub mod feeds;
pub mod handlers;

pub use cache::JobCache;
pub use client::{JobSource, JobsClient};
