//! Directory Service client
//!
//! The Directory Service is the authoritative tenant directory. The front end
//! consumes exactly two of its endpoints:
//! - GET  /api/check-subdomain/?subdomain=<value>
//! - POST /api/signup/

mod client;

pub use client::{DirectoryError, DirectoryResult, DirectoryService, HttpDirectoryClient};
