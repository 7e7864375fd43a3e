//! ProjectHub Shared Types and Utilities
//!
//! This crate contains the tenant data model, subdomain rules and Directory
//! Service wire types shared across the ProjectHub front end.

pub mod error;
pub mod subdomain;
pub mod types;
pub mod wire;

pub use error::*;
pub use subdomain::{
    normalize_subdomain, validate_subdomain, MAX_SUBDOMAIN_LEN, MIN_SUBDOMAIN_LEN,
    RESERVED_SUBDOMAINS,
};
pub use types::*;
pub use wire::*;
