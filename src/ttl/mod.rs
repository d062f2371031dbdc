//! TTL Module
//!
//! Normalizes absolute, relative and sliding expiration into a single [`Ttl`]
//! value and converts between TTL strategies and backing-store options.

mod options;
mod strategy;

pub use options::StoreOptions;
pub use strategy::{ExpirationTtl, ResultTtl, Ttl, TtlStrategy};
