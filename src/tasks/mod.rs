//! Background Tasks Module
//!
//! # Tasks
//! - Expiration sweep: removes expired entries from a `MemoryStore` at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
