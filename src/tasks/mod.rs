//! Background Tasks Module
//!
//! Maintenance the host application may run alongside the cache.
//!
//! # Tasks
//! - Expired entry sweep: calls `clear_expired` at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
