//! Background Tasks Module
//!
//! Tasks that run alongside request handling.
//!
//! # Tasks
//! - Cache sweep: drops expired cache entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
