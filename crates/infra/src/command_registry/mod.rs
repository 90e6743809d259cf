//! Per-receiver ordered command ledger.
//!
//! This module defines the registry boundary callers (CLI harnesses, future
//! transports) program against, plus the in-process implementation.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCommandRegistry;
pub use r#trait::CommandRegistry;
