//! `cmdledger-core` — domain values for the per-receiver command ledger.
//!
//! This crate contains **pure domain** primitives (no locking, no logging).

pub mod command;
pub mod error;
pub mod id;
pub mod outcome;

pub use command::{Command, MAX_PAYLOAD_LEN};
pub use error::{DomainError, DomainResult};
pub use id::{CommandKind, GlobalSequence, ReceiverId, ReceiverSequence};
pub use outcome::{AddOutcome, AddReport};
