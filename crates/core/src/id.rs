//! Strongly-typed identifiers and sequence numbers used across the ledger.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a receiver (the addressee that owns a ledger).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiverId(u32);

/// Opaque command type tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandKind(u32);

/// System-wide issue number assigned by the issuer when a command is created.
///
/// Only used to decide which of two commands occupying the same receiver slot
/// survives. It never orders a ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalSequence(u32);

/// Receiver-local sequence number: slot identity and position within one ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiverSequence(u32);

macro_rules! impl_u32_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = u32::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_u32_newtype!(ReceiverId, "ReceiverId");
impl_u32_newtype!(CommandKind, "CommandKind");
impl_u32_newtype!(GlobalSequence, "GlobalSequence");
impl_u32_newtype!(ReceiverSequence, "ReceiverSequence");

macro_rules! impl_sequence {
    ($t:ty) => {
        impl $t {
            /// First value handed out by a fresh issuer counter.
            pub const ZERO: Self = Self(0);

            /// The following sequence number (saturates at `u32::MAX`).
            ///
            /// Issuers use this to advance their counters; the registry never does.
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }
    };
}

impl_sequence!(GlobalSequence);
impl_sequence!(ReceiverSequence);
