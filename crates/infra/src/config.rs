//! Registry configuration loading and representation.

use core::str::FromStr;

use cmdledger_core::{CommandKind, ReceiverId, ReceiverSequence};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_INITIAL_COMMAND_KIND: &str = "CMDLEDGER_INITIAL_COMMAND_KIND";
pub const ENV_INITIAL_RECEIVER_SEQUENCE: &str = "CMDLEDGER_INITIAL_RECEIVER_SEQUENCE";
pub const ENV_INITIAL_RECEIVER: &str = "CMDLEDGER_INITIAL_RECEIVER";

/// Configuration loading error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Seed values handed to a registry at construction.
///
/// These are initialization bookkeeping for the issuing side only; none of
/// the registry operations read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub initial_command_kind: CommandKind,
    pub initial_receiver_sequence: ReceiverSequence,
    pub initial_receiver: ReceiverId,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_command_kind: CommandKind::new(1),
            initial_receiver_sequence: ReceiverSequence::new(1),
            initial_receiver: ReceiverId::new(101),
        }
    }
}

impl RegistryConfig {
    pub fn new(
        initial_command_kind: CommandKind,
        initial_receiver_sequence: ReceiverSequence,
        initial_receiver: ReceiverId,
    ) -> Self {
        Self {
            initial_command_kind,
            initial_receiver_sequence,
            initial_receiver,
        }
    }

    /// Load from `CMDLEDGER_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (missing keys use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            initial_command_kind: read(&lookup, ENV_INITIAL_COMMAND_KIND, defaults.initial_command_kind)?,
            initial_receiver_sequence: read(
                &lookup,
                ENV_INITIAL_RECEIVER_SEQUENCE,
                defaults.initial_receiver_sequence,
            )?,
            initial_receiver: read(&lookup, ENV_INITIAL_RECEIVER, defaults.initial_receiver)?,
        })
    }
}

fn read<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => {
            tracing::debug!("{key} not set; using default {default}");
            Ok(default)
        }
    }
}
