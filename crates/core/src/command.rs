//! The command record stored in receiver ledgers.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{CommandKind, GlobalSequence, ReceiverId, ReceiverSequence};

/// Largest payload a command may carry, in bytes.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// A command addressed to a single receiver.
///
/// `Command` is an immutable value. Once it is handed to a registry it is only
/// ever replaced wholesale, never edited in place.
///
/// ## Sequence Numbers
///
/// - `receiver_sequence` decides where the command sits in its receiver's
///   ledger and which slot it occupies. It is *not* unique on submission: a
///   later command may reuse the value to supersede an earlier one.
/// - `global_sequence` is assigned by the issuer from a system-wide counter and
///   only breaks ties between two commands for the same slot (higher wins).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CommandRecord")]
pub struct Command {
    global_sequence: GlobalSequence,
    receiver_sequence: ReceiverSequence,
    receiver_id: ReceiverId,
    command_kind: CommandKind,
    payload: Vec<u8>,
}

impl Command {
    /// Build a command, rejecting payloads larger than [`MAX_PAYLOAD_LEN`].
    pub fn new(
        global_sequence: GlobalSequence,
        receiver_sequence: ReceiverSequence,
        receiver_id: ReceiverId,
        command_kind: CommandKind,
        payload: impl Into<Vec<u8>>,
    ) -> DomainResult<Self> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(DomainError::payload_too_large(payload.len(), MAX_PAYLOAD_LEN));
        }

        Ok(Self {
            global_sequence,
            receiver_sequence,
            receiver_id,
            command_kind,
            payload,
        })
    }

    /// Build a command with an empty payload.
    pub fn without_payload(
        global_sequence: GlobalSequence,
        receiver_sequence: ReceiverSequence,
        receiver_id: ReceiverId,
        command_kind: CommandKind,
    ) -> Self {
        Self {
            global_sequence,
            receiver_sequence,
            receiver_id,
            command_kind,
            payload: Vec::new(),
        }
    }

    pub fn global_sequence(&self) -> GlobalSequence {
        self.global_sequence
    }

    pub fn receiver_sequence(&self) -> ReceiverSequence {
        self.receiver_sequence
    }

    pub fn receiver_id(&self) -> ReceiverId {
        self.receiver_id
    }

    pub fn command_kind(&self) -> CommandKind {
        self.command_kind
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Whether `self` should replace `stored`, which occupies the same slot.
    ///
    /// Strictly greater wins; equal global sequences keep the stored command.
    pub fn supersedes(&self, stored: &Command) -> bool {
        stored.global_sequence < self.global_sequence
    }
}

/// Unchecked wire shape, validated into a [`Command`] on deserialization.
#[derive(Deserialize)]
struct CommandRecord {
    global_sequence: GlobalSequence,
    receiver_sequence: ReceiverSequence,
    receiver_id: ReceiverId,
    command_kind: CommandKind,
    #[serde(default)]
    payload: Vec<u8>,
}

impl TryFrom<CommandRecord> for Command {
    type Error = DomainError;

    fn try_from(raw: CommandRecord) -> Result<Self, Self::Error> {
        Command::new(
            raw.global_sequence,
            raw.receiver_sequence,
            raw.receiver_id,
            raw.command_kind,
            raw.payload,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(global: u32, seq: u32, payload: Vec<u8>) -> DomainResult<Command> {
        Command::new(
            GlobalSequence::new(global),
            ReceiverSequence::new(seq),
            ReceiverId::new(101),
            CommandKind::new(1),
            payload,
        )
    }

    #[test]
    fn accepts_payload_at_the_limit() {
        let c = cmd(1, 1, vec![0xAB; MAX_PAYLOAD_LEN]).unwrap();
        assert_eq!(c.payload_len(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn rejects_oversized_payload() {
        let err = cmd(1, 1, vec![0; MAX_PAYLOAD_LEN + 1]).unwrap_err();
        assert_eq!(
            err,
            DomainError::PayloadTooLarge {
                len: MAX_PAYLOAD_LEN + 1,
                max: MAX_PAYLOAD_LEN
            }
        );
    }

    #[test]
    fn supersedes_only_on_strictly_greater_global_sequence() {
        let stored = cmd(5, 1, vec![]).unwrap();
        assert!(cmd(6, 1, vec![]).unwrap().supersedes(&stored));
        assert!(!cmd(5, 1, vec![]).unwrap().supersedes(&stored));
        assert!(!cmd(4, 1, vec![]).unwrap().supersedes(&stored));
    }

    #[test]
    fn deserialization_enforces_payload_bound() {
        let ok = r#"{"global_sequence":1,"receiver_sequence":2,"receiver_id":101,"command_kind":3,"payload":[1,2,3]}"#;
        let c: Command = serde_json::from_str(ok).unwrap();
        assert_eq!(c.receiver_sequence(), ReceiverSequence::new(2));
        assert_eq!(c.payload(), &[1, 2, 3]);

        let missing_payload = r#"{"global_sequence":1,"receiver_sequence":2,"receiver_id":101,"command_kind":3}"#;
        let c: Command = serde_json::from_str(missing_payload).unwrap();
        assert!(c.payload().is_empty());

        let big = serde_json::json!({
            "global_sequence": 1,
            "receiver_sequence": 2,
            "receiver_id": 101,
            "command_kind": 3,
            "payload": vec![0u8; MAX_PAYLOAD_LEN + 1],
        });
        let err = serde_json::from_value::<Command>(big).unwrap_err();
        assert!(err.to_string().contains("payload too large"));
    }
}
