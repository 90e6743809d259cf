use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cmdledger_core::{AddOutcome, AddReport, Command, CommandKind, ReceiverId, ReceiverSequence};

use super::r#trait::CommandRegistry;
use crate::config::RegistryConfig;

type Ledgers = HashMap<ReceiverId, Vec<Command>>;

/// In-memory command registry guarded by a single exclusive lock.
///
/// One mutex covers every receiver's ledger, so a batch spanning several
/// receivers is applied as one unit. Sharding per receiver would raise
/// throughput but lose that cross-receiver batch atomicity.
#[derive(Debug, Default)]
pub struct InMemoryCommandRegistry {
    config: RegistryConfig,
    ledgers: Mutex<Ledgers>,
}

impl InMemoryCommandRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            ledgers: Mutex::new(HashMap::new()),
        }
    }

    /// Convenience constructor taking the three seed values directly.
    pub fn with_seeds(
        initial_command_kind: impl Into<CommandKind>,
        initial_receiver_sequence: impl Into<ReceiverSequence>,
        initial_receiver: impl Into<ReceiverId>,
    ) -> Self {
        Self::new(RegistryConfig::new(
            initial_command_kind.into(),
            initial_receiver_sequence.into(),
            initial_receiver.into(),
        ))
    }

    /// Seed values supplied at construction. They do not influence the ledger.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of receivers with a ledger entry, including empty ones left
    /// behind by `remove_commands`/`get_commands` on unknown receivers.
    pub fn receiver_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of commands currently held for `receiver_id`.
    ///
    /// Unlike the trait operations, this does not materialize a ledger.
    pub fn ledger_len(&self, receiver_id: ReceiverId) -> usize {
        self.lock().get(&receiver_id).map_or(0, Vec::len)
    }

    // Every mutation keeps the ledger sorted at each step, so the data behind
    // a poisoned lock is still valid.
    fn lock(&self) -> MutexGuard<'_, Ledgers> {
        self.ledgers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(ledger: &[Command], receiver_sequence: ReceiverSequence) -> usize {
        ledger.partition_point(|c| c.receiver_sequence() < receiver_sequence)
    }

    fn apply(ledger: &mut Vec<Command>, command: Command) -> AddOutcome {
        let idx = Self::position(ledger, command.receiver_sequence());

        match ledger.get_mut(idx) {
            Some(existing) if existing.receiver_sequence() == command.receiver_sequence() => {
                if command.supersedes(existing) {
                    *existing = command;
                    AddOutcome::Updated
                } else {
                    AddOutcome::Ignored
                }
            }
            _ => {
                ledger.insert(idx, command);
                AddOutcome::Added
            }
        }
    }
}

impl CommandRegistry for InMemoryCommandRegistry {
    fn add_commands(&self, batch: Vec<Command>) -> AddReport {
        let mut report = AddReport::with_capacity(batch.len());
        let mut ledgers = self.lock();

        for command in batch {
            let receiver_id = command.receiver_id();
            let receiver_sequence = command.receiver_sequence();
            let command_kind = command.command_kind();
            let global_sequence = command.global_sequence();

            let ledger = ledgers.entry(receiver_id).or_default();
            let outcome = Self::apply(ledger, command);

            if outcome.is_applied() {
                tracing::info!(
                    outcome = outcome.as_str(),
                    receiver = %receiver_id,
                    receiver_sequence = %receiver_sequence,
                    command_kind = %command_kind,
                    global_sequence = %global_sequence,
                    "command {outcome}"
                );
            } else {
                tracing::debug!(
                    receiver = %receiver_id,
                    receiver_sequence = %receiver_sequence,
                    global_sequence = %global_sequence,
                    "stale command ignored"
                );
            }

            report.push(outcome);
        }

        report
    }

    fn remove_commands(&self, receiver_id: ReceiverId, receiver_sequence: ReceiverSequence) {
        let mut ledgers = self.lock();
        let ledger = ledgers.entry(receiver_id).or_default();

        let before = ledger.len();
        ledger.retain(|c| c.receiver_sequence() != receiver_sequence);

        tracing::debug!(
            receiver = %receiver_id,
            receiver_sequence = %receiver_sequence,
            removed = before - ledger.len(),
            "remove commands"
        );
    }

    fn get_commands(&self, receiver_id: ReceiverId, start: ReceiverSequence) -> Vec<Command> {
        let mut ledgers = self.lock();
        let ledger = ledgers.entry(receiver_id).or_default();

        let idx = Self::position(ledger, start);
        ledger[idx..].to_vec()
    }
}
