use std::sync::Arc;

use cmdledger_core::{AddReport, Command, ReceiverId, ReceiverSequence};

/// Concurrent, per-receiver ordered command ledger.
///
/// The registry keeps one ledger per receiver. Each ledger is sorted by
/// `receiver_sequence` and holds at most one command per sequence number.
///
/// ## Add Semantics
///
/// `add_commands()` applies a batch in input order, atomically with respect to
/// every other call. For each command:
/// - no command in that slot yet: insert at its sorted position (**added**)
/// - stored command has a lower `global_sequence`: replace it (**updated**)
/// - otherwise: drop the submission silently (**ignored**)
///
/// The returned [`AddReport`] is informational; callers may discard it.
///
/// ## Unknown Receivers
///
/// `remove_commands()` and `get_commands()` never fail. Against a receiver that
/// was never added to they are a no-op / return an empty `Vec`, and leave an
/// empty ledger behind for that receiver.
///
/// ## Implementation Requirements
///
/// Implementations must:
/// - keep every ledger strictly ascending by `receiver_sequence`
/// - apply a whole batch without interleaving other operations
/// - return owned copies from `get_commands()`
/// - never panic or error on any input
pub trait CommandRegistry: Send + Sync {
    /// Upsert a batch of commands, possibly spanning several receivers.
    fn add_commands(&self, batch: Vec<Command>) -> AddReport;

    /// Remove the command in slot `receiver_sequence` of `receiver_id`'s ledger, if any.
    fn remove_commands(&self, receiver_id: ReceiverId, receiver_sequence: ReceiverSequence);

    /// Snapshot of `receiver_id`'s ledger from `start` (inclusive) onward, ascending.
    fn get_commands(&self, receiver_id: ReceiverId, start: ReceiverSequence) -> Vec<Command>;
}

impl<R> CommandRegistry for Arc<R>
where
    R: CommandRegistry + ?Sized,
{
    fn add_commands(&self, batch: Vec<Command>) -> AddReport {
        (**self).add_commands(batch)
    }

    fn remove_commands(&self, receiver_id: ReceiverId, receiver_sequence: ReceiverSequence) {
        (**self).remove_commands(receiver_id, receiver_sequence)
    }

    fn get_commands(&self, receiver_id: ReceiverId, start: ReceiverSequence) -> Vec<Command> {
        (**self).get_commands(receiver_id, start)
    }
}
