//! Integration tests for the registry under concurrent callers.
//!
//! Verifies:
//! - Ledgers stay strictly ascending and duplicate-free under contention
//! - The highest global sequence wins a contested slot regardless of arrival order
//! - A batch is observed all-or-nothing by concurrent readers

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use cmdledger_core::{Command, CommandKind, GlobalSequence, ReceiverId, ReceiverSequence};

    use crate::command_registry::{CommandRegistry, InMemoryCommandRegistry};
    use crate::config::RegistryConfig;

    fn cmd(receiver: u32, seq: u32, global: u32) -> Command {
        Command::without_payload(
            GlobalSequence::new(global),
            ReceiverSequence::new(seq),
            ReceiverId::new(receiver),
            CommandKind::new(1),
        )
    }

    fn setup() -> Arc<InMemoryCommandRegistry> {
        cmdledger_observability::tracing::init(cmdledger_observability::LogFormat::Compact);
        Arc::new(InMemoryCommandRegistry::new(RegistryConfig::default()))
    }

    #[test]
    fn concurrent_writers_keep_ledgers_sorted_and_unique() {
        let registry = setup();
        let writers = 8u32;
        let barrier = Arc::new(Barrier::new(writers as usize));

        let handles: Vec<_> = (0..writers)
            .map(|w| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for round in 0..50u32 {
                        // Slots overlap between writers; global sequences are unique.
                        let global = round * writers + w + 1;
                        let batch = (0..4).map(|r| cmd(r, (round + w) % 16, global)).collect();
                        registry.add_commands(batch);
                        if round % 7 == 0 {
                            registry.remove_commands(ReceiverId::new(w % 4), ReceiverSequence::new(round % 16));
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        for r in 0..4 {
            let ledger = registry.get_commands(ReceiverId::new(r), ReceiverSequence::ZERO);
            assert!(
                ledger
                    .windows(2)
                    .all(|w| w[0].receiver_sequence() < w[1].receiver_sequence()),
                "receiver {r} ledger not strictly ascending"
            );
        }
    }

    #[test]
    fn highest_global_sequence_wins_contested_slot() {
        let registry = setup();
        let writers = 16u32;
        let barrier = Arc::new(Barrier::new(writers as usize));

        let handles: Vec<_> = (1..=writers)
            .map(|g| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.add_commands(vec![cmd(9, 1, g)]);
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let stored = registry.get_commands(ReceiverId::new(9), ReceiverSequence::ZERO);
        assert_eq!(stored, vec![cmd(9, 1, writers)]);
    }

    #[test]
    fn batches_are_atomic_for_concurrent_readers() {
        let registry = setup();
        let batch_len = 32u32;
        let batches = 20u32;

        let writer = {
            let registry = registry.clone();
            thread::spawn(move || {
                for b in 0..batches {
                    let batch = (0..batch_len)
                        .map(|i| cmd(1, b * batch_len + i, b * batch_len + i + 1))
                        .collect();
                    registry.add_commands(batch);
                }
            })
        };

        let reader = {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let len = registry
                        .get_commands(ReceiverId::new(1), ReceiverSequence::ZERO)
                        .len() as u32;
                    assert_eq!(len % batch_len, 0, "observed a partially applied batch");
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();

        assert_eq!(registry.ledger_len(ReceiverId::new(1)), (batch_len * batches) as usize);
    }

    #[test]
    fn shared_through_trait_object() {
        let registry: Arc<dyn CommandRegistry> = setup();
        registry.add_commands(vec![cmd(2, 2, 1), cmd(2, 1, 2)]);

        let fetched = registry.get_commands(ReceiverId::new(2), ReceiverSequence::new(1));
        assert_eq!(fetched, vec![cmd(2, 1, 2), cmd(2, 2, 1)]);
    }
}
