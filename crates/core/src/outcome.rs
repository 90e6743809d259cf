//! Policy outcomes of applying commands to a ledger.

use serde::{Deserialize, Serialize};

/// What happened to a single submitted command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new slot was created.
    Added,
    /// An existing slot was replaced by a command with a higher global sequence.
    Updated,
    /// The command was dropped: the stored one has an equal or higher global sequence.
    Ignored,
}

impl AddOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddOutcome::Added => "added",
            AddOutcome::Updated => "updated",
            AddOutcome::Ignored => "ignored",
        }
    }

    /// Whether the outcome changed registry state.
    pub fn is_applied(&self) -> bool {
        !matches!(self, AddOutcome::Ignored)
    }
}

impl core::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-command outcomes of one batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReport {
    outcomes: Vec<AddOutcome>,
}

impl AddReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, outcome: AddOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[AddOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn added(&self) -> usize {
        self.count(AddOutcome::Added)
    }

    pub fn updated(&self) -> usize {
        self.count(AddOutcome::Updated)
    }

    pub fn ignored(&self) -> usize {
        self.count(AddOutcome::Ignored)
    }

    fn count(&self, outcome: AddOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }
}

impl IntoIterator for AddReport {
    type Item = AddOutcome;
    type IntoIter = std::vec::IntoIter<AddOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
