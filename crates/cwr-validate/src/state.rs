//! Transaction tracking.
//!
//! A work record (NWR/REV) opens a transaction; the next work record, GRT or
//! TRL closes it. Detail records in between are counted against the open
//! transaction.

use std::mem;

/// The SPU most recently seen in the open transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PublisherRef {
    pub role: String,
    pub party_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTransaction {
    /// Line of the work record.
    pub line: usize,
    pub content: String,
    /// Transaction sequence of the work record, when it parsed.
    pub sequence: Option<u64>,
    pub next_record_seq: u64,
    pub publishers: usize,
    pub writers: usize,
    pub last_publisher: Option<PublisherRef>,
}

impl OpenTransaction {
    pub fn new(line: usize, content: &str, sequence: Option<u64>) -> Self {
        Self {
            line,
            content: content.to_string(),
            sequence,
            next_record_seq: 1,
            publishers: 0,
            writers: 0,
            last_publisher: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum TransactionState {
    #[default]
    Idle,
    InTransaction(OpenTransaction),
}

impl TransactionState {
    pub fn open(&mut self, transaction: OpenTransaction) -> Option<OpenTransaction> {
        match mem::replace(self, Self::InTransaction(transaction)) {
            Self::Idle => None,
            Self::InTransaction(previous) => Some(previous),
        }
    }

    /// Return to `Idle`, handing back the transaction that was open.
    pub fn close(&mut self) -> Option<OpenTransaction> {
        match mem::take(self) {
            Self::Idle => None,
            Self::InTransaction(open) => Some(open),
        }
    }

    pub fn current(&mut self) -> Option<&mut OpenTransaction> {
        match self {
            Self::Idle => None,
            Self::InTransaction(open) => Some(open),
        }
    }
}

/// Counters for the group opened by the last GRH.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct GroupState {
    /// Line of the GRH, if one was seen.
    pub start_line: Option<usize>,
    pub transactions: usize,
    /// Transaction sequence of the last work record in the group.
    pub last_sequence: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_hands_back_the_previous_transaction() {
        let mut state = TransactionState::default();
        assert_eq!(state.open(OpenTransaction::new(3, "NWR", Some(0))), None);
        if let Some(open) = state.current() {
            open.writers += 1;
        }

        let previous = state.open(OpenTransaction::new(9, "NWR", Some(1)));
        assert_eq!(previous.map(|open| (open.line, open.writers)), Some((3, 1)));

        assert_eq!(state.close().map(|open| open.line), Some(9));
        assert_eq!(state, TransactionState::Idle);
        assert_eq!(state.close(), None);
    }
}
