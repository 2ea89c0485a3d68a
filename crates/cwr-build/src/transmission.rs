//! Output lines and the counters that tie them together.

use cwr_format::{FieldValues, RecordType, keys};
use cwr_model::Finding;

use crate::party_ids::PartyIds;

/// A transmission being written: every emitted line plus the sequence
/// counters.
///
/// Transaction sequence is 0-based and assigned once per work. Record
/// sequence is 0 on the work record and increments by one per detail
/// record; it never skips.
#[derive(Debug, Default)]
pub(crate) struct Transmission {
    lines: Vec<String>,
    transactions: u32,
    transaction_seq: u32,
    record_seq: u32,
    notes: Vec<Finding>,
    pub(crate) ids: PartyIds,
}

impl Transmission {
    /// Emit a record outside any transaction (HDR, GRH, GRT, TRL).
    pub(crate) fn emit(&mut self, record: RecordType, values: &FieldValues) {
        self.lines.push(record.template().build(values));
    }

    /// Sequence number the next transaction will get.
    pub(crate) fn next_transaction_seq(&self) -> u32 {
        self.transactions
    }

    /// Open a transaction with its work record.
    pub(crate) fn begin_transaction(&mut self, record: RecordType, values: FieldValues) {
        self.transaction_seq = self.transactions;
        self.transactions += 1;
        self.record_seq = 0;
        self.emit_in_transaction(record, values);
    }

    /// Emit the next detail record of the open transaction.
    pub(crate) fn emit_detail(&mut self, record: RecordType, values: FieldValues) {
        self.record_seq += 1;
        self.emit_in_transaction(record, values);
    }

    fn emit_in_transaction(&mut self, record: RecordType, mut values: FieldValues) {
        values
            .set(keys::TRANSACTION_SEQ, self.transaction_seq)
            .set(keys::RECORD_SEQ, self.record_seq);
        self.emit(record, &values);
    }

    pub(crate) fn transactions(&self) -> u32 {
        self.transactions
    }

    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn note(&mut self, finding: Finding) {
        self.notes.push(finding);
    }

    pub(crate) fn finish(self) -> (Vec<String>, Vec<Finding>) {
        (self.lines, self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwr_format::layout;

    #[test]
    fn sequences_restart_per_transaction() {
        let mut out = Transmission::default();
        out.begin_transaction(RecordType::Nwr, FieldValues::new());
        out.emit_detail(RecordType::Spu, FieldValues::new());
        out.emit_detail(RecordType::Spu, FieldValues::new());
        out.begin_transaction(RecordType::Nwr, FieldValues::new());
        out.emit_detail(RecordType::Swr, FieldValues::new());

        assert_eq!(out.transactions(), 2);
        let (lines, _) = out.finish();
        let seqs: Vec<(&str, &str)> = lines
            .iter()
            .map(|line| {
                (
                    layout::TRANSACTION_SEQ.read(line).unwrap_or_default(),
                    layout::RECORD_SEQ.read(line).unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            seqs,
            vec![
                ("00000000", "00000000"),
                ("00000000", "00000001"),
                ("00000000", "00000002"),
                ("00000001", "00000000"),
                ("00000001", "00000001"),
            ]
        );
    }
}
