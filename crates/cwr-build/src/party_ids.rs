//! Interested party ids for parties the registry does not know.

use std::collections::HashMap;

use cwr_model::WriterInput;

/// Ids handed out in order of first appearance within one file, so the same
/// party keeps its id across transactions.
#[derive(Debug, Default)]
pub(crate) struct PartyIds {
    publishers: HashMap<String, String>,
    writers: HashMap<String, String>,
}

impl PartyIds {
    pub(crate) fn publisher(&mut self, name: &str) -> String {
        let next = self.publishers.len() + 1;
        self.publishers
            .entry(name.trim().to_uppercase())
            .or_insert_with(|| format!("PUB{next:06}"))
            .clone()
    }

    pub(crate) fn writer(&mut self, writer: &WriterInput) -> String {
        let key = format!(
            "{}|{}|{}",
            writer.last_name.trim(),
            writer.first_name.as_deref().unwrap_or("").trim(),
            writer.ipi.as_deref().unwrap_or("").trim()
        )
        .to_uppercase();
        let next = self.writers.len() + 1;
        self.writers
            .entry(key)
            .or_insert_with(|| format!("WRI{next:06}"))
            .clone()
    }
}
