//! Statistics Row Model
//!
//! A statistics row starts with the key of the batch item it belongs to,
//! written by the driver, followed by whatever the external tool appended.
//! Rows are only ever read back to find out which items already finished.

use crate::models::batch_item::InputMode;
use crate::models::record::FIELD_SEPARATOR;

/// One line of the statistics file, split into item key and tool payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    /// Item key, fields re-joined with the canonical separator
    pub key: String,

    /// Everything the tool wrote after the key, trimmed
    pub payload: String,
}

impl StatsRow {
    /// Split a statistics line into key and payload
    ///
    /// Returns `None` when the line does not even hold a full key, which is
    /// the case for blank lines and for rows cut short by an interrupted write.
    pub fn parse(line: &str, mode: InputMode) -> Option<Self> {
        let key_fields = mode.key_fields();
        let mut parts = line.splitn(key_fields + 1, ',');

        let mut key = Vec::with_capacity(key_fields);
        for _ in 0..key_fields {
            let field = parts.next()?.trim();
            if field.is_empty() {
                return None;
            }
            key.push(field);
        }

        // Without a separator after the key the prefix itself was never completed
        let payload = parts.next()?.trim().to_string();

        Some(Self {
            key: key.join(FIELD_SEPARATOR),
            payload,
        })
    }

    /// Whether the external tool wrote its results for this row
    pub fn is_complete(&self) -> bool {
        !self.payload.is_empty()
    }
}
