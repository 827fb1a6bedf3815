//! Generic two-column extractor
//!
//! Used for unknown keys, PCH tables (value in the third column), bucketed
//! targets without buckets, and as the fallback when another extractor fails.
//!
//! For P-state tables the frequency labels of data rows are cut at the first
//! `.` (`"2400.00"` → `"2400"`); the first row is left alone.

use super::TableData;
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::rounded_or_text;

const PSTATE_MARKER: &str = "_Pstate";

/// Which columns hold the label and the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub key: usize,
    pub value: usize,
    pub truncate_pstate: bool,
}

impl Default for Columns {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Columns {
    pub fn new(key: usize, value: usize) -> Self {
        Self {
            key,
            value,
            truncate_pstate: false,
        }
    }

    /// Enable label truncation when `table_key` names a P-state table.
    pub fn with_pstate_truncation(mut self, table_key: &str) -> Self {
        self.truncate_pstate = table_key.contains(PSTATE_MARKER);
        self
    }
}

pub fn extract(rows: &[TokenizedRow], columns: Columns) -> TableData {
    let mut data = TableData::new();

    for (index, row) in rows.iter().enumerate() {
        let (Some(key), Some(value)) = (row.get(columns.key), row.get(columns.value)) else {
            continue;
        };
        let key = match key.split_once('.') {
            Some((whole, _)) if columns.truncate_pstate && index > 0 => whole,
            _ => key,
        };
        data.insert(key.to_string(), rounded_or_text(value));
    }

    data
}

/// The fallback run after an extractor error: columns 0 and 1, no truncation.
pub fn fallback(rows: &[TokenizedRow]) -> TableData {
    extract(rows, Columns::default())
}
