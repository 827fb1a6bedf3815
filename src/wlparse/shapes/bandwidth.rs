//! Bandwidth-total extractor: only the total (last) row's average rate is kept.

use super::TableData;
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::{rounded_or_text, MetricValue};

/// Column of the average rate in bandwidth summaries.
const RATE_COLUMN: usize = 2;

/// Output key for a bandwidth table.
pub fn rate_key(table_key: &str) -> String {
    format!("{}_AvrRt(MB/s)", table_key)
}

pub fn extract(rows: &[TokenizedRow], table_key: &str) -> TableData {
    let value = rows
        .last()
        .and_then(|row| row.get(RATE_COLUMN))
        .map(rounded_or_text)
        .unwrap_or(MetricValue::Int(0));

    let mut data = TableData::new();
    data.insert(rate_key(table_key), value);
    data
}
