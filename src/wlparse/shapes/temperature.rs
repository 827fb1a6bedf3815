//! Temperature-average extractor
//!
//! Temperature summaries have the average in the fifth column:
//! `Component, Min, Max, Samples, Avg`. The header row contributes its
//! fifth cell under the table key, every other row its rounded average.

use super::{after_last_slash, ExtractError, TableData, TableShape};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::{rounded_or_text, MetricValue};

const AVERAGE_COLUMN: usize = 4;

pub fn extract(rows: &[TokenizedRow], table_key: &str) -> Result<TableData, ExtractError> {
    let header = rows.first().ok_or(ExtractError::MissingRows {
        shape: TableShape::Temperature,
        needed: 1,
        found: 0,
    })?;
    let label = header.get(AVERAGE_COLUMN).ok_or(ExtractError::ShortHeader {
        shape: TableShape::Temperature,
        needed: AVERAGE_COLUMN + 1,
        found: header.len(),
    })?;

    let mut data = TableData::new();
    data.insert(table_key.to_string(), MetricValue::from(label));

    for row in &rows[1..] {
        if let Some(average) = row.get(AVERAGE_COLUMN) {
            data.insert(after_last_slash(&row[0]).to_string(), rounded_or_text(average));
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<TokenizedRow> {
        lines.iter().map(|l| l.iter().copied().collect()).collect()
    }

    #[test]
    fn test_average_column() {
        let table = rows(&[
            &["Component", "Min", "Max", "Samples", "Avg (C)"],
            &["CPU/Package_0/Core_0", "40", "71", "300", "47.891"],
            &["CPU/Package_0/Core_1", "39", "70", "300", "hot"],
            &["CPU/Package_0/Core_2", "39"],
        ]);
        let data = extract(&table, "CPU_temp").unwrap();
        let pairs: Vec<(&str, MetricValue)> =
            data.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                ("CPU_temp", MetricValue::from("Avg (C)")),
                ("Core_0", MetricValue::Float(47.89)),
                ("Core_1", MetricValue::from("hot")),
            ]
        );
    }

    #[test]
    fn test_narrow_header_is_an_error() {
        let table = rows(&[&["Component", "Min", "Max"]]);
        assert_eq!(
            extract(&table, "SoC_temp"),
            Err(ExtractError::ShortHeader {
                shape: TableShape::Temperature,
                needed: 5,
                found: 3
            })
        );
    }
}
