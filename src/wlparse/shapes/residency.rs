//! Residency-row extractor
//!
//! ```text
//! State,        CPU/Core_0/C0 (%), C1 (%), Time (ms)
//! A,            45.2,              32.1,   1200
//! ```
//!
//! becomes `State → "A"`, `C0 (%) → 45.2`, `C1 (%) → 32.1`. The walk stops at
//! the first header cell without `(%)` or when the data row runs out.

use super::{after_last_slash, ExtractError, TableData, TableShape};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::{rounded_or_text, MetricValue};

const PERCENT_MARKER: &str = "(%)";

pub fn extract(rows: &[TokenizedRow]) -> Result<TableData, ExtractError> {
    let (header, values) = match rows {
        [header, values, ..] => (header, values),
        _ => {
            return Err(ExtractError::MissingRows {
                shape: TableShape::Residency,
                needed: 2,
                found: rows.len(),
            })
        }
    };

    let label = header.first().ok_or(ExtractError::ShortHeader {
        shape: TableShape::Residency,
        needed: 1,
        found: 0,
    })?;

    let mut data = TableData::new();
    let Some(state) = values.first() else {
        return Ok(data);
    };
    data.insert(label.to_string(), MetricValue::from(state));

    for (column, cell) in header.iter().enumerate().skip(1) {
        if !cell.contains(PERCENT_MARKER) {
            break;
        }
        let Some(value) = values.get(column) else {
            break;
        };
        data.insert(after_last_slash(cell).to_string(), rounded_or_text(value));
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
    fn test_core_cstate_example() {
        let table = rows(&[&["State", "C0 (%)", "C1 (%)"], &["A", "45.2", "32.1"]]);
        let data = extract(&table).unwrap();
        let pairs: Vec<(&str, MetricValue)> =
            data.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                ("State", MetricValue::from("A")),
                ("C0 (%)", MetricValue::Float(45.2)),
                ("C1 (%)", MetricValue::Float(32.1)),
            ]
        );
    }

    #[test]
    fn test_stops_at_first_non_percent_column() {
        let table = rows(&[
            &["State", "CPU/Core_0/C0 (%)", "Time (ms)", "C6 (%)"],
            &["A", "10.456", "1200", "5.0"],
        ]);
        let data = extract(&table).unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["State", "C0 (%)"]);
        assert_eq!(data["C0 (%)"], MetricValue::Float(10.46));
    }

    #[test]
    fn test_stops_when_data_row_is_short() {
        let table = rows(&[&["State", "C0 (%)", "C1 (%)"], &["A", "45.2"]]);
        assert_eq!(extract(&table).unwrap().len(), 2);
    }

    #[test]
    fn test_only_first_data_row_is_read() {
        let table = rows(&[
            &["State", "C0 (%)"],
            &["A", "1.0"],
            &["B", "2.0"],
        ]);
        assert_eq!(extract(&table).unwrap()["C0 (%)"], MetricValue::Float(1.0));
    }

    #[test]
    fn test_empty_header_is_an_error() {
        let table = vec![TokenizedRow::default(), rows(&[&["A", "1.0"]]).remove(0)];
        assert!(matches!(
            extract(&table),
            Err(ExtractError::ShortHeader { found: 0, .. })
        ));
    }

    #[test]
    fn test_empty_data_row_yields_nothing() {
        let table = vec![rows(&[&["State", "C0 (%)"]]).remove(0), TokenizedRow::default()];
        assert!(extract(&table).unwrap().is_empty());
    }

    #[test]
    fn test_header_only_is_an_error() {
        let table = rows(&[&["State", "C0 (%)"]]);
        assert!(matches!(
            extract(&table),
            Err(ExtractError::MissingRows { found: 1, .. })
        ));
    }
}
