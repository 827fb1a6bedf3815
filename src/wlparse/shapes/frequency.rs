//! Frequency-average extractor
//!
//! The header pair is copied as-is. Data rows are keyed by the third
//! `/`-separated segment of their label (`CPU/Package_0/Core_3` → `Core_3`)
//! and valued by the integer part of their frequency.

use super::{ExtractError, TableData, TableShape};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::{truncated_or_text, MetricValue};

fn core_label(cell: &str) -> &str {
    cell.split('/')
        .nth(2)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(cell)
}

pub fn extract(rows: &[TokenizedRow]) -> Result<TableData, ExtractError> {
    let header = rows.first().ok_or(ExtractError::MissingRows {
        shape: TableShape::FrequencyAverage,
        needed: 1,
        found: 0,
    })?;
    if header.len() < 2 {
        return Err(ExtractError::ShortHeader {
            shape: TableShape::FrequencyAverage,
            needed: 2,
            found: header.len(),
        });
    }

    let mut data = TableData::new();
    data.insert(header[0].to_string(), MetricValue::from(&header[1]));

    for row in &rows[1..] {
        if let (Some(label), Some(value)) = (row.get(0), row.get(1)) {
            data.insert(core_label(label).to_string(), truncated_or_text(value));
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
    fn test_average_frequency() {
        let table = rows(&[
            &["Core", "Average Frequency (MHz)"],
            &["CPU/Package_0/Core_0", "2345.67"],
            &["CPU/Package_0/Core_1", "1999.99"],
            &["Package_0", "2100.5"],
            &["CPU/Package_0/Core_2"],
        ]);
        let data = extract(&table).unwrap();
        let pairs: Vec<(&str, MetricValue)> =
            data.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Core", MetricValue::from("Average Frequency (MHz)")),
                ("Core_0", MetricValue::Int(2345)),
                ("Core_1", MetricValue::Int(1999)),
                ("Package_0", MetricValue::Int(2100)),
            ]
        );
    }

    #[test]
    fn test_unparseable_frequency_kept() {
        let table = rows(&[&["Core", "Avg"], &["CPU/P/Core_0", "n/a"]]);
        assert_eq!(extract(&table).unwrap()["Core_0"], MetricValue::from("n/a"));
    }

    #[test]
    fn test_single_field_header_is_an_error() {
        let table = rows(&[&["Core"]]);
        assert!(extract(&table).is_err());
    }
}
