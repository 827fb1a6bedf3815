//! Bucketed-frequency extractor: frequency in column 0, residency in column 1.

use super::TableData;
use crate::wlparse::bucketing::{apply_buckets, unit_label, BucketSpec};
use crate::wlparse::lexing::TokenizedRow;

pub fn extract(rows: &[TokenizedRow], table_key: &str, specs: &[BucketSpec]) -> TableData {
    apply_buckets(rows, 0, 1, specs, unit_label(table_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wlparse::bucketing::parse_bucket_specs;
    use crate::wlparse::value::MetricValue;

    #[test]
    fn test_igfx_buckets() {
        let table: Vec<TokenizedRow> = [
            ["Frequency (MHz)", "Residency (%)"],
            ["0", "60.0"],
            ["400", "10.0"],
            ["600", "7.5"],
            ["1200", "2.5"],
            ["2050", "20.0"],
        ]
        .into_iter()
        .map(|r| r.into_iter().collect())
        .collect();
        let specs = parse_bucket_specs(&[
            "0".to_string(),
            "400".to_string(),
            "401-1799".to_string(),
            "1800-2049".to_string(),
            "2050".to_string(),
        ]);

        let data = extract(&table, "iGFX_Pstate", &specs);
        let values: Vec<MetricValue> = data.values().cloned().collect();
        assert_eq!(
            values,
            vec![
                MetricValue::from("IGFX (%)"),
                MetricValue::Float(60.0),
                MetricValue::Float(10.0),
                MetricValue::Float(10.0),
                MetricValue::Float(0.0),
                MetricValue::Float(20.0),
            ]
        );
    }
}
