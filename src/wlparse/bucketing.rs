//! Bucketing Transform
//!
//! Folds a frequency/residency table into caller-defined buckets.
//!
//! A bucket spec is either an exact label (`"400"`) or an inclusive range
//! (`"401-1049"`). For each data row (the header row is skipped):
//!
//! ```text
//! key, value parse as floats?  no  → row skipped
//! range bucket contains key?       → value added to that bucket
//! exact bucket equals key?         → value replaces that bucket
//! ```
//!
//! Buckets are tried in declaration order and a row lands in at most one of
//! them. Malformed specs are dropped with a warning and do not appear in the
//! output.

use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::{parse_float, round2, MetricValue};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static EXACT_SPEC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("exact bucket pattern is valid"));

static RANGE_SPEC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)$").expect("range bucket pattern is valid")
});

/// Label of the leading pair describing the bucket unit.
pub const BUCKET_HEADER_LABEL: &str = "Frequency Bucket (MHz)";

/// Unit label used when the table key has no specific one.
pub const GENERIC_UNIT_LABEL: &str = "Residency (%)";

/// A parsed bucket spec.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketSpec {
    /// Matches one key exactly; the matching value is assigned
    Exact { label: String, value: f64 },
    /// Matches keys in `[min, max]`; matching values accumulate
    Range { label: String, min: f64, max: f64 },
}

impl BucketSpec {
    /// Parse `"400"` or `"401-1049"`; anything else is `None`.
    pub fn parse(spec: &str) -> Option<Self> {
        let trimmed = spec.trim();
        if EXACT_SPEC_REGEX.is_match(trimmed) {
            return parse_float(trimmed).map(|value| BucketSpec::Exact {
                label: spec.to_string(),
                value,
            });
        }
        let captures = RANGE_SPEC_REGEX.captures(trimmed)?;
        let min = parse_float(&captures[1])?;
        let max = parse_float(&captures[2])?;
        if min > max {
            return None;
        }
        Some(BucketSpec::Range {
            label: spec.to_string(),
            min,
            max,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            BucketSpec::Exact { label, .. } | BucketSpec::Range { label, .. } => label,
        }
    }

    pub fn matches(&self, key: f64) -> bool {
        match self {
            BucketSpec::Exact { value, .. } => key == *value,
            BucketSpec::Range { min, max, .. } => *min <= key && key <= *max,
        }
    }
}

/// Parse a list of specs, warning about and dropping malformed ones.
pub fn parse_bucket_specs(specs: &[String]) -> Vec<BucketSpec> {
    specs
        .iter()
        .filter_map(|spec| {
            let parsed = BucketSpec::parse(spec);
            if parsed.is_none() {
                warn!(spec = %spec, "ignoring malformed bucket spec");
            }
            parsed
        })
        .collect()
}

/// Percentage-unit label for a bucketed table key.
pub fn unit_label(table_key: &str) -> &'static str {
    match table_key {
        "NPU_Pstate" => "NPU (%)",
        "NoC_Pstate" => "NOC (%)",
        "iGFX_Pstate" => "IGFX (%)",
        "MEMSS_Pstate" => "MEMSS (%)",
        _ => GENERIC_UNIT_LABEL,
    }
}

/// Accumulate rows into buckets.
///
/// The result starts with the unit pair, followed by one entry per valid bucket
/// in declaration order, every value rounded to two decimals.
pub fn apply_buckets(
    rows: &[TokenizedRow],
    key_index: usize,
    value_index: usize,
    specs: &[BucketSpec],
    unit: &str,
) -> IndexMap<String, MetricValue> {
    let mut totals: Vec<f64> = vec![0.0; specs.len()];

    for row in rows.iter().skip(1) {
        let key = match row.get(key_index).and_then(parse_float) {
            Some(key) => key,
            None => continue,
        };
        let value = match row.get(value_index).and_then(parse_float) {
            Some(value) => value,
            None => continue,
        };
        if let Some(slot) = specs.iter().position(|spec| spec.matches(key)) {
            match specs[slot] {
                BucketSpec::Range { .. } => totals[slot] += value,
                BucketSpec::Exact { .. } => totals[slot] = value,
            }
        }
    }

    let mut data = IndexMap::with_capacity(specs.len() + 1);
    data.insert(BUCKET_HEADER_LABEL.to_string(), MetricValue::from(unit));
    for (spec, total) in specs.iter().zip(totals) {
        data.insert(spec.label().to_string(), MetricValue::Float(round2(total)));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str)]) -> Vec<TokenizedRow> {
        let mut rows: Vec<TokenizedRow> = vec![["Frequency (MHz)", "Residency (%)"].into_iter().collect()];
        rows.extend(data.iter().map(|(k, v)| [*k, *v].into_iter().collect()));
        rows
    }

    fn specs(labels: &[&str]) -> Vec<BucketSpec> {
        let owned: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        parse_bucket_specs(&owned)
    }

    #[test]
    fn test_parse_specs() {
        assert_eq!(
            BucketSpec::parse("400"),
            Some(BucketSpec::Exact {
                label: "400".into(),
                value: 400.0
            })
        );
        assert_eq!(
            BucketSpec::parse("401-1049"),
            Some(BucketSpec::Range {
                label: "401-1049".into(),
                min: 401.0,
                max: 1049.0
            })
        );
        assert_eq!(BucketSpec::parse("fast"), None);
        assert_eq!(BucketSpec::parse("10-"), None);
        assert_eq!(BucketSpec::parse("-5"), None);
        assert_eq!(BucketSpec::parse("900-400"), None);
        assert_eq!(BucketSpec::parse("1-2-3"), None);
    }

    #[test]
    fn test_exact_assigns_and_range_accumulates() {
        let table = rows(&[("0", "5.0"), ("1900", "3.0"), ("2000", "4.0"), ("2500", "1.0")]);
        let data = apply_buckets(&table, 0, 1, &specs(&["0", "1900", "1901-2900"]), "NPU (%)");

        let expected: Vec<(&str, MetricValue)> = vec![
            ("Frequency Bucket (MHz)", MetricValue::from("NPU (%)")),
            ("0", MetricValue::Float(5.0)),
            ("1900", MetricValue::Float(3.0)),
            ("1901-2900", MetricValue::Float(5.0)),
        ];
        let actual: Vec<(&str, MetricValue)> =
            data.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_exact_bucket_is_overwritten_not_summed() {
        let table = rows(&[("400", "2.0"), ("400", "7.5")]);
        let data = apply_buckets(&table, 0, 1, &specs(&["400"]), "NOC (%)");
        assert_eq!(data["400"], MetricValue::Float(7.5));
    }

    #[test]
    fn test_first_matching_bucket_wins() {
        let table = rows(&[("1000", "10.0")]);
        let data = apply_buckets(&table, 0, 1, &specs(&["900-1100", "1000", "1000-2000"]), "X");
        assert_eq!(data["900-1100"], MetricValue::Float(10.0));
        assert_eq!(data["1000"], MetricValue::Float(0.0));
        assert_eq!(data["1000-2000"], MetricValue::Float(0.0));
    }

    #[test]
    fn test_unparseable_rows_skipped() {
        let table = rows(&[("n/a", "5.0"), ("400", "idle"), ("400", "1.25")]);
        let data = apply_buckets(&table, 0, 1, &specs(&["400"]), "NOC (%)");
        assert_eq!(data["400"], MetricValue::Float(1.25));
    }

    #[test]
    fn test_header_row_never_counted() {
        let table: Vec<TokenizedRow> = vec![["400", "99.0"].into_iter().collect()];
        let data = apply_buckets(&table, 0, 1, &specs(&["400"]), "NOC (%)");
        assert_eq!(data["400"], MetricValue::Float(0.0));
    }

    #[test]
    fn test_malformed_specs_dropped() {
        let parsed = specs(&["0", "high", "401-1799"]);
        assert_eq!(parsed.len(), 2);
        let data = apply_buckets(&rows(&[]), 0, 1, &parsed, "IGFX (%)");
        assert_eq!(
            data.keys().collect::<Vec<_>>(),
            vec!["Frequency Bucket (MHz)", "0", "401-1799"]
        );
    }

    #[test]
    fn test_totals_rounded() {
        let table = rows(&[("500", "0.333"), ("600", "0.333"), ("700", "0.333")]);
        let data = apply_buckets(&table, 0, 1, &specs(&["401-1049"]), "NOC (%)");
        assert_eq!(data["401-1049"], MetricValue::Float(1.0));
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(unit_label("NoC_Pstate"), "NOC (%)");
        assert_eq!(unit_label("iGFX_Pstate"), "IGFX (%)");
        assert_eq!(unit_label("Custom_Pstate"), GENERIC_UNIT_LABEL);
    }
}
