//! Power rail summary parser
//!
//! Power summaries are plain CSV: a header line, then one line per rail with
//! the rail name in the first column.
//!
//! ```text
//! Rail,Minimum,Average,Maximum
//! P_SOC,0.81,1.245,3.9
//! P_VCC_PCORE,0.10,0.42,2.2
//! Run Time,,600,
//! ```
//!
//! Each rail maps to the float in the value column (`Average` unless
//! configured). Two derived metrics follow the rails: `Energy (J)` and
//! `P_SOC+MEMORY`. Columns are positional here, so empty cells are kept
//! (unlike section tables, where they are dropped).

use crate::wlparse::aggregation::{CompositeKey, ResultMapping};
use crate::wlparse::error::ParseError;
use crate::wlparse::lexing::{split_lines, split_positional, DEFAULT_DELIMITER};
use crate::wlparse::value::{parse_float, MetricValue};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DEFAULT_VALUE_COLUMN: &str = "Average";

/// Rail holding the run duration in seconds.
pub const RUN_TIME: &str = "Run Time";

pub const ENERGY_METRIC: &str = "Energy (J)";
pub const SOC_MEMORY_METRIC: &str = "P_SOC+MEMORY";

/// Table key used when power metrics are put into a [`ResultMapping`].
pub const POWER_TABLE_KEY: &str = "Power";

/// Value recorded for rails whose value cell is missing or not a number.
pub const UNREADABLE_VALUE: f64 = -1.0;

const RAIL_PREFIX: &str = "P_";
const SOC_RAIL_MARKERS: [&str; 2] = ["P_SOC", "P_MCP"];
const SOC_COMPONENTS: [&str; 4] = ["P_VCC_PCORE", "P_VCC_ECORE", "P_VCCSA", "P_VCCGT"];
const MEMORY_COMPONENTS: [&str; 3] = ["P_VDDQ", "P_VDD2H", "P_VDD2L"];

/// Metrics read from one power summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerSummary {
    metrics: IndexMap<String, f64>,
    soc_power: Option<f64>,
}

impl PowerSummary {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn metrics(&self) -> &IndexMap<String, f64> {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Power of the last SoC/MCP rail with a readable value.
    pub fn soc_power(&self) -> Option<f64> {
        self.soc_power
    }

    /// Measured `P_*` rails in document order, derived metrics excluded.
    pub fn rails(&self) -> Vec<&str> {
        self.metrics
            .keys()
            .map(String::as_str)
            .filter(|name| name.starts_with(RAIL_PREFIX) && *name != SOC_MEMORY_METRIC)
            .collect()
    }

    /// Report columns picked when no target list is configured: every rail, then `Run Time`.
    pub fn auto_detected_targets(&self) -> Vec<&str> {
        let mut targets = self.rails();
        targets.push(RUN_TIME);
        targets
    }

    /// The metrics as a result mapping under [`POWER_TABLE_KEY`].
    pub fn to_mapping(&self) -> ResultMapping {
        let mut mapping = ResultMapping::new();
        for (name, value) in &self.metrics {
            mapping.insert(
                CompositeKey::new(name.as_str(), POWER_TABLE_KEY),
                MetricValue::Float(*value),
            );
        }
        mapping
    }
}

/// Reads power summaries.
#[derive(Debug, Clone)]
pub struct PowerSummaryParser {
    value_column: String,
    delimiter: char,
    targets: Option<Vec<String>>,
}

impl Default for PowerSummaryParser {
    fn default() -> Self {
        Self {
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            delimiter: DEFAULT_DELIMITER,
            targets: None,
        }
    }
}

impl PowerSummaryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = column.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Keep only these metrics, in this order.
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn parse(&self, source: &str) -> Result<PowerSummary, ParseError> {
        self.parse_named(source, "<input>")
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<PowerSummary, ParseError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
        let summary = self.parse_named(&source, &path.display().to_string())?;
        info!(path = %path.display(), metrics = summary.len(), "parsed power summary");
        Ok(summary)
    }

    fn parse_named(&self, source: &str, name: &str) -> Result<PowerSummary, ParseError> {
        let lines = split_lines(source);
        let mut content = lines.iter().filter(|line| !line.trim().is_empty());

        let header = content
            .next()
            .ok_or_else(|| ParseError::EmptyDocument(name.to_string()))?;
        let header = split_positional(header, self.delimiter);
        let column = header
            .iter()
            .position(|cell| *cell == self.value_column)
            .ok_or_else(|| ParseError::MissingColumn {
                column: self.value_column.clone(),
            })?;

        let mut summary = PowerSummary::default();

        for line in content {
            let fields = split_positional(line, self.delimiter);
            let Some(rail) = fields.first().map(String::as_str).filter(|r| !r.is_empty()) else {
                continue;
            };
            let value = match fields.get(column).and_then(|cell| parse_float(cell)) {
                Some(value) => value,
                None => {
                    warn!(rail = %rail, column = %self.value_column, "unreadable rail value");
                    summary.metrics.insert(rail.to_string(), UNREADABLE_VALUE);
                    continue;
                }
            };
            if SOC_RAIL_MARKERS.iter().any(|marker| rail.contains(marker)) {
                summary.soc_power = Some(value);
            }
            summary.metrics.insert(rail.to_string(), value);
        }

        if summary.metrics.is_empty() {
            return Err(ParseError::EmptyDocument(name.to_string()));
        }

        self.add_derived(&mut summary);

        if let Some(targets) = &self.targets {
            summary.metrics = targets
                .iter()
                .filter_map(|name| summary.metrics.get(name).map(|v| (name.clone(), *v)))
                .collect();
        }

        Ok(summary)
    }

    fn add_derived(&self, summary: &mut PowerSummary) {
        let soc_power = summary.soc_power.unwrap_or(0.0);
        let run_time = summary.get(RUN_TIME).unwrap_or(0.0);
        if soc_power > 0.0 && run_time > 0.0 {
            let energy = soc_power * run_time;
            debug!(energy, "derived energy");
            summary.metrics.insert(ENERGY_METRIC.to_string(), energy);
        }

        let positive_sum = |names: &[&str]| -> f64 {
            names
                .iter()
                .filter_map(|name| summary.get(name))
                .filter(|value| *value > 0.0)
                .sum()
        };
        let soc_total = positive_sum(&SOC_COMPONENTS);
        let memory_total = positive_sum(&MEMORY_COMPONENTS);
        if soc_total > 0.0 && memory_total > 0.0 {
            summary
                .metrics
                .insert(SOC_MEMORY_METRIC.to_string(), soc_total + memory_total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "\u{feff}Rail,Minimum,Average,Maximum\n\
        P_SOC,0.81,1.5,3.9\n\
        P_VCC_PCORE,0.10,0.42,2.2\n\
        P_VCC_ECORE,0.05,0.18,1.1\n\
        P_VCCSA,0.01,-0.02,0.1\n\
        P_VDDQ,0.01,0.20,0.5\n\
        P_VDD2H,0.01,n/a,0.5\n\
        V_VCC_PCORE,0.6,0.75,1.1\n\
        Run Time,,600,\n";

    #[test]
    fn test_rails_and_derived_metrics() {
        let summary = PowerSummaryParser::new().parse(SUMMARY).unwrap();

        assert_eq!(summary.get("P_SOC"), Some(1.5));
        assert_eq!(summary.get("P_VDD2H"), Some(UNREADABLE_VALUE));
        assert_eq!(summary.soc_power(), Some(1.5));
        assert_eq!(summary.get(ENERGY_METRIC), Some(900.0));

        // -0.02 and the unreadable rail are not positive
        let soc_memory = summary.get(SOC_MEMORY_METRIC).unwrap();
        assert!((soc_memory - 0.80).abs() < 1e-9);

        let keys: Vec<&str> = summary.metrics().keys().map(String::as_str).collect();
        assert_eq!(keys.last(), Some(&SOC_MEMORY_METRIC));
        assert_eq!(keys[keys.len() - 2], ENERGY_METRIC);
    }

    #[test]
    fn test_rails_only_lists_measured_power_rails() {
        let summary = PowerSummaryParser::new().parse(SUMMARY).unwrap();
        assert_eq!(
            summary.rails(),
            vec!["P_SOC", "P_VCC_PCORE", "P_VCC_ECORE", "P_VCCSA", "P_VDDQ", "P_VDD2H"]
        );
        assert_eq!(summary.auto_detected_targets().last(), Some(&RUN_TIME));
    }

    #[test]
    fn test_missing_value_column() {
        let result = PowerSummaryParser::new()
            .with_value_column("Mean")
            .parse(SUMMARY);
        match result {
            Err(ParseError::MissingColumn { column }) => assert_eq!(column, "Mean"),
            other => panic!("Expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document() {
        let result = PowerSummaryParser::new().parse("\n  \n");
        assert!(matches!(result, Err(ParseError::EmptyDocument(_))));
    }

    #[test]
    fn test_header_only_is_empty_document() {
        let result = PowerSummaryParser::new().parse("\u{feff}Rail,Minimum,Average,Maximum\n\n");
        assert!(matches!(result, Err(ParseError::EmptyDocument(_))));

        let result = PowerSummaryParser::new().parse("Rail,Average\n,1.0\n");
        assert!(matches!(result, Err(ParseError::EmptyDocument(_))));
    }

    #[test]
    fn test_target_filter_orders_by_targets() {
        let summary = PowerSummaryParser::new()
            .with_targets(["Run Time", "P_SOC", "P_MISSING", ENERGY_METRIC])
            .parse(SUMMARY)
            .unwrap();
        let keys: Vec<&str> = summary.metrics().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Run Time", "P_SOC", ENERGY_METRIC]);
    }

    #[test]
    fn test_no_energy_without_run_time() {
        let summary = PowerSummaryParser::new()
            .parse("Rail,Average\nP_MCP,2.0\n")
            .unwrap();
        assert_eq!(summary.soc_power(), Some(2.0));
        assert_eq!(summary.get(ENERGY_METRIC), None);
        assert_eq!(summary.get(SOC_MEMORY_METRIC), None);
    }

    #[test]
    fn test_to_mapping() {
        let mapping = PowerSummaryParser::new()
            .parse("Rail,Average\nP_SOC,1.25\n")
            .unwrap()
            .to_mapping();
        assert_eq!(mapping.get("P_SOC", POWER_TABLE_KEY), Some(&MetricValue::Float(1.25)));
    }

    #[test]
    fn test_custom_column_and_delimiter() {
        let summary = PowerSummaryParser::new()
            .with_value_column("Mean")
            .with_delimiter(';')
            .parse("Rail;Mean\nP_VCCGT;0.33\n")
            .unwrap();
        assert_eq!(summary.get("P_VCCGT"), Some(0.33));
    }
}
