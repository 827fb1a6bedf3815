//! Aggregator: per-table data → one ordered result mapping
//!
//! Tables are merged in catalog order. Within a table, pairs keep the order the
//! extractor produced them in. Tables whose extraction asked for a synthesized
//! header get one leading pair from [`header_labels`] first.
//!
//! Keys are [`CompositeKey`]s internally. They become strings only at the
//! output boundary ([`CompositeKey::to_flat_string`], the `Serialize` impl of
//! [`ResultMapping`]), where field and table are joined by
//! [`COMPOSITE_KEY_SEPARATOR`].

use crate::wlparse::shapes::{ExtractedTable, HeaderPolicy};
use crate::wlparse::value::MetricValue;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Joins field name and table key in flat output keys.
pub const COMPOSITE_KEY_SEPARATOR: &str = "        ";

/// Value label used for tables missing from the header table.
pub const DEFAULT_VALUE_LABEL: &str = "Value";

// ============================================================================
// Composite keys
// ============================================================================

/// A field name paired with the key of the table it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    field: String,
    table: String,
}

impl CompositeKey {
    pub fn new(field: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            table: table.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// `"<field>" + separator + "<table>"`.
    pub fn to_flat_string(&self) -> String {
        format!("{}{}{}", self.field, COMPOSITE_KEY_SEPARATOR, self.table)
    }

    /// Split a flat key back into field and table.
    ///
    /// Splits at the last separator: table keys never contain it, field names
    /// occasionally carry wide padding.
    pub fn parse(flat: &str) -> Option<Self> {
        let (field, table) = flat.rsplit_once(COMPOSITE_KEY_SEPARATOR)?;
        if table.is_empty() {
            return None;
        }
        Some(Self::new(field, table))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, COMPOSITE_KEY_SEPARATOR, self.table)
    }
}

// ============================================================================
// Header labels
// ============================================================================

/// Column header and value label synthesized ahead of non-self-describing tables.
static HEADER_LABELS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("CPU_model", ("CPU_model", "CPU_model")),
            ("PCH_SLP50", ("PCH SLP-S0 States", "PCH Residency (%)")),
            ("S0ix_Substate", ("State", "Residency (%)")),
            ("PKG_Cstate", ("C-State", "Package Residency ()")),
            ("Core_Cstate", ("C-State", "CPU/Package_0/Core_0 Residency ()")),
            ("Core_Concurrency", ("# Active Cores", "Time Active (%)")),
            ("ACPI_Cstate", ("C-State", "CPU/Package_0/Core_0 Residency ()")),
            ("OS_wakeups", ("OS_wakeups", "Process Name (PID) (CPU % (Platform))")),
            ("CPU-iGPU", ("CPU/Package_0 Residency (%)", "CPU/Package_0 Residency (%)")),
            ("CPU_Pavr", ("CPU ID", "Average (MHz)")),
            ("CPU_Pstate", ("P-State", "Frequency (MHz)")),
            ("RC_Cstate", ("C-State", "iGPU/Graphics Residency ()")),
            ("CPU_temp", ("Component Name", "Time-weighted Avg (oC)")),
            ("SoC_temp", ("Component Name", "Time-weighted Avg (oC)")),
            ("NPU_Dstate", ("State", "Residency (%)")),
            ("PMC+SLP_S0", ("PCH IP Blocks", "Description")),
            ("Media_Cstate", ("C-State", "Residency ()")),
            ("NPU_Pstate", ("Frequency (MHz)", "NPU (%)")),
            ("MEMSS_Pstate", ("Frequency (MHz)", "MEMSS (%)")),
            ("NoC_Pstate", ("Frequency (MHz)", "NoC (%)")),
            ("iGFX_Pstate", ("Frequency (MHz)", "iGFX (%)")),
        ])
    });

/// Header pair for a table key; unknown keys get `(table_key, "Value")`.
pub fn header_labels(table_key: &str) -> (&str, &str) {
    match HEADER_LABELS.get(table_key) {
        Some(&(label, value)) => (label, value),
        None => (table_key, DEFAULT_VALUE_LABEL),
    }
}

// ============================================================================
// Result mapping
// ============================================================================

/// Ordered composite key → value mapping for one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultMapping {
    entries: IndexMap<CompositeKey, MetricValue>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. A repeated key keeps its first position and takes the new value.
    pub fn insert(&mut self, key: CompositeKey, value: MetricValue) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: &str, table: &str) -> Option<&MetricValue> {
        self.entries.get(&CompositeKey::new(field, table))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, CompositeKey, MetricValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CompositeKey> {
        self.entries.keys()
    }

    /// Table keys in output order, each once.
    pub fn tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = Vec::new();
        for key in self.entries.keys() {
            if !tables.contains(&key.table()) {
                tables.push(key.table());
            }
        }
        tables
    }

    /// The pairs of one table, in order, keyed by field name.
    pub fn table_entries<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a MetricValue)> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.table() == table)
            .map(|(key, value)| (key.field(), value))
    }

    /// The mapping with flat string keys.
    pub fn to_flat(&self) -> IndexMap<String, MetricValue> {
        self.entries
            .iter()
            .map(|(key, value)| (key.to_flat_string(), value.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResultMapping {
    type Item = (&'a CompositeKey, &'a MetricValue);
    type IntoIter = indexmap::map::Iter<'a, CompositeKey, MetricValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_flat_string(), value)?;
        }
        map.end()
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Merge extracted tables, in the given order, into one mapping.
///
/// Tables with no data contribute nothing, not even a header.
pub fn aggregate(tables: &[ExtractedTable]) -> ResultMapping {
    let mut mapping = ResultMapping::new();

    for table in tables {
        if table.data.is_empty() {
            continue;
        }
        let table_key = table.table_key.as_str();
        if table.header == HeaderPolicy::Synthesize {
            let (label, value) = header_labels(table_key);
            mapping.insert(CompositeKey::new(label, table_key), MetricValue::from(value));
        }
        for (field, value) in &table.data {
            mapping.insert(CompositeKey::new(field.as_str(), table_key), value.clone());
        }
    }

    mapping
}
