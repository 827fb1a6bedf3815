//! Table shapes and extraction dispatch
//!
//! Every catalog key maps to exactly one [`TableShape`] through a static lookup
//! ([`TableShape::for_key`]); unknown keys get [`TableShape::TwoColumn`]. Each
//! shape owns one extractor in a submodule of this module.
//!
//! # Architecture
//!
//! ```text
//! table_key ─▶ TableShape::for_key ─▶ TableShape::extract(rows, target, context)
//!                                              │
//!                                   Ok(Extraction { data, header })
//!                                   Err(ExtractError) ─▶ caller falls back to
//!                                                        two_column::fallback
//! ```
//!
//! Extractors never fail on short rows or unparseable cells: short rows are
//! skipped and cells are kept as text. An [`ExtractError`] means the table as a
//! whole does not have the structure the shape needs (no data row under a
//! header, a header too narrow to read from).
//!
//! # Header policy
//!
//! Some shapes already start their output with a pair that names the table
//! (a copied header row, a synthesized summary key, a bucket unit label). The
//! aggregator must not add another one. Rather than guessing from the keys,
//! every extraction carries a [`HeaderPolicy`] decided by the code that
//! produced it.

pub mod bandwidth;
pub mod bucketed;
pub mod device;
pub mod frequency;
pub mod identity;
pub mod ranked;
pub mod residency;
pub mod scalar;
pub mod temperature;
pub mod two_column;

use crate::wlparse::bucketing::parse_bucket_specs;
use crate::wlparse::catalog::TargetDescriptor;
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::processor::ParsingContext;
use crate::wlparse::value::MetricValue;
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// Ordered field → value pairs produced by one extractor run.
pub type TableData = IndexMap<String, MetricValue>;

/// Structural categories of summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableShape {
    /// `Name/Field=value` lines (model and identity tables)
    EqualsList,
    /// `Label: value` lines (single counters)
    ColonScalar,
    /// Header of `(%)` columns read against the first data row
    Residency,
    /// Process ranking with rank, name (PID) and CPU share
    RankedList,
    /// Per-core average frequency
    FrequencyAverage,
    /// Bandwidth summary, only the total row matters
    Bandwidth,
    /// Min/Max/Avg temperature table
    Temperature,
    /// Label and value in the first two columns
    TwoColumn,
    /// Label in the first column, value in the third
    PchTwoColumn,
    /// Frequency residency folded into configured buckets
    BucketedFrequency,
    /// Per-device link residency (PCIe)
    DeviceResidency,
}

impl TableShape {
    /// Shape registered for a catalog key.
    pub fn for_key(table_key: &str) -> Self {
        match table_key {
            "CPU_model" => TableShape::EqualsList,
            "DC_count" => TableShape::ColonScalar,
            "Core_Cstate" | "ACPI_Cstate" => TableShape::Residency,
            "OS_wakeups" => TableShape::RankedList,
            "CPU_Pavr" => TableShape::FrequencyAverage,
            "CPU_temp" | "SoC_temp" => TableShape::Temperature,
            "PCH_SLP50" | "PMC+SLP_S0" => TableShape::PchTwoColumn,
            "NPU_Pstate" | "NoC_Pstate" | "iGFX_Pstate" | "MEMSS_Pstate" => {
                TableShape::BucketedFrequency
            }
            key if key.ends_with("_BW") => TableShape::Bandwidth,
            key if key.starts_with("PCIe_") => TableShape::DeviceResidency,
            _ => TableShape::TwoColumn,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableShape::EqualsList => "equals-list",
            TableShape::ColonScalar => "colon-scalar",
            TableShape::Residency => "residency",
            TableShape::RankedList => "ranked-list",
            TableShape::FrequencyAverage => "frequency-average",
            TableShape::Bandwidth => "bandwidth",
            TableShape::Temperature => "temperature",
            TableShape::TwoColumn => "two-column",
            TableShape::PchTwoColumn => "pch-two-column",
            TableShape::BucketedFrequency => "bucketed-frequency",
            TableShape::DeviceResidency => "device-residency",
        }
    }

    /// Whether the extractor records identity values in the parsing context.
    pub fn records_identity(&self) -> bool {
        matches!(self, TableShape::EqualsList)
    }

    /// Run this shape's extractor.
    ///
    /// Only shapes that [record identity](Self::records_identity) use the context.
    pub fn extract(
        &self,
        rows: &[TokenizedRow],
        target: &TargetDescriptor,
        context: Option<&mut ParsingContext>,
    ) -> Result<Extraction, ExtractError> {
        let table_key = target.key.as_str();
        let extraction = match self {
            TableShape::EqualsList => Extraction::self_describing(identity::extract(rows, context)),
            TableShape::ColonScalar => Extraction::self_describing(scalar::extract(rows)),
            TableShape::Residency => Extraction::self_describing(residency::extract(rows)?),
            TableShape::RankedList => Extraction::self_describing(ranked::extract(rows)?),
            TableShape::FrequencyAverage => {
                Extraction::self_describing(frequency::extract(rows)?)
            }
            TableShape::Bandwidth => {
                Extraction::self_describing(bandwidth::extract(rows, table_key))
            }
            TableShape::Temperature => {
                Extraction::self_describing(temperature::extract(rows, table_key)?)
            }
            TableShape::TwoColumn => Extraction::synthesized(two_column::extract(
                rows,
                two_column::Columns::default().with_pstate_truncation(table_key),
            )),
            TableShape::PchTwoColumn => Extraction::synthesized(two_column::extract(
                rows,
                two_column::Columns::new(0, 2).with_pstate_truncation(table_key),
            )),
            TableShape::BucketedFrequency => {
                let specs = target
                    .bucket_specs()
                    .map(parse_bucket_specs)
                    .unwrap_or_default();
                if specs.is_empty() {
                    Extraction::synthesized(two_column::extract(rows, two_column::Columns::default()))
                } else {
                    Extraction::self_describing(bucketed::extract(rows, table_key, &specs))
                }
            }
            TableShape::DeviceResidency => {
                Extraction::self_describing(device::extract(rows, &target.devices)?)
            }
        };
        Ok(extraction)
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the aggregator should put a synthesized header pair before a table's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// The data already opens with a descriptive pair
    SelfDescribing,
    /// Prepend the label pair from the header table
    Synthesize,
}

/// Output of one successful extractor run.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub data: TableData,
    pub header: HeaderPolicy,
}

impl Extraction {
    pub fn self_describing(data: TableData) -> Self {
        Self {
            data,
            header: HeaderPolicy::SelfDescribing,
        }
    }

    pub fn synthesized(data: TableData) -> Self {
        Self {
            data,
            header: HeaderPolicy::Synthesize,
        }
    }
}

/// A table lacks the structure its shape requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{shape} table needs at least {needed} rows, found {found}")]
    MissingRows {
        shape: TableShape,
        needed: usize,
        found: usize,
    },
    #[error("{shape} header has {found} fields, needs at least {needed}")]
    ShortHeader {
        shape: TableShape,
        needed: usize,
        found: usize,
    },
}

/// One target's extracted data, ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub table_key: String,
    pub descriptor: TargetDescriptor,
    pub shape: TableShape,
    pub data: TableData,
    pub header: HeaderPolicy,
    /// Set when the shape's extractor failed and the two-column fallback produced `data`
    pub fallback: bool,
}

/// Text after the last `/`, or the whole text when there is none.
pub(crate) fn after_last_slash(text: &str) -> &str {
    text.rsplit('/').next().unwrap_or(text).trim()
}
