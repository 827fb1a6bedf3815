//! # wlparse
//!
//! Extracts metrics from the human-readable summary reports written by hardware
//! profiling tools (SoC telemetry summaries, PCIe link-state tables, power rail
//! summaries) and flattens them into one ordered key-value mapping per document.
//!
//! File Layout
//!
//! The crate follows the stages a document goes through:
//! src/wlparse
//!   ├── catalog       Targets to extract, built-in defaults, config loading
//!   ├── lexing        Section lookup and row tokenization
//!   ├── shapes        Table shapes and their extractors
//!   ├── bucketing     Frequency bucket accumulation
//!   ├── aggregation   Composite keys and the final result mapping
//!   ├── processor     The per-document pipeline tying the stages together
//!   ├── power         Power rail summaries (plain CSV, no sections)
//!   └── formats       Text output of result mappings
//!
//! For test inputs, see the [testing module](wlparse::testing). Tests should use the
//! verified sample documents rather than ad-hoc report excerpts wherever a sample exists.

pub mod wlparse;

pub use wlparse::aggregation::{CompositeKey, ResultMapping, COMPOSITE_KEY_SEPARATOR};
pub use wlparse::catalog::{TargetCatalog, TargetDescriptor};
pub use wlparse::error::ParseError;
pub use wlparse::processor::{parse_document, ParsedDocument, ParserConfig, SectionParser};
pub use wlparse::value::MetricValue;
