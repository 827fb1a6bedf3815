//! Verified sample documents for tests
//!
//! Report excerpts are easy to get subtly wrong (a missing blank line ends a
//! section early, a lookup string with one space too few never matches). Tests
//! should take their input from these samples, which are checked against the
//! default catalogs, instead of writing report text inline.
//!
//! ```rust,ignore
//! use wlparse::wlparse::testing::SampleDocuments;
//! use wlparse::{parse_document, TargetCatalog};
//!
//! let mapping = parse_document(
//!     SampleDocuments::socwatch_summary(),
//!     &TargetCatalog::socwatch_defaults(),
//! );
//! ```
//!
//! Available samples:
//! - `socwatch_summary.csv`: one table of every socwatch shape, plus an empty section
//! - `pcie_summary.csv`: the three PCIe targets, one of them unreadable as its shape
//! - `power_summary.csv`: power rails with a BOM, an unreadable value and a run time

const SOCWATCH_SUMMARY: &str = include_str!("../../samples/socwatch_summary.csv");
const PCIE_SUMMARY: &str = include_str!("../../samples/pcie_summary.csv");
const POWER_SUMMARY: &str = include_str!("../../samples/power_summary.csv");

const SAMPLES: [(&str, &str); 3] = [
    ("socwatch_summary.csv", SOCWATCH_SUMMARY),
    ("pcie_summary.csv", PCIE_SUMMARY),
    ("power_summary.csv", POWER_SUMMARY),
];

/// Access to the sample documents under `samples/`.
pub struct SampleDocuments;

impl SampleDocuments {
    pub fn socwatch_summary() -> &'static str {
        SOCWATCH_SUMMARY
    }

    pub fn pcie_summary() -> &'static str {
        PCIE_SUMMARY
    }

    pub fn power_summary() -> &'static str {
        POWER_SUMMARY
    }

    /// Sample by file name.
    pub fn get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, source)| *source)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SAMPLES.iter().map(|(name, _)| *name)
    }
}
