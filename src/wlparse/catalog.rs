//! Target catalog: which tables to look for, and how to find them
//!
//! A catalog is an ordered list of [`TargetDescriptor`]s. Its order is the order
//! of the final result, so every constructor here preserves it verbatim.
//!
//! Catalogs come from three places:
//! - built in code (`TargetCatalog::new`)
//! - the built-in defaults (`socwatch_defaults`, `pcie_defaults`)
//! - a JSON or YAML configuration document (`from_json_str`, `from_yaml_str`, `load`)

pub mod defaults;

use crate::wlparse::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One configured table to extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Unique catalog identifier, also the suffix of every composite key
    pub key: String,
    /// Text searched for verbatim to find the section header
    pub lookup: String,
    /// Optional frequency buckets ("400" or "401-1049")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    /// Device name fragments for device-residency tables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<String>,
}

impl TargetDescriptor {
    pub fn new(key: impl Into<String>, lookup: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            lookup: lookup.into(),
            buckets: None,
            description: String::new(),
            devices: Vec::new(),
        }
    }

    pub fn with_buckets<I, S>(mut self, buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buckets = Some(buckets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_devices<I, S>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// Configured buckets, treating an empty list like no list.
    pub fn bucket_specs(&self) -> Option<&[String]> {
        self.buckets.as_deref().filter(|b| !b.is_empty())
    }
}

/// Which target list of a configuration document to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSection {
    Socwatch,
    Pcie,
    /// Socwatch targets followed by PCIe targets
    All,
}

impl CatalogSection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "socwatch" => Some(CatalogSection::Socwatch),
            "pcie" => Some(CatalogSection::Pcie),
            "all" => Some(CatalogSection::All),
            _ => None,
        }
    }
}

/// Shapes a configuration document may take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<TargetDescriptor>),
    Sections {
        #[serde(default)]
        socwatch_targets: Vec<TargetDescriptor>,
        #[serde(default)]
        pcie_targets: Vec<TargetDescriptor>,
    },
}

impl CatalogDocument {
    fn into_targets(self, section: CatalogSection) -> Vec<TargetDescriptor> {
        match self {
            CatalogDocument::List(targets) => targets,
            CatalogDocument::Sections {
                socwatch_targets,
                pcie_targets,
            } => match section {
                CatalogSection::Socwatch => socwatch_targets,
                CatalogSection::Pcie => pcie_targets,
                CatalogSection::All => socwatch_targets.into_iter().chain(pcie_targets).collect(),
            },
        }
    }
}

/// Ordered, validated list of targets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TargetCatalog {
    targets: Vec<TargetDescriptor>,
}

impl TargetCatalog {
    /// Build a catalog, rejecting empty, duplicate or whitespace-bearing keys
    /// and empty lookups.
    ///
    /// Keys never contain whitespace so a flattened composite key splits back
    /// into its field and table at the last separator.
    pub fn new(targets: Vec<TargetDescriptor>) -> Result<Self, ParseError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if target.key.trim().is_empty() {
                return Err(ParseError::Catalog(format!(
                    "target with lookup '{}' has an empty key",
                    target.lookup
                )));
            }
            if target.key.chars().any(char::is_whitespace) {
                return Err(ParseError::Catalog(format!(
                    "target key '{}' contains whitespace",
                    target.key
                )));
            }
            if target.lookup.is_empty() {
                return Err(ParseError::Catalog(format!(
                    "target '{}' has an empty lookup",
                    target.key
                )));
            }
            if !seen.insert(target.key.as_str()) {
                return Err(ParseError::Catalog(format!(
                    "duplicate target key '{}'",
                    target.key
                )));
            }
        }
        Ok(Self { targets })
    }

    /// The SoC telemetry targets of the original report layout.
    pub fn socwatch_defaults() -> Self {
        Self {
            targets: defaults::socwatch_targets(),
        }
    }

    /// The PCIe link-state targets, watching NVMe devices.
    pub fn pcie_defaults() -> Self {
        Self {
            targets: defaults::pcie_targets(),
        }
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(source: &str, section: CatalogSection) -> Result<Self, ParseError> {
        let document: CatalogDocument = serde_json::from_str(strip_bom(source))?;
        Self::new(document.into_targets(section))
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(source: &str, section: CatalogSection) -> Result<Self, ParseError> {
        let document: CatalogDocument = serde_yaml::from_str(strip_bom(source))?;
        Self::new(document.into_targets(section))
    }

    /// Load a configuration file; `.yml`/`.yaml` are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>, section: CatalogSection) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
            .unwrap_or(false);
        if is_yaml {
            Self::from_yaml_str(&source, section)
        } else {
            Self::from_json_str(&source, section)
        }
    }

    pub fn targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    pub fn get(&self, key: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetDescriptor> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a TargetCatalog {
    type Item = &'a TargetDescriptor;
    type IntoIter = std::slice::Iter<'a, TargetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

fn strip_bom(source: &str) -> &str {
    source.trim_start_matches('\u{feff}')
}
