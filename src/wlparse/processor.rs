//! Document processing API
//!
//! [`SectionParser`] runs the whole pipeline for one document:
//!
//! ```text
//! for target in catalog (in order):
//!     locate_section(lines, target.lookup)   miss  → debug!, skip
//!     tokenize_section(lines, header + 1)    empty → debug!, skip
//!     shape = TableShape::for_key(target.key)
//!     shape.extract(rows, target, context if shape.records_identity())
//!         Err → warn!, two_column::fallback(rows)
//! aggregate(tables) → ResultMapping
//! ```
//!
//! The only state shared between targets is the [`ParsingContext`], created
//! fresh for every document and handed only to shapes that record identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use wlparse::{SectionParser, TargetCatalog};
//!
//! let catalog = TargetCatalog::socwatch_defaults();
//! let parser = SectionParser::new(&catalog);
//! let document = parser.parse_file("run_000/summary.csv")?;
//! for (key, value) in &document.mapping {
//!     println!("{} = {}", key, value);
//! }
//! ```

use crate::wlparse::aggregation::{aggregate, ResultMapping};
use crate::wlparse::catalog::{TargetCatalog, TargetDescriptor};
use crate::wlparse::error::ParseError;
use crate::wlparse::lexing::{locate_section, split_lines, tokenize_section, DEFAULT_DELIMITER};
use crate::wlparse::shapes::{two_column, ExtractedTable, Extraction, TableShape};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Tunables for tokenizing a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub delimiter: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Identity values recorded by earlier targets of the same document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsingContext {
    identity: IndexMap<String, String>,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_identity(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.identity.insert(key.into(), value.into());
    }

    pub fn identity(&self) -> &IndexMap<String, String> {
        &self.identity
    }

    pub fn identity_value(&self, key: &str) -> Option<&str> {
        self.identity.get(key).map(String::as_str)
    }
}

/// Everything produced from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Per-target extraction results, in catalog order, non-empty only
    pub tables: Vec<ExtractedTable>,
    pub mapping: ResultMapping,
    pub identity: IndexMap<String, String>,
}

impl ParsedDocument {
    pub fn table(&self, key: &str) -> Option<&ExtractedTable> {
        self.tables.iter().find(|t| t.table_key == key)
    }
}

/// Parses documents against one target catalog.
///
/// Holds no per-document state; one parser can be reused for any number of
/// documents.
#[derive(Debug, Clone)]
pub struct SectionParser<'a> {
    catalog: &'a TargetCatalog,
    config: ParserConfig,
}

impl<'a> SectionParser<'a> {
    pub fn new(catalog: &'a TargetCatalog) -> Self {
        Self::with_config(catalog, ParserConfig::default())
    }

    pub fn with_config(catalog: &'a TargetCatalog, config: ParserConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &TargetCatalog {
        self.catalog
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract one target from already split lines.
    ///
    /// `None` when the section is missing or has no rows.
    pub fn extract_target(
        &self,
        lines: &[&str],
        target: &TargetDescriptor,
        context: &mut ParsingContext,
    ) -> Option<ExtractedTable> {
        let Some(header_line) = locate_section(lines, &target.lookup) else {
            debug!(target_key = %target.key, lookup = %target.lookup, "section not found");
            return None;
        };

        let rows = tokenize_section(lines, header_line + 1, self.config.delimiter);
        if rows.is_empty() {
            debug!(target_key = %target.key, line = header_line, "section has no rows");
            return None;
        }

        let shape = TableShape::for_key(&target.key);
        let shape_context = if shape.records_identity() {
            Some(&mut *context)
        } else {
            None
        };
        let (extraction, fallback) = match shape.extract(&rows, target, shape_context) {
            Ok(extraction) => (extraction, false),
            Err(err) => {
                warn!(
                    target_key = %target.key,
                    shape = %shape,
                    error = %err,
                    "extractor failed, using two-column fallback"
                );
                (Extraction::synthesized(two_column::fallback(&rows)), true)
            }
        };

        debug!(
            target_key = %target.key,
            shape = %shape,
            rows = rows.len(),
            entries = extraction.data.len(),
            "extracted table"
        );

        Some(ExtractedTable {
            table_key: target.key.clone(),
            descriptor: target.clone(),
            shape,
            data: extraction.data,
            header: extraction.header,
            fallback,
        })
    }

    /// Run every catalog target over `source`, threading `context` through.
    pub fn extract_tables(&self, source: &str, context: &mut ParsingContext) -> Vec<ExtractedTable> {
        let lines = split_lines(source);
        self.catalog
            .iter()
            .filter_map(|target| self.extract_target(&lines, target, context))
            .collect()
    }

    /// Parse an in-memory document. Never fails: a document matching no
    /// target yields an empty mapping.
    pub fn parse(&self, source: &str) -> ParsedDocument {
        let mut context = ParsingContext::new();
        let tables = self.extract_tables(source, &mut context);
        let mapping = aggregate(&tables);
        ParsedDocument {
            tables,
            mapping,
            identity: context.identity,
        }
    }

    /// Read and parse a file.
    ///
    /// Unreadable files and files with no content are the only hard failures.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedDocument, ParseError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
        if source.trim_start_matches('\u{feff}').trim().is_empty() {
            return Err(ParseError::EmptyDocument(path.display().to_string()));
        }

        let document = self.parse(&source);
        info!(
            path = %path.display(),
            tables = document.tables.len(),
            metrics = document.mapping.len(),
            "parsed document"
        );
        Ok(document)
    }
}

/// Parse `source` against `catalog` with the default configuration.
pub fn parse_document(source: &str, catalog: &TargetCatalog) -> ResultMapping {
    SectionParser::new(catalog).parse(source).mapping
}
