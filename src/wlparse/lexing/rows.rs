//! Row Tokenizer
//!
//! Consumes the lines following a section header and produces one
//! [`TokenizedRow`] per data line.
//!
//! # Rules
//!
//! ```text
//! line (trimmed)             action
//! ─────────────────────────  ──────────────────────────────
//! ""                         stop, line not included
//! "-----" / "---,-----,--"   skip, keep going
//! anything else              split on delimiter, trim fields,
//!                            drop empty fields, keep if any left
//! ```

use std::fmt;
use std::ops::Index;

/// Field delimiter used by summary reports unless configured otherwise.
pub const DEFAULT_DELIMITER: char = ',';

/// One tokenized line: trimmed, quote-stripped, non-empty fields in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedRow {
    fields: Vec<String>,
}

impl TokenizedRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or `None` when the row is too short.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// First field; every stored row has at least one.
    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl Index<usize> for TokenizedRow {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl<S: Into<String>> FromIterator<S> for TokenizedRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TokenizedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.fields.join(" | "))
    }
}

/// True for rule lines: every delimited field is blank or a run of dashes
/// and spaces, with at least one dash somewhere.
pub fn is_separator_line(line: &str, delimiter: char) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .split(delimiter)
            .all(|field| field.chars().all(|c| c == '-' || c.is_whitespace()))
}

/// Trim whitespace, then one layer of surrounding double quotes, then whitespace again.
fn clean_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(unquoted) => unquoted.trim(),
        None => trimmed,
    }
}

/// Split one line into cleaned fields, dropping the ones that end up empty.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(clean_field)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split one line into cleaned fields, keeping empty ones so column positions hold.
pub fn split_positional(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(clean_field)
        .map(str::to_string)
        .collect()
}

/// Tokenize the section that starts at `start` (the line after its header).
///
/// Returns an empty vector when the section has no data, including when
/// `start` is past the end of the document.
pub fn tokenize_section(lines: &[&str], start: usize, delimiter: char) -> Vec<TokenizedRow> {
    let mut rows = Vec::new();

    for line in lines.iter().skip(start) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if is_separator_line(trimmed, delimiter) {
            continue;
        }
        let fields = split_fields(trimmed, delimiter);
        if !fields.is_empty() {
            rows.push(TokenizedRow::new(fields));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wlparse::lexing::split_lines;

    fn row(fields: &[&str]) -> TokenizedRow {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator_line("---", ','));
        assert!(is_separator_line("  ----- -----  ", ','));
        assert!(!is_separator_line("   ", ','));
        assert!(!is_separator_line("-1.5", ','));
        assert!(!is_separator_line("PC0,-", ','));
    }

    #[test]
    fn test_delimited_separator_detection() {
        assert!(is_separator_line("-------,-------------,---------", ','));
        assert!(is_separator_line("-----,,-----", ','));
        assert!(is_separator_line("-----;-----", ';'));
        assert!(!is_separator_line("-----;-----", ','));
        assert!(!is_separator_line(",,", ','));
    }

    #[test]
    fn test_tokenize_skips_delimited_separators() {
        let lines = split_lines(
            "Package C-States\nC-State,Residency (%)\n-------,-------------\nPC0,12.35\n\n",
        );
        let rows = tokenize_section(&lines, 1, ',');
        assert_eq!(
            rows,
            vec![row(&["C-State", "Residency (%)"]), row(&["PC0", "12.35"])]
        );
    }

    #[test]
    fn test_split_fields_trims_and_unquotes() {
        assert_eq!(
            split_fields(r#" "CPU/Package_0" , 12.5 ,, "" "#, ','),
            vec!["CPU/Package_0", "12.5"]
        );
    }

    #[test]
    fn test_split_fields_strips_one_quote_layer() {
        assert_eq!(split_fields(r#"""quoted"""#, ','), vec![r#""quoted""#]);
    }

    #[test]
    fn test_split_fields_keeps_unbalanced_quotes() {
        assert_eq!(
            split_fields(r#""open,close",""#, ','),
            vec![r#""open"#, r#"close""#, r#"""#]
        );
    }

    #[test]
    fn test_split_positional_keeps_gaps() {
        assert_eq!(
            split_positional("P_VCCGT,,0.42", ','),
            vec!["P_VCCGT", "", "0.42"]
        );
    }

    #[test]
    fn test_tokenize_stops_at_blank_and_skips_separators() {
        let lines = split_lines(
            "Header\n---\nState,C0 (%),C1 (%)\n------\nA,45.2,32.1\n\nNext section,1\n",
        );
        let rows = tokenize_section(&lines, 1, ',');
        assert_eq!(
            rows,
            vec![row(&["State", "C0 (%)", "C1 (%)"]), row(&["A", "45.2", "32.1"])]
        );
    }

    #[test]
    fn test_tokenize_empty_section() {
        let lines = split_lines("Header\n\nState,Residency\n");
        assert!(tokenize_section(&lines, 1, ',').is_empty());
    }

    #[test]
    fn test_tokenize_separator_then_blank() {
        let lines = split_lines("Header\n-----\n   \nA,1\n");
        assert!(tokenize_section(&lines, 1, ',').is_empty());
    }

    #[test]
    fn test_tokenize_past_end() {
        let lines = split_lines("Header");
        assert!(tokenize_section(&lines, 1, ',').is_empty());
    }

    #[test]
    fn test_tokenize_drops_rows_without_fields() {
        let lines = split_lines("Header\n, ,\"\"\nA,1\n");
        assert_eq!(tokenize_section(&lines, 1, ','), vec![row(&["A", "1"])]);
    }

    #[test]
    fn test_tokenize_custom_delimiter() {
        let lines = split_lines("Header\nState;Residency (%)\nC0;12.5\n");
        let rows = tokenize_section(&lines, 1, ';');
        assert_eq!(rows[1], row(&["C0", "12.5"]));
    }

    #[test]
    fn test_row_accessors() {
        let r = row(&["CPU/Package_0/Core_0", "2345.67"]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.first(), Some("CPU/Package_0/Core_0"));
        assert_eq!(r.get(2), None);
        assert_eq!(&r[1], "2345.67");
        assert_eq!(r.to_string(), "[CPU/Package_0/Core_0 | 2345.67]");
    }
}
