//! Section lookup and row tokenization
//!
//! The two front stages of the pipeline. Neither knows anything about table
//! shapes: the locator answers "where does this section start", the row
//! tokenizer turns the lines after it into field lists.

pub mod locator;
pub mod rows;

pub use locator::{locate_section, split_lines};
pub use rows::{
    is_separator_line, split_fields, split_positional, tokenize_section, TokenizedRow,
    DEFAULT_DELIMITER,
};
