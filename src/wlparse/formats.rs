//! Output formats for result mappings
//!
//! - `json`: pretty-printed object of flat composite key → value, in mapping order
//! - `simple`: one `table<TAB>field<TAB>value` line per entry

pub mod json;
pub mod registry;
pub mod simple;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use simple::SimpleFormatter;
