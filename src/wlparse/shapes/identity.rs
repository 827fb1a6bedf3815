//! Equals-list extractor
//!
//! Model and identity tables write one `Path/Name=value` entry per line. The
//! key is the text after the last `/` and the value is kept verbatim. When a
//! parsing context is given, every pair is recorded there for later targets.

use super::{after_last_slash, TableData};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::processor::ParsingContext;
use crate::wlparse::value::MetricValue;

pub fn extract(rows: &[TokenizedRow], mut context: Option<&mut ParsingContext>) -> TableData {
    let mut data = TableData::new();

    for row in rows {
        let Some((raw_key, raw_value)) = row.first().and_then(|f| f.split_once('=')) else {
            continue;
        };
        let key = after_last_slash(raw_key);
        if key.is_empty() {
            continue;
        }
        let value = raw_value.trim();
        if let Some(context) = context.as_deref_mut() {
            context.record_identity(key, value);
        }
        data.insert(key.to_string(), MetricValue::from(value));
    }

    data
}
