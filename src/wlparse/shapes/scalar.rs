//! Colon-scalar extractor: `Label: value` lines, value coerced to a number when it is one.

use super::TableData;
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::coerce_scalar;

pub fn extract(rows: &[TokenizedRow]) -> TableData {
    let mut data = TableData::new();

    for row in rows {
        let Some((raw_key, raw_value)) = row.first().and_then(|f| f.rsplit_once(':')) else {
            continue;
        };
        let key = raw_key.trim();
        if key.is_empty() {
            continue;
        }
        data.insert(key.to_string(), coerce_scalar(raw_value));
    }

    data
}
