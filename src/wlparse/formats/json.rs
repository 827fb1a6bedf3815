//! JSON output: the flat mapping as one pretty-printed object.

use super::registry::{FormatError, Formatter};
use crate::wlparse::aggregation::ResultMapping;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, mapping: &ResultMapping) -> Result<String, FormatError> {
        serde_json::to_string_pretty(mapping)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Flat JSON object of composite key to value"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wlparse::aggregation::CompositeKey;
    use crate::wlparse::value::MetricValue;

    #[test]
    fn test_json_keeps_order() {
        let mut mapping = ResultMapping::new();
        mapping.insert(CompositeKey::new("Z", "B_BW"), MetricValue::Int(1));
        mapping.insert(CompositeKey::new("A", "A_BW"), MetricValue::from("x"));

        let output = JsonFormatter.serialize(&mapping).unwrap();
        assert!(output.find("B_BW").unwrap() < output.find("A_BW").unwrap());

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["Z        B_BW"], serde_json::json!(1));
        assert_eq!(parsed["A        A_BW"], serde_json::json!("x"));
    }

    #[test]
    fn test_empty_mapping() {
        let output = JsonFormatter.serialize(&ResultMapping::new()).unwrap();
        assert_eq!(output, "{}");
    }
}
