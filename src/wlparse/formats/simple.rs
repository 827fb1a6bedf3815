//! Tab-separated output, one `table<TAB>field<TAB>value` line per entry.

use super::registry::{FormatError, Formatter};
use crate::wlparse::aggregation::ResultMapping;

pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn name(&self) -> &str {
        "simple"
    }

    fn serialize(&self, mapping: &ResultMapping) -> Result<String, FormatError> {
        let mut output = String::new();
        for (key, value) in mapping {
            output.push_str(&format!("{}\t{}\t{}\n", key.table(), key.field(), value));
        }
        Ok(output)
    }

    fn description(&self) -> &str {
        "Tab-separated table, field and value lines"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wlparse::aggregation::CompositeKey;
    use crate::wlparse::value::MetricValue;

    #[test]
    fn test_simple_lines() {
        let mut mapping = ResultMapping::new();
        mapping.insert(CompositeKey::new("C0 (%)", "Core_Cstate"), MetricValue::Float(45.0));
        mapping.insert(CompositeKey::new("State", "Core_Cstate"), MetricValue::from("A"));

        let output = SimpleFormatter.serialize(&mapping).unwrap();
        assert_eq!(output, "Core_Cstate\tC0 (%)\t45.0\nCore_Cstate\tState\tA\n");
    }
}
