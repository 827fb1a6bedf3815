//! Device-residency extractor for PCIe link-state tables
//!
//! ```text
//! Device,                          L0 (%), L1 (%)
//! Samsung NVMe SSD (NVM) 0:1.0,    3.2,    96.8
//! ```
//!
//! With devices `["NVM"]` this yields `L0 (%)_NVM → 3.2` and `L1 (%)_NVM → 96.8`.
//! A row is labelled by the first configured device name it contains; rows
//! matching none are skipped. Without configured devices the whole first cell
//! is the label.

use super::{ExtractError, TableData, TableShape};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::rounded_or_text;

fn device_label<'a>(cell: &'a str, devices: &'a [String]) -> Option<&'a str> {
    if devices.is_empty() {
        return Some(cell);
    }
    devices
        .iter()
        .map(String::as_str)
        .find(|device| cell.contains(device))
}

pub fn extract(rows: &[TokenizedRow], devices: &[String]) -> Result<TableData, ExtractError> {
    let header = rows.first().ok_or(ExtractError::MissingRows {
        shape: TableShape::DeviceResidency,
        needed: 1,
        found: 0,
    })?;
    if header.len() < 2 {
        return Err(ExtractError::ShortHeader {
            shape: TableShape::DeviceResidency,
            needed: 2,
            found: header.len(),
        });
    }

    let mut data = TableData::new();

    for row in &rows[1..] {
        let Some(device) = row.first().and_then(|cell| device_label(cell, devices)) else {
            continue;
        };
        for (column, state) in header.iter().enumerate().skip(1) {
            let Some(value) = row.get(column) else {
                break;
            };
            data.insert(format!("{}_{}", state, device), rounded_or_text(value));
        }
    }

    Ok(data)
}
