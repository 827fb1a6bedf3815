//! Ranked-list extractor for the process wakeup table
//!
//! ```text
//! Rank, Process Name (PID),        CPU % (Platform) Total
//! 0,    Platform Total (all),      88.12
//! 1,    chrome.exe (10432),        12.5
//! 2,    svchost.exe (904),         3.25
//! ```
//!
//! becomes
//!
//! ```text
//! OS_wakeups → "Process (CPU % (Platform))"
//! Overall    → "0.Platform (88.12)"
//! 1          → "1.chrome.exe (12.5)"
//! 2          → "2.svchost.exe (3.25)"
//! ```

use super::{ExtractError, TableData, TableShape};
use crate::wlparse::lexing::TokenizedRow;
use crate::wlparse::value::MetricValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Key of the summary pair synthesized from the header row.
pub const SUMMARY_KEY: &str = "OS_wakeups";

/// Key of the platform-wide row.
pub const OVERALL_KEY: &str = "Overall";

static PID_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\s*\d+\s*\)\s*$").expect("pid suffix pattern is valid"));

fn leading_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

fn strip_pid(name: &str) -> &str {
    match PID_SUFFIX_REGEX.find(name) {
        Some(m) => name[..m.start()].trim(),
        None => name.trim(),
    }
}

fn entry(rank: &str, name: &str, share: Option<&str>) -> String {
    match share {
        Some(share) => format!("{}.{} ({})", rank, name, share),
        None => format!("{}.{}", rank, name),
    }
}

pub fn extract(rows: &[TokenizedRow]) -> Result<TableData, ExtractError> {
    let header = rows.first().ok_or(ExtractError::MissingRows {
        shape: TableShape::RankedList,
        needed: 1,
        found: 0,
    })?;
    if header.len() < 3 {
        return Err(ExtractError::ShortHeader {
            shape: TableShape::RankedList,
            needed: 3,
            found: header.len(),
        });
    }

    let mut data = TableData::new();

    let name = leading_token(&header[1]);
    let mut unit: Vec<&str> = header[2].split_whitespace().collect();
    unit.pop();
    let summary = if unit.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, unit.join(" "))
    };
    data.insert(SUMMARY_KEY.to_string(), MetricValue::from(summary));

    if let Some(overall) = rows.get(1).filter(|row| row.len() >= 2) {
        let value = entry(&overall[0], leading_token(&overall[1]), overall.get(2));
        data.insert(OVERALL_KEY.to_string(), MetricValue::from(value));
    }

    for (index, row) in rows.iter().enumerate().skip(2) {
        if row.len() < 3 {
            continue;
        }
        let rank = &row[0];
        let key = if rank.trim().is_empty() {
            format!("Entry_{}", index)
        } else {
            rank.to_string()
        };
        let value = entry(rank, strip_pid(&row[1]), Some(&row[2]));
        data.insert(key, MetricValue::from(value));
    }

    Ok(data)
}
