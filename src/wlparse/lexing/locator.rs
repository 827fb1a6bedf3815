//! Section Locator
//!
//! Finds the header line of a target's section by literal substring match.
//! Every lookup restarts from the first line: a section header may sit after
//! another target's data block, so no position is carried between targets.

/// Split a document into lines, dropping a leading byte-order mark.
///
/// Both `\n` and `\r\n` endings are accepted.
pub fn split_lines(source: &str) -> Vec<&str> {
    source.trim_start_matches('\u{feff}').lines().collect()
}

/// Zero-based index of the first line containing `lookup` verbatim.
///
/// Matching is case-sensitive and not a pattern match. An empty lookup never
/// matches.
pub fn locate_section(lines: &[&str], lookup: &str) -> Option<usize> {
    if lookup.is_empty() {
        return None;
    }
    lines.iter().position(|line| line.contains(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Summary report\n\
        Core C-State Summary: Residency (Percentage and Time)\n\
        C-State,Residency (%)\n\
        \n\
        Temperature Metrics Summary - Sampled: Min/Max/Avg\n\
        Component Name,Min,Max,Avg,Time-weighted Avg\n";

    #[test]
    fn test_locate_first_match() {
        let lines = split_lines(REPORT);
        assert_eq!(
            locate_section(&lines, "Core C-State Summary: Residency"),
            Some(1)
        );
        assert_eq!(locate_section(&lines, "Temperature Metrics"), Some(4));
    }

    #[test]
    fn test_locate_restarts_from_top() {
        let lines = split_lines(REPORT);
        // A later section first, then an earlier one: both found
        assert_eq!(locate_section(&lines, "Temperature Metrics"), Some(4));
        assert_eq!(locate_section(&lines, "Summary report"), Some(0));
    }

    #[test]
    fn test_locate_is_case_sensitive() {
        let lines = split_lines(REPORT);
        assert_eq!(locate_section(&lines, "core c-state summary"), None);
    }

    #[test]
    fn test_locate_is_literal() {
        let lines = split_lines("Rate (MB/s)\nRate .MB.s.\n");
        assert_eq!(locate_section(&lines, ".MB.s."), Some(1));
        assert_eq!(locate_section(&lines, "(MB/s)"), Some(0));
    }

    #[test]
    fn test_locate_missing_and_empty_lookup() {
        let lines = split_lines(REPORT);
        assert_eq!(locate_section(&lines, "PCIe LPM Summary"), None);
        assert_eq!(locate_section(&lines, ""), None);
    }

    #[test]
    fn test_split_lines_strips_bom_and_crlf() {
        let lines = split_lines("\u{feff}CPU native model\r\nCPU/Native Model=0xAA\r\n");
        assert_eq!(lines, vec!["CPU native model", "CPU/Native Model=0xAA"]);
    }
}
