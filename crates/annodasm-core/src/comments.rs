use crate::profile::Language;
use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use std::collections::BTreeMap;

/// One line of a comment table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    pub low: u16,
    /// Inclusive; equal to `low` for single-address entries.
    pub high: u16,
    pub language: Language,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRange {
    pub low: u16,
    pub high: u16,
    pub text: String,
}

impl CommentRange {
    pub fn contains(&self, address: u16) -> bool {
        (self.low..=self.high).contains(&address)
    }

    fn overlaps(&self, low: u16, high: u16) -> bool {
        self.low <= high && low <= self.high
    }
}

/// Address to text map for one profile and one language.
///
/// Exact entries are consulted before ranges, whatever the width of the
/// range. Ranges are tried in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTable {
    exact: BTreeMap<u16, String>,
    ranges: Vec<CommentRange>,
}

impl CommentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. A second exact entry for the same address is dropped
    /// (returns false) so the first one loaded keeps precedence.
    pub fn insert(&mut self, low: u16, high: u16, text: impl Into<String>) -> bool {
        let text = text.into();
        let (low, high) = (low.min(high), low.max(high));

        if low == high {
            if let Some(existing) = self.exact.get(&low) {
                if *existing != text {
                    log::warn!(
                        "Conflicting comments for ${:04X}: keeping '{}', dropping '{}'",
                        low,
                        existing,
                        text
                    );
                }
                return false;
            }
            self.exact.insert(low, text);
            return true;
        }

        if let Some(other) = self
            .ranges
            .iter()
            .find(|r| r.overlaps(low, high) && r.text != text)
        {
            log::warn!(
                "Comment range ${:04X}-${:04X} overlaps ${:04X}-${:04X} with different text",
                low,
                high,
                other.low,
                other.high
            );
        }
        self.ranges.push(CommentRange { low, high, text });
        true
    }

    pub fn get(&self, address: u16) -> Option<&str> {
        if let Some(text) = self.exact.get(&address) {
            return Some(text);
        }
        self.ranges
            .iter()
            .find(|r| r.contains(address))
            .map(|r| r.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[CommentRange] {
        &self.ranges
    }

    /// Pairs of ranges that overlap with different text.
    pub fn conflicting_ranges(&self) -> Vec<(&CommentRange, &CommentRange)> {
        let mut conflicts = Vec::new();
        for (i, a) in self.ranges.iter().enumerate() {
            for b in &self.ranges[i + 1..] {
                if a.overlaps(b.low, b.high) && a.text != b.text {
                    conflicts.push((a, b));
                }
            }
        }
        conflicts
    }
}

/// Parses comment table text.
///
/// Format, one entry per line:
///
/// ```text
/// ; lines starting with ';' are ignored
/// D020 en Border color
/// D800-DBFF it RAM colore
/// ```
pub fn parse_comments(content: &str) -> Result<Vec<CommentEntry>> {
    let re = Regex::new(r"^([0-9a-fA-F]{1,4})(?:-([0-9a-fA-F]{1,4}))?\s+([A-Za-z]{2})\s+(\S.*)$")
        .context("Invalid comment line pattern")?;

    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        let line_no = index + 1;
        let caps = re
            .captures(line)
            .ok_or_else(|| anyhow!("line {}: expected 'ADDR[-ADDR] LANG TEXT'", line_no))?;

        let low_str = caps.get(1).map_or("", |m| m.as_str());
        let low = u16::from_str_radix(low_str, 16)
            .with_context(|| format!("line {}: bad address '{}'", line_no, low_str))?;
        let high = match caps.get(2) {
            Some(m) => u16::from_str_radix(m.as_str(), 16)
                .with_context(|| format!("line {}: bad address '{}'", line_no, m.as_str()))?,
            None => low,
        };
        if high < low {
            bail!(
                "line {}: range end ${:04X} is below start ${:04X}",
                line_no,
                high,
                low
            );
        }

        let code = caps.get(3).map_or("", |m| m.as_str());
        let language = Language::from_code(code)
            .ok_or_else(|| anyhow!("line {}: unknown language '{}'", line_no, code))?;

        let text = caps.get(4).map_or("", |m| m.as_str()).trim().to_string();
        entries.push(CommentEntry {
            low,
            high,
            language,
            text,
        });
    }
    Ok(entries)
}

/// Groups entries into one table per language, preserving file order.
pub fn build_tables(entries: &[CommentEntry]) -> BTreeMap<Language, CommentTable> {
    let mut tables: BTreeMap<Language, CommentTable> = BTreeMap::new();
    for entry in entries {
        tables
            .entry(entry.language)
            .or_default()
            .insert(entry.low, entry.high, entry.text.clone());
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_beats_wider_range() {
        let mut table = CommentTable::new();
        table.insert(0xD000, 0xD3FF, "VIC-II registers");
        table.insert(0xD020, 0xD020, "Border color");
        assert_eq!(table.get(0xD020), Some("Border color"));
        assert_eq!(table.get(0xD021), Some("VIC-II registers"));
        assert_eq!(table.get(0xD400), None);
    }

    #[test]
    fn test_first_range_wins() {
        let mut table = CommentTable::new();
        table.insert(0x0100, 0x01FF, "CPU stack");
        table.insert(0x0180, 0x0280, "Something else");
        assert_eq!(table.get(0x0190), Some("CPU stack"));
        assert_eq!(table.get(0x0200), Some("Something else"));
        assert_eq!(table.conflicting_ranges().len(), 1);
    }

    #[test]
    fn test_duplicate_exact_keeps_first() {
        let mut table = CommentTable::new();
        assert!(table.insert(0xFFD2, 0xFFD2, "CHROUT"));
        assert!(!table.insert(0xFFD2, 0xFFD2, "BSOUT"));
        assert_eq!(table.get(0xFFD2), Some("CHROUT"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_comment_lines() {
        let content = "
; header
D020 en Border color
d020 it Colore del bordo
0100-01FF en CPU stack
";
        let entries = parse_comments(content).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            CommentEntry {
                low: 0xD020,
                high: 0xD020,
                language: Language::English,
                text: "Border color".to_string(),
            }
        );
        assert_eq!(entries[1].language, Language::Italian);
        assert_eq!((entries[2].low, entries[2].high), (0x0100, 0x01FF));
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_comments("D020 en ok\nnot a comment line").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_comments("D020 fr Couleur du bord").unwrap_err();
        assert!(err.to_string().contains("unknown language"));

        let err = parse_comments("0200-0100 en backwards").unwrap_err();
        assert!(err.to_string().contains("below start"));
    }

    #[test]
    fn test_build_tables_per_language() {
        let entries = parse_comments("D020 en Border color\nD020 it Colore del bordo").unwrap();
        let tables = build_tables(&entries);
        assert_eq!(tables[&Language::English].get(0xD020), Some("Border color"));
        assert_eq!(
            tables[&Language::Italian].get(0xD020),
            Some("Colore del bordo")
        );
    }
}
