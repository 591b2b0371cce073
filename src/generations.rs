//! Generation table - label to catalog index range

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Built-in table used when the install does not ship `generations.json`.
pub const STANDARD_GENERATIONS: &[(&str, usize, usize)] = &[
    ("1", 1, 151),
    ("2", 152, 251),
    ("3", 252, 386),
    ("4", 387, 493),
    ("5", 494, 649),
    ("6", 650, 721),
    ("7", 722, 809),
    ("8", 810, 898),
];

/// Inclusive, 1-based bounds into the ordered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRange {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl GenerationRange {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTable {
    ranges: Vec<GenerationRange>,
}

impl GenerationTable {
    pub fn new(ranges: Vec<GenerationRange>) -> Self {
        Self { ranges }
    }

    pub fn standard() -> Self {
        Self::new(
            STANDARD_GENERATIONS
                .iter()
                .map(|&(label, start, end)| GenerationRange {
                    label: label.to_string(),
                    start,
                    end,
                })
                .collect(),
        )
    }

    /// Read an array of `{label, start, end}` records.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let ranges: Vec<GenerationRange> =
            serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;
        Ok(Self::new(ranges))
    }

    pub fn get(&self, label: &str) -> Option<&GenerationRange> {
        self.ranges.iter().find(|r| r.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn ranges(&self) -> &[GenerationRange] {
        &self.ranges
    }

    /// Selector spanning every generation, e.g. `"1-8"`.
    pub fn full_selector(&self) -> Option<String> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        if first.label == last.label {
            Some(first.label.clone())
        } else {
            Some(format!("{}-{}", first.label, last.label))
        }
    }

    /// Ranges must tile `1..=catalog_len` in ascending order.
    pub(crate) fn validate(&self, catalog_len: usize) -> Result<(), String> {
        if self.ranges.is_empty() {
            return Err("generation table is empty".to_string());
        }

        let mut seen = HashSet::new();
        let mut next = 1;
        for range in &self.ranges {
            if !seen.insert(range.label.as_str()) {
                return Err(format!("generation '{}' is listed twice", range.label));
            }
            if range.start != next {
                return Err(format!(
                    "generation '{}' starts at {}, expected {}",
                    range.label, range.start, next
                ));
            }
            if range.end < range.start {
                return Err(format!(
                    "generation '{}' ends at {} before its start {}",
                    range.label, range.end, range.start
                ));
            }
            next = range.end + 1;
        }

        let covered = next - 1;
        if covered != catalog_len {
            return Err(format!(
                "generations cover {} entries but the catalog has {}",
                covered, catalog_len
            ));
        }
        Ok(())
    }
}

impl Default for GenerationTable {
    fn default() -> Self {
        Self::standard()
    }
}
