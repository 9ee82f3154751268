// src/services/label_table.rs
// DOCUMENTATION: Class index -> category lookup
// PURPOSE: Load the label file once at startup and pick descriptive sentences

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One class of the classifier
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelEntry {
    pub category: String,
    #[serde(rename = "sentence")]
    pub sentences: Vec<String>,
}

/// Static mapping from model output index to category and candidate sentences
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: BTreeMap<usize, LabelEntry>,
}

impl LabelTable {
    /// Parse the JSON label file: `{"0": {"category": .., "sentence": [..]}, ..}`
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let raw = raw.trim_start_matches('\u{feff}');
        let parsed: HashMap<String, LabelEntry> =
            serde_json::from_str(raw).context("Label file is not a JSON object of label entries")?;

        let mut entries = BTreeMap::new();
        for (key, entry) in parsed {
            let index: usize = key
                .trim()
                .parse()
                .with_context(|| format!("Label key '{}' is not a class index", key))?;
            if entry.sentences.is_empty() {
                bail!("Label {} ({}) has no sentences", index, entry.category);
            }
            entries.insert(index, entry);
        }

        if entries.is_empty() {
            bail!("Label file has no entries");
        }

        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read label file {}", path.display()))?;
        let table = Self::from_json_str(&raw)?;
        log::info!("Loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LabelEntry> {
        self.entries.get(&index)
    }

    /// Category name and a uniformly chosen sentence for a class index
    pub fn describe<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Option<(&str, &str)> {
        let entry = self.get(index)?;
        let sentence = entry.sentences.choose(rng)?;
        Some((entry.category.as_str(), sentence.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LABELS: &str = r#"{
        "0": {"category": "beach", "sentence": ["Waves and sand.", "Sunset over the sea."]},
        "1": {"category": "palace", "sentence": ["Royal halls."]},
        "10": {"category": "tower", "sentence": ["City lights from above."]}
    }"#;

    #[test]
    fn test_parse_labels() {
        let table = LabelTable::from_json_str(LABELS).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1).unwrap().category, "palace");
        assert_eq!(table.get(10).unwrap().category, "tower");
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_byte_order_mark_is_accepted() {
        let with_bom = format!("\u{feff}{}", LABELS);
        assert_eq!(LabelTable::from_json_str(&with_bom).unwrap().len(), 3);
    }

    #[test]
    fn test_describe_picks_a_configured_sentence() {
        let table = LabelTable::from_json_str(LABELS).unwrap();
        let candidates = &table.get(0).unwrap().sentences;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let (category, sentence) = table.describe(0, &mut rng).unwrap();
            assert_eq!(category, "beach");
            assert!(candidates.iter().any(|c| c == sentence));
        }
        assert!(table.describe(5, &mut rng).is_none());
    }

    #[test]
    fn test_rejects_bad_files() {
        assert!(LabelTable::from_json_str("[]").is_err());
        assert!(LabelTable::from_json_str("{}").is_err());
        assert!(LabelTable::from_json_str(r#"{"x": {"category": "a", "sentence": ["b"]}}"#).is_err());
        assert!(LabelTable::from_json_str(r#"{"0": {"category": "a", "sentence": []}}"#).is_err());
    }
}
