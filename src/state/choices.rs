//! Editable list of choice rows

use super::draft::Selection;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of rows the editor allows
pub const MAX_CHOICES: usize = 50;

/// Rows longer than this get an advisory warning
pub const LONG_CHOICE_CHARS: usize = 40;

/// Ordered raw choice rows, one per visible row. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChoiceList(Vec<String>);

impl Default for ChoiceList {
    fn default() -> Self {
        Self(vec![String::new()])
    }
}

impl<'de> Deserialize<'de> for ChoiceList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        // Rows are kept so nothing typed is lost; validation rejects the submit
        if rows.len() > MAX_CHOICES {
            tracing::warn!(
                "Restored {} choice rows, above the limit of {}",
                rows.len(),
                MAX_CHOICES
            );
        }
        Ok(Self::from_rows(rows))
    }
}

/// Live, advisory feedback for one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFlags {
    pub duplicate: bool,
    pub too_long: bool,
    pub blank_selected: bool,
}

impl RowFlags {
    pub fn any(&self) -> bool {
        self.duplicate || self.too_long || self.blank_selected
    }
}

impl ChoiceList {
    /// Build from raw rows; an empty input becomes a single blank row
    pub fn from_rows(rows: Vec<String>) -> Self {
        if rows.is_empty() {
            Self::default()
        } else {
            Self(rows)
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_CHOICES
    }

    /// Append a blank row. Returns false when the list is full.
    pub fn insert_blank(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.0.push(String::new());
        true
    }

    /// Replace a row verbatim
    pub fn set_at(&mut self, index: usize, value: String) -> bool {
        match self.0.get_mut(index) {
            Some(row) if *row != value => {
                *row = value;
                true
            }
            _ => false,
        }
    }

    /// Remove a row unless it is the last one
    pub fn remove_at(&mut self, index: usize) -> bool {
        if self.0.len() <= 1 || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }

    /// Every row trimmed, blanks kept in place
    pub fn trimmed(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.trim()).collect()
    }

    /// Trimmed, non-empty rows in order
    pub fn valid_choices(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// True when `index` names a row whose trimmed value is non-empty
    pub fn is_filled(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|c| !c.trim().is_empty())
    }

    /// Another row carries the same non-empty trimmed value
    pub fn is_duplicate(&self, index: usize) -> bool {
        let Some(value) = self.0.get(index).map(|c| c.trim()) else {
            return false;
        };
        if value.is_empty() {
            return false;
        }
        self.0
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.trim() == value)
    }

    pub fn is_too_long(&self, index: usize) -> bool {
        self.0
            .get(index)
            .is_some_and(|c| c.chars().count() > LONG_CHOICE_CHARS)
    }

    pub fn row_flags(&self, index: usize, selection: &Selection) -> RowFlags {
        RowFlags {
            duplicate: self.is_duplicate(index),
            too_long: self.is_too_long(index),
            blank_selected: selection.contains(index) && !self.is_filled(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(rows: &[&str]) -> ChoiceList {
        ChoiceList::from_rows(rows.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_default_is_one_blank_row() {
        assert_eq!(ChoiceList::default().rows(), &[String::new()]);
    }

    #[test]
    fn test_insert_blank_appends() {
        let mut choices = list(&["a"]);
        assert!(choices.insert_blank());
        assert_eq!(choices.rows(), &["a".to_string(), String::new()]);
    }

    #[test]
    fn test_insert_blank_stops_at_max() {
        let mut choices = ChoiceList::from_rows(vec![String::new(); MAX_CHOICES]);
        assert!(!choices.insert_blank());
        assert_eq!(choices.len(), MAX_CHOICES);
    }

    #[test]
    fn test_set_at_does_not_trim() {
        let mut choices = list(&["a"]);
        assert!(choices.set_at(0, "  b ".to_string()));
        assert_eq!(choices.get(0), Some("  b "));
    }

    #[test]
    fn test_set_at_out_of_range_is_noop() {
        let mut choices = list(&["a"]);
        assert!(!choices.set_at(3, "b".to_string()));
        assert_eq!(choices.rows(), &["a".to_string()]);
    }

    #[test]
    fn test_remove_at_keeps_last_row() {
        let mut choices = list(&["only"]);
        assert!(!choices.remove_at(0));
        assert_eq!(choices.len(), 1);
    }

    #[test]
    fn test_remove_at_removes_row() {
        let mut choices = list(&["a", "b", "c"]);
        assert!(choices.remove_at(1));
        assert_eq!(choices.rows(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_valid_choices_skip_blank_rows() {
        let choices = list(&[" a ", "", "   ", "b"]);
        assert_eq!(choices.valid_choices(), vec!["a", "b"]);
        assert_eq!(choices.trimmed(), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_duplicate_compares_trimmed_and_ignores_blanks() {
        let choices = list(&["a", " a", "", ""]);
        assert!(choices.is_duplicate(0));
        assert!(choices.is_duplicate(1));
        assert!(!choices.is_duplicate(2));
    }

    #[test]
    fn test_duplicate_is_case_sensitive() {
        let choices = list(&["Red", "red"]);
        assert!(!choices.is_duplicate(0));
    }

    #[test]
    fn test_row_flags() {
        let long = "x".repeat(LONG_CHOICE_CHARS + 1);
        let choices = list(&["a", "", &long]);
        let selection = Selection::Multi(vec![1]);

        assert!(!choices.row_flags(0, &selection).any());
        assert!(choices.row_flags(1, &selection).blank_selected);
        assert!(choices.row_flags(2, &selection).too_long);
    }

    #[test]
    fn test_deserialize_empty_array_yields_blank_row() {
        let parsed: ChoiceList = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed, ChoiceList::default());
    }

    #[test]
    fn test_oversized_snapshot_is_kept_but_full() {
        let rows: Vec<String> = (0..MAX_CHOICES + 3).map(|i| format!("c{i}")).collect();
        let mut parsed: ChoiceList =
            serde_json::from_str(&serde_json::to_string(&rows).unwrap()).unwrap();

        assert_eq!(parsed.len(), MAX_CHOICES + 3);
        assert!(parsed.is_full());
        assert!(!parsed.insert_blank());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&list(&["a", ""])).unwrap();
        assert_eq!(json, r#"["a",""]"#);
    }
}
