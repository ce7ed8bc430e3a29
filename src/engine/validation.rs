//! Read-only checks run before a field is submitted

use crate::state::{ChoiceList, FieldDraft, MAX_CHOICES};
use std::collections::HashSet;
use thiserror::Error;

/// A user-input defect, reported against a form field and never propagated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Label is required.")]
    LabelRequired,
    #[error("At least one choice or a default value is required.")]
    NoChoices,
    #[error("Duplicate choices are not allowed.")]
    DuplicateChoices,
    #[error("You cannot have more than 50 choices.")]
    TooManyChoices,
    #[error("Selected choices cannot be empty.")]
    EmptySelectedChoice,
}

/// Field-keyed errors. Only the last failing rule per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub label: Option<ValidationError>,
    pub choices: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.choices.is_none()
    }
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: FieldErrors,
    /// Selected indices that point at blank or missing rows
    pub invalid_selected_indices: Vec<usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the draft and its choices against the submission rules
pub fn validate(choices: &ChoiceList, draft: &FieldDraft) -> ValidationReport {
    let mut errors = FieldErrors::default();
    let valid_choices = choices.valid_choices();

    if draft.label.trim().is_empty() {
        errors.label = Some(ValidationError::LabelRequired);
    }

    if valid_choices.is_empty() && draft.trimmed_default().is_empty() {
        errors.choices = Some(ValidationError::NoChoices);
    }

    let distinct: HashSet<&str> = valid_choices.iter().copied().collect();
    if distinct.len() != valid_choices.len() {
        errors.choices = Some(ValidationError::DuplicateChoices);
    }

    if choices.len() > MAX_CHOICES {
        errors.choices = Some(ValidationError::TooManyChoices);
    }

    let invalid_selected_indices: Vec<usize> = draft
        .selection
        .indexes()
        .into_iter()
        .filter(|&i| !choices.is_filled(i))
        .collect();
    if !invalid_selected_indices.is_empty() {
        errors.choices = Some(ValidationError::EmptySelectedChoice);
    }

    ValidationReport {
        errors,
        invalid_selected_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldKind, Selection};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn list(rows: &[&str]) -> ChoiceList {
        ChoiceList::from_rows(rows.iter().map(|r| r.to_string()).collect())
    }

    fn draft(label: &str, default_value: &str, selection: Selection) -> FieldDraft {
        let kind = match selection {
            Selection::Single(_) => FieldKind::SingleSelect,
            Selection::Multi(_) => FieldKind::MultiSelect,
        };
        FieldDraft {
            label: label.to_string(),
            kind,
            default_value: default_value.to_string(),
            selection,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let report = validate(&list(&["b", "a"]), &draft("Color", "", Selection::Single(Some(0))));
        assert!(report.is_valid());
        assert!(report.invalid_selected_indices.is_empty());
    }

    #[test]
    fn test_blank_label_is_rejected() {
        let report = validate(&list(&["a"]), &draft("   ", "", Selection::default()));
        assert_eq!(report.errors.label, Some(ValidationError::LabelRequired));
        assert_eq!(report.errors.choices, None);
    }

    #[test]
    fn test_no_choices_and_no_default() {
        let report = validate(&list(&["", "  "]), &draft("Size", "  ", Selection::default()));
        assert_eq!(report.errors.choices, Some(ValidationError::NoChoices));
    }

    #[test]
    fn test_default_value_satisfies_choice_requirement() {
        let report = validate(&list(&[""]), &draft("Size", "Medium", Selection::default()));
        assert!(report.is_valid());
    }

    #[test]
    fn test_duplicate_choices_are_rejected() {
        let report = validate(&list(&["b", "a", "b"]), &draft("Color", "", Selection::Single(Some(0))));
        assert_eq!(report.errors.choices, Some(ValidationError::DuplicateChoices));
    }

    #[test]
    fn test_duplicates_compare_trimmed_values() {
        let report = validate(&list(&["a ", " a"]), &draft("Color", "", Selection::default()));
        assert_eq!(report.errors.choices, Some(ValidationError::DuplicateChoices));
    }

    #[test]
    fn test_out_of_range_selection_is_invalid() {
        let report = validate(&list(&["a", "b"]), &draft("Color", "", Selection::Multi(vec![5])));
        assert_eq!(report.errors.choices, Some(ValidationError::EmptySelectedChoice));
        assert_eq!(report.invalid_selected_indices, vec![5]);
    }

    #[test]
    fn test_blank_selected_rows_are_recorded() {
        let report = validate(
            &list(&["a", " ", "b", ""]),
            &draft("Color", "", Selection::Multi(vec![0, 1, 3])),
        );
        assert_eq!(report.invalid_selected_indices, vec![1, 3]);
    }

    #[test]
    fn test_later_choice_rule_overwrites_message() {
        // Duplicates and a blank selection both fail; the selection message wins
        let report = validate(&list(&["a", "a", ""]), &draft("Color", "", Selection::Multi(vec![2])));
        assert_eq!(report.errors.choices, Some(ValidationError::EmptySelectedChoice));
    }

    #[test]
    fn test_label_and_choice_errors_are_independent() {
        let report = validate(&list(&[""]), &draft("", "", Selection::default()));
        assert_eq!(report.errors.label, Some(ValidationError::LabelRequired));
        assert_eq!(report.errors.choices, Some(ValidationError::NoChoices));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::LabelRequired.to_string(), "Label is required.");
        assert_eq!(
            ValidationError::TooManyChoices.to_string(),
            "You cannot have more than 50 choices."
        );
    }

    proptest! {
        #[test]
        fn test_any_filled_list_with_label_passes(
            rows in prop::collection::hash_set("[a-z]{1,8}", 1..20),
        ) {
            let choices = ChoiceList::from_rows(rows.into_iter().collect());
            let report = validate(&choices, &draft("Label", "", Selection::default()));
            prop_assert!(report.is_valid());
        }

        #[test]
        fn test_duplicate_trimmed_values_always_fail(
            rows in prop::collection::vec("[a-z]{1,8}", 1..20),
            pick in any::<prop::sample::Index>(),
            pad in " {0,3}",
        ) {
            let mut rows = rows;
            let duplicate = format!("{pad}{}{pad}", rows[pick.index(rows.len())]);
            rows.push(duplicate);
            let report = validate(&ChoiceList::from_rows(rows), &draft("Label", "", Selection::default()));
            prop_assert_eq!(report.errors.choices, Some(ValidationError::DuplicateChoices));
        }

        #[test]
        fn test_fifty_one_rows_always_fail(rows in prop::collection::vec(".{0,6}", 51)) {
            let report = validate(&ChoiceList::from_rows(rows), &draft("Label", "x", Selection::default()));
            prop_assert_eq!(report.errors.choices, Some(ValidationError::TooManyChoices));
        }
    }
}
