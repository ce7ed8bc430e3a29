//! Canonical payload construction for a validated draft

use super::collation::sort_locale;
use crate::state::{ChoiceList, DisplayOrder, FieldDraft, FieldKind, Selection};
use serde::{Deserialize, Serialize};

/// Payload handed to the field service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedField {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub default_value: String,
    pub order: DisplayOrder,
    pub choices: Vec<String>,
    pub selected_choices: Vec<String>,
}

/// Normalized payload plus the selection re-derived against its choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub field: NormalizedField,
    pub selection: Selection,
}

impl Normalization {
    /// The normalized choices as an editable list
    pub fn choice_list(&self) -> ChoiceList {
        ChoiceList::from_rows(self.field.choices.clone())
    }
}

/// Build the canonical field from a draft that already passed validation.
///
/// Callers must gate on [`super::validate`]; no checks happen here.
pub fn normalize(choices: &ChoiceList, draft: &FieldDraft) -> Normalization {
    let trimmed = choices.trimmed();
    let default_value = draft.trimmed_default();

    let mut base: Vec<String> = Vec::with_capacity(trimmed.len() + 1);
    for choice in trimmed.iter().filter(|c| !c.is_empty()) {
        if !base.iter().any(|b| b == choice) {
            base.push(choice.to_string());
        }
    }

    if !default_value.is_empty() && !base.iter().any(|b| b == default_value) {
        base.push(default_value.to_string());
    }

    if draft.order == DisplayOrder::Alphabetical {
        sort_locale(&mut base);
    }

    let position = |value: &str| base.iter().position(|b| b == value);

    let mut reconciled: Vec<usize> = Vec::new();
    for index in draft.selection.indexes() {
        let value = trimmed.get(index).copied().unwrap_or("");
        if let Some(new_index) = position(value) {
            if !reconciled.contains(&new_index) {
                reconciled.push(new_index);
            }
        }
    }

    if let Some(default_index) = (!default_value.is_empty())
        .then(|| position(default_value))
        .flatten()
    {
        match draft.kind {
            // Single selection holds one row; the default value takes it
            FieldKind::SingleSelect => reconciled = vec![default_index],
            FieldKind::MultiSelect => {
                if !reconciled.contains(&default_index) {
                    reconciled.push(default_index);
                }
            }
        }
    }

    let selection = match draft.kind {
        FieldKind::SingleSelect => Selection::Single(reconciled.first().copied()),
        FieldKind::MultiSelect => Selection::Multi(reconciled),
    };
    let selected_choices = selection
        .indexes()
        .into_iter()
        .map(|i| base[i].clone())
        .collect();

    Normalization {
        field: NormalizedField {
            label: draft.label.clone(),
            kind: draft.kind,
            required: draft.required,
            default_value: draft.default_value.clone(),
            order: draft.order,
            choices: base,
            selected_choices,
        },
        selection,
    }
}
