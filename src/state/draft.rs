//! In-progress field definition

use serde::{Deserialize, Serialize};

/// Selection cardinality of the field being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldKind {
    #[default]
    #[serde(rename = "Multi-select")]
    MultiSelect,
    #[serde(rename = "Single-select")]
    SingleSelect,
}

impl FieldKind {
    pub fn toggle(&self) -> Self {
        match self {
            Self::MultiSelect => Self::SingleSelect,
            Self::SingleSelect => Self::MultiSelect,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MultiSelect => "Multi-select",
            Self::SingleSelect => "Single-select",
        }
    }
}

/// How the submitted choices are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayOrder {
    #[default]
    Alphabetical,
    Custom,
}

impl DisplayOrder {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Alphabetical => Self::Custom,
            Self::Custom => Self::Alphabetical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Alphabetical => "Display choices in Alphabetical",
            Self::Custom => "Unordered",
        }
    }
}

/// Selected rows, by position in the current choice list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Single(Option<usize>),
    /// Insertion ordered, no repeated index
    Multi(Vec<usize>),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Multi(Vec::new())
    }
}

impl Selection {
    /// Empty selection matching the given kind
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::MultiSelect => Selection::Multi(Vec::new()),
            FieldKind::SingleSelect => Selection::Single(None),
        }
    }

    /// Selected indices in the order they were picked
    pub fn indexes(&self) -> Vec<usize> {
        match self {
            Selection::Single(index) => index.iter().copied().collect(),
            Selection::Multi(indexes) => indexes.clone(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match self {
            Selection::Single(selected) => *selected == Some(index),
            Selection::Multi(indexes) => indexes.contains(&index),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(selected) => selected.is_none(),
            Selection::Multi(indexes) => indexes.is_empty(),
        }
    }

    /// Convert to the variant for `kind`, keeping what fits
    pub fn convert(self, kind: FieldKind) -> Self {
        match (self, kind) {
            (Selection::Single(index), FieldKind::MultiSelect) => {
                Selection::Multi(index.into_iter().collect())
            }
            (Selection::Multi(indexes), FieldKind::SingleSelect) => {
                Selection::Single(indexes.first().copied())
            }
            (selection, _) => selection,
        }
    }

    /// Adjust for a removed row so the remaining indices keep pointing at the same rows
    pub fn remove_row(&mut self, removed: usize) {
        let shift = |index: usize| if index > removed { index - 1 } else { index };
        match self {
            Selection::Single(selected) => {
                *selected = selected.filter(|&i| i != removed).map(shift);
            }
            Selection::Multi(indexes) => {
                indexes.retain(|&i| i != removed);
                for index in indexes.iter_mut() {
                    *index = shift(*index);
                }
            }
        }
    }
}

/// The user's in-progress field definition (everything except the choice rows)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDraft {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub default_value: String,
    pub order: DisplayOrder,
    pub selection: Selection,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self {
            label: String::new(),
            kind: FieldKind::MultiSelect,
            required: true,
            default_value: String::new(),
            order: DisplayOrder::Alphabetical,
            selection: Selection::Multi(Vec::new()),
        }
    }
}

impl FieldDraft {
    /// Change the kind, converting the selection to the matching shape
    pub fn set_kind(&mut self, kind: FieldKind) {
        self.kind = kind;
        self.selection = std::mem::take(&mut self.selection).convert(kind);
    }

    /// Toggle a row: SingleSelect replaces, MultiSelect flips membership
    pub fn toggle_selection(&mut self, index: usize) {
        // A restored snapshot may carry a selection shape that disagrees with the kind
        if !matches!(
            (&self.selection, self.kind),
            (Selection::Single(_), FieldKind::SingleSelect)
                | (Selection::Multi(_), FieldKind::MultiSelect)
        ) {
            self.selection = std::mem::take(&mut self.selection).convert(self.kind);
        }

        match &mut self.selection {
            Selection::Single(selected) => *selected = Some(index),
            Selection::Multi(indexes) => {
                if let Some(pos) = indexes.iter().position(|&i| i == index) {
                    indexes.remove(pos);
                } else {
                    indexes.push(index);
                }
            }
        }
    }

    /// Trimmed default value
    pub fn trimmed_default(&self) -> &str {
        self.default_value.trim()
    }
}
