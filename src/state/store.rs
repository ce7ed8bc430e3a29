//! Draft state store with snapshot persistence

use super::choices::ChoiceList;
use super::draft::{DisplayOrder, FieldDraft, FieldKind};
use crate::engine::{validate, Normalization, ValidationReport};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Failure to persist a snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write draft snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode draft snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted snapshot slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The field draft, choices excluded
    Form,
    Choices,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Form => "fieldBuilderForm",
            Slot::Choices => "fieldBuilderChoices",
        }
    }
}

/// Text storage keyed by slot
pub trait SnapshotStorage {
    fn read(&self, slot: Slot) -> io::Result<Option<String>>;
    fn write(&mut self, slot: Slot, text: &str) -> io::Result<()>;
}

/// One JSON file per slot in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory
    pub fn default_location() -> Option<Self> {
        ProjectDirs::from("io", "fieldbuilder", "field-builder")
            .map(|dirs| Self::new(dirs.data_dir().join("drafts")))
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, slot: Slot) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(slot)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, slot: Slot, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(slot), text)
    }
}

/// In-process storage; clones share the same slots
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<Slot, String>>>,
}

impl MemoryStorage {
    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<Slot, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, slot: Slot) -> io::Result<Option<String>> {
        Ok(self.slots().get(&slot).cloned())
    }

    fn write(&mut self, slot: Slot, text: &str) -> io::Result<()> {
        self.slots().insert(slot, text.to_string());
        Ok(())
    }
}

/// Read a slot, falling back to `T::default()` when absent or unreadable
fn read_slot<T: DeserializeOwned + Default>(storage: &dyn SnapshotStorage, slot: Slot) -> T {
    match storage.read(slot) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!("Discarding malformed {} snapshot: {}", slot.key(), e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Could not read {} snapshot: {}", slot.key(), e);
            T::default()
        }
    }
}

/// Holds the in-progress field definition and keeps its snapshots current
pub struct DraftStore {
    storage: Box<dyn SnapshotStorage>,
    draft: FieldDraft,
    choices: ChoiceList,
    report: ValidationReport,
}

impl DraftStore {
    /// Restore from storage, using defaults for any missing slot
    pub fn load(storage: Box<dyn SnapshotStorage>) -> Self {
        let draft: FieldDraft = read_slot(storage.as_ref(), Slot::Form);
        let choices: ChoiceList = read_slot(storage.as_ref(), Slot::Choices);
        tracing::info!(
            "Loaded draft '{}' with {} choice rows",
            draft.label,
            choices.len()
        );
        Self {
            storage,
            draft,
            choices,
            report: ValidationReport::default(),
        }
    }

    pub fn draft(&self) -> &FieldDraft {
        &self.draft
    }

    pub fn choices(&self) -> &ChoiceList {
        &self.choices
    }

    /// Result of the last [`DraftStore::validate`] call
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    fn save(&mut self, slot: Slot) -> Result<(), StoreError> {
        let text = match slot {
            Slot::Form => serde_json::to_string(&self.draft)?,
            Slot::Choices => serde_json::to_string(&self.choices)?,
        };
        self.storage.write(slot, &text)?;
        Ok(())
    }

    fn save_all(&mut self) -> Result<(), StoreError> {
        self.save(Slot::Form)?;
        self.save(Slot::Choices)
    }

    pub fn set_label(&mut self, label: String) -> Result<(), StoreError> {
        self.draft.label = label;
        self.save(Slot::Form)
    }

    pub fn set_kind(&mut self, kind: FieldKind) -> Result<(), StoreError> {
        if self.draft.kind == kind {
            return Ok(());
        }
        self.draft.set_kind(kind);
        self.save(Slot::Form)
    }

    pub fn set_required(&mut self, required: bool) -> Result<(), StoreError> {
        self.draft.required = required;
        self.save(Slot::Form)
    }

    pub fn set_default_value(&mut self, value: String) -> Result<(), StoreError> {
        self.draft.default_value = value;
        self.save(Slot::Form)
    }

    pub fn set_order(&mut self, order: DisplayOrder) -> Result<(), StoreError> {
        self.draft.order = order;
        self.save(Slot::Form)
    }

    /// Select or deselect a row. Duplicate rows can be deselected but not selected.
    pub fn toggle_selection(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.choices.len() {
            return Ok(());
        }
        if self.choices.is_duplicate(index) && !self.draft.selection.contains(index) {
            return Ok(());
        }
        self.draft.toggle_selection(index);
        self.save(Slot::Form)
    }

    /// Append a blank row. Returns false when the list is already full.
    pub fn insert_blank(&mut self) -> Result<bool, StoreError> {
        if !self.choices.insert_blank() {
            return Ok(false);
        }
        self.save(Slot::Choices)?;
        Ok(true)
    }

    pub fn set_choice(&mut self, index: usize, value: String) -> Result<(), StoreError> {
        if self.choices.set_at(index, value) {
            self.save(Slot::Choices)?;
        }
        Ok(())
    }

    /// Remove a row and shift the selection with it
    pub fn remove_choice(&mut self, index: usize) -> Result<bool, StoreError> {
        if !self.choices.remove_at(index) {
            return Ok(false);
        }
        self.draft.selection.remove_row(index);
        self.save_all()?;
        Ok(true)
    }

    /// Run validation and keep the report for display
    pub fn validate(&mut self) -> &ValidationReport {
        self.report = validate(&self.choices, &self.draft);
        &self.report
    }

    /// Replace choices and selection with a normalized result
    pub fn commit(&mut self, normalization: &Normalization) -> Result<(), StoreError> {
        self.choices = normalization.choice_list();
        self.draft.selection = normalization.selection.clone();
        self.report = ValidationReport::default();
        tracing::info!(
            "Committed normalized field '{}' ({} choices)",
            normalization.field.label,
            normalization.field.choices.len()
        );
        self.save_all()
    }

    /// Back to the initial draft, discarding errors
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.draft = FieldDraft::default();
        self.choices = ChoiceList::default();
        self.report = ValidationReport::default();
        self.save_all()
    }
}
