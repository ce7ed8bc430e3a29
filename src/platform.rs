//! Keyboard shortcut labels shown in help text

use crossterm::event::KeyModifiers;

/// Modifier for form shortcuts (submit, add/remove/toggle rows)
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

pub const SAVE_SHORTCUT: &str = "Ctrl+S";
pub const ADD_CHOICE_SHORTCUT: &str = "Ctrl+N";
pub const REMOVE_CHOICE_SHORTCUT: &str = "Ctrl+D";
pub const TOGGLE_CHOICE_SHORTCUT: &str = "Ctrl+T";
