//! Application state and core logic

use crate::platform::SHORTCUT_MODIFIER;
use crate::state::{AppState, DraftStore, FormButton, FormFocus, StoreError};
use crate::submit::{SubmitError, SubmitOutcome, Submitter};
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Main application struct
pub struct App {
    /// Screen state
    pub state: AppState,
    /// The field being built
    pub store: DraftStore,
    submitter: Submitter,
    /// Result channel of the submit task, while one is running
    pending: Option<oneshot::Receiver<SubmitOutcome>>,
    /// Whether the app should quit
    quit: bool,
}

/// Apply a key to a single-line text value
fn edit_text(current: &str, key: KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(c) => {
            let mut value = current.to_string();
            value.push(c);
            Some(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            Some(value)
        }
        _ => None,
    }
}

fn is_toggle_key(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ')
    )
}

impl App {
    pub fn new(store: DraftStore, submitter: Submitter) -> Self {
        let mut state = AppState::default();
        state.clamp_cursor(store.choices().len());
        Self {
            state,
            store,
            submitter,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// True from submit start until its outcome has been applied
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some() || self.submitter.is_in_flight()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Surface a storage failure and carry on with the in-memory draft
    fn persist<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Draft snapshot not saved: {}", e);
                self.push_error(e.to_string());
                None
            }
        }
    }

    /// Called once per frame
    pub fn tick(&mut self) {
        if self.is_submitting() {
            self.state.spinner_tick = self.state.spinner_tick.wrapping_add(1);
        }
        self.poll_submit();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        if key.modifiers.contains(SHORTCUT_MODIFIER) {
            let on_choices = self.state.focus == FormFocus::Choices && !self.is_submitting();
            match key.code {
                KeyCode::Char('s') => self.start_submit(),
                KeyCode::Char('n') if on_choices => self.add_choice(),
                KeyCode::Char('d') if on_choices => self.remove_choice(),
                KeyCode::Char('t') if on_choices => self.toggle_choice(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.state.next_focus(),
            KeyCode::BackTab => self.state.prev_focus(),
            // The draft is frozen until the outcome is applied
            _ if self.is_submitting() => self.handle_frozen_key(key),
            _ => match self.state.focus {
                FormFocus::Label => {
                    if let Some(label) = edit_text(&self.store.draft().label, key) {
                        let result = self.store.set_label(label);
                        self.persist(result);
                    }
                }
                FormFocus::DefaultValue => {
                    if let Some(value) = edit_text(&self.store.draft().default_value, key) {
                        let result = self.store.set_default_value(value);
                        self.persist(result);
                    }
                }
                FormFocus::Kind if is_toggle_key(key) => {
                    let kind = self.store.draft().kind.toggle();
                    let result = self.store.set_kind(kind);
                    self.persist(result);
                }
                FormFocus::Required if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) => {
                    let required = !self.store.draft().required;
                    let result = self.store.set_required(required);
                    self.persist(result);
                }
                FormFocus::Order if is_toggle_key(key) => {
                    let order = self.store.draft().order.toggle();
                    let result = self.store.set_order(order);
                    self.persist(result);
                }
                FormFocus::Choices => self.handle_choices_key(key),
                FormFocus::Buttons => self.handle_buttons_key(key),
                _ => {}
            },
        }
    }

    /// Cursor movement only; edits would be overwritten by the commit
    fn handle_frozen_key(&mut self, key: KeyEvent) {
        match (self.state.focus, key.code) {
            (FormFocus::Choices, KeyCode::Up | KeyCode::Down) => self.handle_choices_key(key),
            (FormFocus::Buttons, KeyCode::Left | KeyCode::Right) => self.handle_buttons_key(key),
            _ => {
                self.state.status_message = Some("Editing is paused while saving".to_string());
            }
        }
    }

    fn handle_choices_key(&mut self, key: KeyEvent) {
        let len = self.store.choices().len();
        match key.code {
            KeyCode::Up => self.state.choice_cursor = self.state.choice_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.state.choice_cursor = (self.state.choice_cursor + 1).min(len.saturating_sub(1))
            }
            KeyCode::Enter => self.add_choice(),
            _ => {
                let index = self.state.choice_cursor;
                let current = self.store.choices().get(index).unwrap_or_default();
                if let Some(value) = edit_text(current, key) {
                    let result = self.store.set_choice(index, value);
                    self.persist(result);
                }
            }
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                self.state.selected_button = self.state.selected_button.toggle()
            }
            KeyCode::Enter => match self.state.selected_button {
                FormButton::Save => self.start_submit(),
                FormButton::Cancel => self.cancel(),
            },
            _ => {}
        }
    }

    fn add_choice(&mut self) {
        let result = self.store.insert_blank();
        match self.persist(result) {
            Some(true) => self.state.choice_cursor = self.store.choices().len() - 1,
            Some(false) => {
                self.state.status_message = Some("Choice limit reached".to_string());
            }
            None => {}
        }
    }

    fn remove_choice(&mut self) {
        let result = self.store.remove_choice(self.state.choice_cursor);
        self.persist(result);
        self.state.clamp_cursor(self.store.choices().len());
    }

    fn toggle_choice(&mut self) {
        let result = self.store.toggle_selection(self.state.choice_cursor);
        self.persist(result);
    }

    /// Reset the draft to its initial values
    fn cancel(&mut self) {
        let result = self.store.reset();
        self.persist(result);
        self.state.choice_cursor = 0;
        self.state.status_message = Some("Draft cleared".to_string());
        tracing::info!("Draft reset");
    }

    /// Validate, normalize and send the field on a background task
    pub fn start_submit(&mut self) {
        match self.submitter.begin(&mut self.store) {
            Ok(pending) => {
                self.state.status_message = Some(format!("Saving '{}'", pending.payload().label));
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    // A dropped receiver drops the outcome, which releases the guard
                    let _ = tx.send(pending.send().await);
                });
                self.pending = Some(rx);
            }
            Err(SubmitError::Invalid) => {
                self.state.status_message = Some("Fix the highlighted fields".to_string());
            }
            Err(e @ SubmitError::InFlight) => {
                self.state.status_message = Some(e.to_string());
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Apply the submit outcome once the task has reported
    pub fn poll_submit(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.finish_submit(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.pending = None;
                self.state.status_message = None;
                self.push_error("Submit ended without a result");
            }
        }
    }

    fn finish_submit(&mut self, outcome: SubmitOutcome) {
        match outcome.finish(&mut self.store) {
            Ok(reply) => {
                self.state.clamp_cursor(self.store.choices().len());
                let message = reply
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Field saved");
                self.state.status_message = Some(format!(
                    "{} ({})",
                    message,
                    chrono::Local::now().format("%H:%M:%S")
                ));
            }
            Err(e) => {
                tracing::error!("Error submitting form: {}", e);
                self.state.status_message = None;
                self.push_error(e.to_string());
            }
        }
    }
}
