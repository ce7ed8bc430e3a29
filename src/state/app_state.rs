//! UI state for the field builder screen

/// Which form row has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Label,
    Kind,
    Required,
    DefaultValue,
    Choices,
    Order,
    Buttons,
}

impl FormFocus {
    const ORDER: [FormFocus; 7] = [
        FormFocus::Label,
        FormFocus::Kind,
        FormFocus::Required,
        FormFocus::DefaultValue,
        FormFocus::Choices,
        FormFocus::Order,
        FormFocus::Buttons,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Buttons at the bottom of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Save,
    Cancel,
}

impl FormButton {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Save => Self::Cancel,
            Self::Cancel => Self::Save,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Save => "Save changes",
            Self::Cancel => "Cancel",
        }
    }
}

/// Screen state that is not part of the field draft
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: FormFocus,
    /// Row of the choice list under the cursor
    pub choice_cursor: usize,
    pub selected_button: FormButton,
    /// Errors shown one at a time in a modal dialog
    pub error_queue: Vec<String>,
    pub status_message: Option<String>,
    /// Advances while a submit is in flight
    pub spinner_tick: usize,
}

impl AppState {
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Keep the cursor inside a list of `len` rows
    pub fn clamp_cursor(&mut self, len: usize) {
        self.choice_cursor = self.choice_cursor.min(len.saturating_sub(1));
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod form_focus {
        use super::*;

        #[test]
        fn test_next_wraps_to_first() {
            assert_eq!(FormFocus::Buttons.next(), FormFocus::Label);
        }

        #[test]
        fn test_prev_wraps_to_last() {
            assert_eq!(FormFocus::Label.prev(), FormFocus::Buttons);
        }

        #[test]
        fn test_full_cycle_returns_home() {
            let mut focus = FormFocus::Label;
            for _ in 0..FormFocus::ORDER.len() {
                focus = focus.next();
            }
            assert_eq!(focus, FormFocus::Label);
        }
    }

    mod app_state {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            state.push_error("first".to_string());
            state.push_error("second".to_string());

            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_clamp_cursor() {
            let mut state = AppState {
                choice_cursor: 5,
                ..Default::default()
            };
            state.clamp_cursor(3);
            assert_eq!(state.choice_cursor, 2);
        }
    }
}
