//! Add-book overlay over the catalog.
//!
//! The overlay stays open while the create request runs. The reducer closes
//! it when the book lands in the catalog, or clears `submitting` on failure
//! so the server message shows under the form.

use booktrack_core::forms::{BookForm, BookFormErrors};
use booktrack_core::store::Request;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{FieldView, InputHint, OverlayConfig, field_lines, render_overlay};
use crate::common::TextField;
use crate::state::TuiState;
use crate::update::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookField {
    #[default]
    Title,
    Author,
    Cover,
    Availability,
}

impl BookField {
    const ORDER: [BookField; 4] = [
        BookField::Title,
        BookField::Author,
        BookField::Cover,
        BookField::Availability,
    ];

    fn step(self, forward: bool) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { idx + 1 } else { idx + len - 1 };
        Self::ORDER[next % len]
    }
}

/// State for the add-book overlay.
#[derive(Debug, Clone, Default)]
pub struct AddBookState {
    pub title: TextField,
    pub author: TextField,
    pub cover: TextField,
    pub availability: bool,
    pub focus: BookField,
    pub errors: BookFormErrors,
    /// A create request is in flight.
    pub submitting: bool,
}

impl AddBookState {
    pub fn open() -> Self {
        Self {
            availability: true,
            ..Self::default()
        }
    }

    fn form(&self) -> BookForm {
        BookForm {
            title: self.title.value().to_string(),
            author: self.author.value().to_string(),
            cover_image: self.cover.value().to_string(),
            availability: self.availability,
        }
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            BookField::Title => Some(&mut self.title),
            BookField::Author => Some(&mut self.author),
            BookField::Cover => Some(&mut self.cover),
            BookField::Availability => None,
        }
    }

    fn clear_focused_error(&mut self) {
        match self.focus {
            BookField::Title => self.errors.title = None,
            BookField::Author => self.errors.author = None,
            BookField::Cover | BookField::Availability => {}
        }
    }

    pub fn paste(&mut self, text: &str) {
        if self.submitting {
            return;
        }
        self.clear_focused_error();
        if let Some(field) = self.focused_field() {
            field.insert_str(text);
        }
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        if key.code == KeyCode::Esc {
            return OverlayUpdate::close();
        }
        if self.submitting {
            return OverlayUpdate::stay();
        }

        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.step(true),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.step(false),
            KeyCode::Char(' ') if self.focus == BookField::Availability => {
                self.availability = !self.availability;
            }
            _ => {
                self.clear_focused_error();
                if let Some(field) = self.focused_field() {
                    field.handle_key(key);
                }
            }
        }
        OverlayUpdate::stay()
    }

    fn submit(&mut self) -> OverlayUpdate {
        match self.form().validate() {
            Ok(book) => {
                self.errors = BookFormErrors::default();
                self.submitting = true;
                OverlayUpdate::stay().with_commands(vec![Command::Request(Request::CreateBook(book))])
            }
            Err(errors) => {
                if errors.title.is_some() {
                    self.focus = BookField::Title;
                } else if errors.author.is_some() {
                    self.focus = BookField::Author;
                }
                self.errors = errors;
                OverlayUpdate::stay()
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let hints = [
            InputHint::new("Tab", "next field"),
            InputHint::new("Space", "toggle"),
            InputHint::new("Enter", "add"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Add New Book",
                border_color: Color::Green,
                width: 64,
                height: 20,
                hints: &hints,
            },
        );
        let width = layout.body.width;

        let mut lines = Vec::new();
        for (label, field, focus, placeholder, error) in [
            ("Title *", &self.title, BookField::Title, "", self.errors.title),
            ("Author *", &self.author, BookField::Author, "", self.errors.author),
            (
                "Cover Image URL",
                &self.cover,
                BookField::Cover,
                "https://example.com/cover.jpg",
                None,
            ),
        ] {
            lines.extend(field_lines(
                &FieldView {
                    label,
                    field,
                    focused: self.focus == focus,
                    masked: false,
                    placeholder,
                    error,
                },
                width,
            ));
            lines.push(Line::default());
        }

        let checkbox = if self.availability { "[x]" } else { "[ ]" };
        let style = if self.focus == BookField::Availability {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{checkbox} Available for reading"),
            style,
        )));
        lines.push(Line::default());

        if self.submitting {
            lines.push(Line::from(Span::styled(
                "Adding book…",
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(error) = &tui.store.books.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            layout.body,
        );
    }
}

#[cfg(test)]
mod tests {
    use booktrack_core::api::NewBook;
    use booktrack_core::store::AppState as Store;
    use booktrack_core::view::SortKey;
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tui() -> TuiState {
        TuiState::new(Store::new(Some("tok".into())), SortKey::Title)
    }

    fn type_str(state: &mut AddBookState, tui: &TuiState, text: &str) {
        for ch in text.chars() {
            state.handle_key(tui, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_missing_author_focuses_author() {
        let tui = tui();
        let mut state = AddBookState::open();
        type_str(&mut state, &tui, "Emma");
        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.commands.is_empty());
        assert_eq!(state.errors.author, Some("Author is required"));
        assert_eq!(state.focus, BookField::Author);
        assert!(!state.submitting);
    }

    #[test]
    fn test_submit_trims_and_omits_blank_cover() {
        let tui = tui();
        let mut state = AddBookState::open();
        type_str(&mut state, &tui, "  Emma ");
        state.handle_key(&tui, key(KeyCode::Tab));
        type_str(&mut state, &tui, "Jane Austen");
        state.handle_key(&tui, key(KeyCode::Tab));
        state.handle_key(&tui, key(KeyCode::Tab));
        state.handle_key(&tui, key(KeyCode::Char(' ')));

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert_eq!(
            update.commands,
            vec![Command::Request(Request::CreateBook(NewBook {
                title: "Emma".into(),
                author: "Jane Austen".into(),
                cover_image: None,
                availability: false,
            }))]
        );
        assert!(state.submitting);
    }

    #[test]
    fn test_keys_ignored_while_submitting_except_esc() {
        let tui = tui();
        let mut state = AddBookState::open();
        state.submitting = true;
        state.handle_key(&tui, key(KeyCode::Char('x')));
        assert!(state.title.is_empty());
        let update = state.handle_key(&tui, key(KeyCode::Esc));
        assert_eq!(update.transition, OverlayTransition::Close);
    }

    #[test]
    fn test_typing_clears_field_error() {
        let tui = tui();
        let mut state = AddBookState::open();
        state.handle_key(&tui, key(KeyCode::Enter));
        assert!(state.errors.title.is_some());
        type_str(&mut state, &tui, "D");
        assert_eq!(state.errors.title, None);
        assert!(state.errors.author.is_some());
    }
}
