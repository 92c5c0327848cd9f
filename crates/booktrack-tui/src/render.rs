//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::truncate_with_ellipsis;
use crate::features::{auth, catalog, collection, navbar};
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::route::Route;
use crate::state::{AppState, TuiState};

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 2;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let spinner = SPINNER_FRAMES[(state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()];

    let message_height = u16::from(message_line(state).is_some());
    let [nav_area, message_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(message_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let nav_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let nav_inner = nav_block.inner(nav_area);
    frame.render_widget(nav_block, nav_area);
    navbar::render_navbar(frame, nav_inner, state, spinner);

    if let Some(line) = message_line(state) {
        frame.render_widget(Paragraph::new(line), message_area);
    }

    let body = Rect::new(
        body_area.x + 1,
        body_area.y,
        body_area.width.saturating_sub(2),
        body_area.height,
    );
    match state.route {
        Route::Home => catalog::render_catalog(frame, body, state, spinner),
        Route::MyBooks => collection::render_collection(frame, body, state, spinner),
        Route::Login => auth::render_auth_form(frame, body, &state.login, &state.store.auth, spinner),
        Route::Register => {
            auth::render_auth_form(frame, body, &state.register, &state.store.auth, spinner);
        }
    }

    frame.render_widget(
        Paragraph::new(hint_line(&footer_hints(app), Color::Cyan)),
        footer_area,
    );

    app.overlay.render(frame, area, state);
}

/// The fetch error banner of the current screen, else the notice.
fn message_line(state: &TuiState) -> Option<Line<'static>> {
    let width = usize::from(state.viewport.0).saturating_sub(30).max(20);
    if let Some(error) = state.banner_error() {
        return Some(Line::from(vec![
            Span::styled(
                format!(" {} ", truncate_with_ellipsis(error, width)),
                Style::default().fg(Color::White).bg(Color::Red),
            ),
            Span::styled("  r retry • x dismiss", Style::default().fg(Color::DarkGray)),
        ]));
    }
    state.notice.as_ref().map(|notice| {
        Line::from(Span::styled(
            truncate_with_ellipsis(notice, width + 20),
            Style::default().fg(Color::Cyan),
        ))
    })
}

fn footer_hints(app: &AppState) -> Vec<InputHint<'static>> {
    let state = &app.tui;
    if app.overlay.is_some() {
        return vec![];
    }
    if state.is_editing() && matches!(state.route, Route::Home | Route::MyBooks) {
        return vec![
            InputHint::new("type", "to search"),
            InputHint::new("Enter/Esc", "done"),
        ];
    }
    match state.route {
        Route::Home => {
            let mut hints = vec![
                InputHint::new("j/k", "move"),
                InputHint::new("/", "search"),
                InputHint::new("s", "sort"),
                InputHint::new("Enter", "add to my books"),
                InputHint::new("o", "cover"),
            ];
            if state.is_authenticated() {
                hints.push(InputHint::new("a", "new book"));
            }
            hints.push(InputHint::new("q", "quit"));
            hints
        }
        Route::MyBooks => vec![
            InputHint::new("j/k", "move"),
            InputHint::new("t", "next status"),
            InputHint::new("0-5", "rate"),
            InputHint::new("f", "filter"),
            InputHint::new("s", "sort"),
            InputHint::new("/", "search"),
            InputHint::new("q", "quit"),
        ],
        Route::Login | Route::Register => vec![
            InputHint::new("h", "catalog"),
            InputHint::new("q", "quit"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use booktrack_core::api::{Book, BookId};
    use booktrack_core::store::AppState as Store;
    use booktrack_core::view::SortKey;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_home_lists_books_with_count() {
        let mut app = AppState::new(Store::new(None), SortKey::Title);
        app.tui.store.books.books = vec![Book {
            id: BookId::from("b1"),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover_image: None,
            availability: false,
        }];
        let screen = draw(&app);
        assert!(screen.contains("1 Book Available"));
        assert!(screen.contains("Dune"));
        assert!(screen.contains("Unavailable"));
        assert!(screen.contains("not signed in"));
    }

    #[test]
    fn test_error_banner_on_home() {
        let mut app = AppState::new(Store::new(None), SortKey::Title);
        app.tui.viewport = (100, 24);
        app.tui.store.books.error = Some("Failed to fetch books".into());
        let screen = draw(&app);
        assert!(screen.contains("Failed to fetch books"));
        assert!(screen.contains("r retry"));
    }

    #[test]
    fn test_login_form_masks_password() {
        let mut app = AppState::new(Store::new(None), SortKey::Title);
        app.tui.route = Route::Login;
        app.tui.login.focus_first();
        app.tui.login.email.insert_str("reader@example.com");
        app.tui.login.toggle_focus();
        app.tui.login.password.insert_str("hunter22");
        let screen = draw(&app);
        assert!(screen.contains("reader@example.com"));
        assert!(!screen.contains("hunter22"));
        assert!(screen.contains("••••••••"));
    }
}
