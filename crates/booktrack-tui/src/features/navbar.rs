//! Top navigation bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::route::Route;
use crate::state::TuiState;

/// Renders the brand, the route tabs and the session indicator.
pub fn render_navbar(frame: &mut Frame, area: Rect, tui: &TuiState, spinner: &str) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(40)]).areas(area);

    frame.render_widget(Paragraph::new(tabs_line(tui.route, tui.is_authenticated())), left);

    let mut session = Vec::new();
    if tui.is_busy() {
        session.push(Span::styled(
            format!("{spinner} "),
            Style::default().fg(Color::Yellow),
        ));
    }
    match (&tui.store.auth.user, tui.is_authenticated()) {
        (Some(user), true) => session.push(Span::styled(
            user.email.clone(),
            Style::default().fg(Color::Green),
        )),
        (None, true) => session.push(Span::styled("signed in", Style::default().fg(Color::Green))),
        (_, false) => session.push(Span::styled(
            "not signed in",
            Style::default().fg(Color::DarkGray),
        )),
    }
    frame.render_widget(
        Paragraph::new(Line::from(session)).alignment(Alignment::Right),
        right,
    );
}

fn tabs_line(current: Route, authenticated: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "📚 BookTrack ",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    for route in Route::tabs(authenticated) {
        let key = match route {
            Route::Home => "h",
            Route::MyBooks => "m",
            Route::Login => "l",
            Route::Register => "u",
        };
        let style = if *route == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", route.title()), style));
        spans.push(Span::styled(format!("({key})"), Style::default().fg(Color::DarkGray)));
    }
    if authenticated {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" Logout ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled("(l)", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_follow_session() {
        let signed_out = tabs_line(Route::Home, false).to_string();
        assert!(signed_out.contains("Login"));
        assert!(signed_out.contains("Register"));
        assert!(!signed_out.contains("My Books"));

        let signed_in = tabs_line(Route::MyBooks, true).to_string();
        assert!(signed_in.contains("My Books"));
        assert!(signed_in.contains("Logout"));
        assert!(!signed_in.contains("Register"));
    }
}
