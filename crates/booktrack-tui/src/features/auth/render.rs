//! Auth form view.

use booktrack_core::store::AuthState;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{AuthField, AuthForm, AuthFormKind};
use crate::overlays::render_utils::{
    FieldView, InputHint, calculate_overlay_area, field_lines, hint_line, render_overlay_container,
};

/// Renders the login or register form centered in `area`.
pub fn render_auth_form(
    frame: &mut Frame,
    area: Rect,
    form: &AuthForm,
    auth: &AuthState,
    spinner: &str,
) {
    let popup = calculate_overlay_area(area, 56, 16);
    render_overlay_container(frame, popup, form.kind.title(), Color::Cyan);
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let mut lines = Vec::new();
    if let Some(error) = &auth.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::default());
    }

    lines.extend(field_lines(
        &FieldView {
            label: "Email",
            field: &form.email,
            focused: form.focus == Some(AuthField::Email),
            masked: false,
            placeholder: "you@example.com",
            error: form.errors.email,
        },
        inner.width,
    ));
    lines.push(Line::default());
    lines.extend(field_lines(
        &FieldView {
            label: "Password",
            field: &form.password,
            focused: form.focus == Some(AuthField::Password),
            masked: !form.show_password,
            placeholder: "at least 6 characters",
            error: form.errors.password,
        },
        inner.width,
    ));
    lines.push(Line::default());

    if auth.loading {
        lines.push(Line::from(Span::styled(
            format!("{spinner} {}", form.kind.busy_label()),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            switch_hint(form.kind),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let hints = if form.is_editing() {
        vec![
            InputHint::new("Tab", "switch field"),
            InputHint::new("Ctrl+T", if form.show_password { "hide" } else { "show" }),
            InputHint::new("Enter", "submit"),
            InputHint::new("Esc", "leave form"),
        ]
    } else {
        vec![
            InputHint::new("Enter", "edit"),
            InputHint::new("Esc", "home"),
        ]
    };
    lines.push(Line::default());
    lines.push(hint_line(&hints, Color::Cyan).centered());

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn switch_hint(kind: AuthFormKind) -> &'static str {
    match kind {
        AuthFormKind::Login => "Don't have an account? Press u to register.",
        AuthFormKind::Register => "Already have an account? Press l to log in.",
    }
}
