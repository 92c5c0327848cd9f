use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::{TextField, truncate_with_ellipsis};

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Input configuration for an overlay.
pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Layout rectangles for an overlay.
pub struct OverlayLayout {
    pub body: Rect,
}

/// Render a standard overlay container and return its layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    render_overlay_container(frame, popup, config.title, config.border_color);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );
    OverlayLayout { body }
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);
    let para = Paragraph::new(hint_line(hints, highlight_color)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// `key action • key action` spans.
pub fn hint_line<'a>(hints: &[InputHint<'a>], highlight_color: Color) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// A labeled form input.
pub struct FieldView<'a> {
    pub label: &'a str,
    pub field: &'a TextField,
    pub focused: bool,
    /// Render every character as `•`.
    pub masked: bool,
    pub placeholder: &'a str,
    pub error: Option<&'a str>,
}

/// Lines for a labeled input: label, value with cursor, then the error if any.
pub fn field_lines(view: &FieldView<'_>, width: u16) -> Vec<Line<'static>> {
    let label_style = if view.focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut lines = vec![Line::from(Span::styled(view.label.to_string(), label_style))];

    let value = if view.masked {
        "•".repeat(view.field.value().chars().count())
    } else {
        view.field.value().to_string()
    };
    let max_width = usize::from(width.saturating_sub(4));

    let mut spans = vec![Span::styled("  ", Style::default())];
    if value.is_empty() && !view.focused {
        spans.push(Span::styled(
            view.placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else if view.focused {
        let (before, after) = split_at_char(&value, view.field.cursor());
        spans.push(Span::raw(truncate_with_ellipsis(before, max_width)));
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(after.to_string()));
    } else {
        spans.push(Span::raw(truncate_with_ellipsis(&value, max_width)));
    }
    lines.push(Line::from(spans));

    if let Some(error) = view.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// Search prompt shown above a list: `/ query█` while editing, the query
/// otherwise, or a hint when empty.
pub fn search_line(field: &TextField, editing: bool) -> Line<'static> {
    let prompt = Span::styled("/ ", Style::default().fg(Color::DarkGray));
    if editing {
        let (before, after) = split_at_char(field.value(), field.cursor());
        return Line::from(vec![
            prompt,
            Span::styled(before.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("█", Style::default().fg(Color::Yellow)),
            Span::styled(after.to_string(), Style::default().fg(Color::Yellow)),
        ]);
    }
    if field.is_empty() {
        return Line::from(Span::styled(
            "/ to search by title or author",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(vec![prompt, Span::raw(field.value().to_string())])
}

fn split_at_char(text: &str, char_idx: usize) -> (&str, &str) {
    let idx = text
        .char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(i, _)| i);
    text.split_at(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_overlay_area(area, 60, 20), Rect::new(20, 10, 60, 20));

        let small = Rect::new(0, 0, 30, 10);
        let popup = calculate_overlay_area(small, 60, 20);
        assert_eq!(popup.width, 26);
        assert_eq!(popup.height, 8);
    }

    #[test]
    fn test_masked_field_hides_value() {
        let field = TextField::with_value("secret");
        let lines = field_lines(
            &FieldView {
                label: "Password",
                field: &field,
                focused: false,
                masked: true,
                placeholder: "",
                error: Some("Password is required"),
            },
            40,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "  ••••••");
        assert!(!lines[1].to_string().contains("secret"));
    }

    #[test]
    fn test_split_at_char_multibyte() {
        assert_eq!(split_at_char("Émile", 1), ("É", "mile"));
        assert_eq!(split_at_char("abc", 9), ("abc", ""));
    }
}
