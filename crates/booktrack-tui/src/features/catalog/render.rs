//! Catalog view.

use booktrack_core::api::Book;
use booktrack_core::view::is_tracked;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::common::fit_width;
use crate::overlays::render_utils::search_line;
use crate::state::TuiState;

const AUTHOR_WIDTH: usize = 24;
const AVAILABILITY_WIDTH: usize = 11;

/// Renders the home screen: count header, search line and book list.
pub fn render_catalog(frame: &mut Frame, area: Rect, tui: &TuiState, spinner: &str) {
    let [header_area, search_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(area);

    let books = &tui.store.books.books;
    let view = &tui.catalog;
    let visible = view.visible(books);

    frame.render_widget(
        Paragraph::new(header_line(books.len(), visible.len(), view.sort.name())),
        header_area,
    );
    frame.render_widget(
        Paragraph::new(search_line(&view.search, view.searching)),
        search_area,
    );

    if tui.store.books.loading && books.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{spinner} Loading books…"),
                Style::default().fg(Color::Yellow),
            )),
            list_area,
        );
        return;
    }
    if visible.is_empty() {
        let message = if books.is_empty() {
            "No books in the catalog yet. Press a to add one."
        } else {
            "No books match your search."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))),
            list_area,
        );
        return;
    }

    let title_width = usize::from(list_area.width)
        .saturating_sub(2 + 2 + AUTHOR_WIDTH + AVAILABILITY_WIDTH + 4)
        .max(8);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|book| book_item(book, tui, title_width))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(view.selected_index(visible.len()));
    frame.render_stateful_widget(list, list_area, &mut list_state);
}

/// "N Books Available", plus the match count while a search narrows the list.
fn header_line(total: usize, shown: usize, sort: &str) -> Line<'static> {
    let noun = if total == 1 { "Book" } else { "Books" };
    let mut spans = vec![Span::styled(
        format!("{total} {noun} Available"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if shown != total {
        spans.push(Span::styled(
            format!("  Showing {shown} of {total} books"),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled(
        format!("  sort: {sort}"),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn book_item(book: &Book, tui: &TuiState, title_width: usize) -> ListItem<'static> {
    let tracked = is_tracked(&tui.store.my_books.entries, &book.id);
    let marker = if tracked {
        Span::styled("✓ ", Style::default().fg(Color::Green))
    } else {
        Span::raw("  ")
    };
    let (availability, availability_color) = if book.availability {
        ("Available", Color::Green)
    } else {
        ("Unavailable", Color::Red)
    };
    ListItem::new(Line::from(vec![
        marker,
        Span::raw(fit_width(&book.title, title_width)),
        Span::raw("  "),
        Span::styled(
            fit_width(&book.author, AUTHOR_WIDTH),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            fit_width(availability, AVAILABILITY_WIDTH),
            Style::default().fg(availability_color),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_pluralizes() {
        assert!(header_line(1, 1, "listed").to_string().starts_with("1 Book Available"));
        assert!(header_line(3, 3, "listed").to_string().starts_with("3 Books Available"));
    }

    #[test]
    fn test_header_shows_match_count_when_filtered() {
        let line = header_line(5, 2, "title").to_string();
        assert!(line.contains("Showing 2 of 5 books"));
        assert!(!header_line(5, 5, "title").to_string().contains("Showing"));
    }
}
