//! Collection view.

use booktrack_core::api::{MyBookEntry, Rating, ReadingStatus};
use booktrack_core::view::CollectionStats;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::common::fit_width;
use crate::overlays::render_utils::search_line;
use crate::state::TuiState;

const AUTHOR_WIDTH: usize = 20;
const STATUS_WIDTH: usize = 17;
const RATING_WIDTH: usize = 15;

/// Renders "My Books": stats, filter/sort line, search line and entries.
pub fn render_collection(frame: &mut Frame, area: Rect, tui: &TuiState, spinner: &str) {
    let [stats_area, controls_area, search_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(area);

    let entries = &tui.store.my_books.entries;
    let view = &tui.collection;
    let visible = view.visible(entries);

    frame.render_widget(
        Paragraph::new(stats_line(&CollectionStats::from_entries(entries))),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
            Span::styled(view.filter.label(), Style::default().fg(Color::Cyan)),
            Span::styled("   Sort: ", Style::default().fg(Color::DarkGray)),
            Span::styled(view.sort.label(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("   Showing {} of {}", visible.len(), entries.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        controls_area,
    );
    frame.render_widget(
        Paragraph::new(search_line(&view.search, view.searching)),
        search_area,
    );

    if tui.store.my_books.loading && entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{spinner} Loading your books…"),
                Style::default().fg(Color::Yellow),
            )),
            list_area,
        );
        return;
    }
    if visible.is_empty() {
        let message = if entries.is_empty() {
            "Your collection is empty. Add books from the catalog (h, then Enter)."
        } else {
            "No books match the current filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))),
            list_area,
        );
        return;
    }

    let title_width = usize::from(list_area.width)
        .saturating_sub(2 + AUTHOR_WIDTH + STATUS_WIDTH + RATING_WIDTH + 6)
        .max(8);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|entry| entry_item(entry, title_width))
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

fn stats_line(stats: &CollectionStats) -> Line<'static> {
    let noun = if stats.total == 1 { "book" } else { "books" };
    let mut spans = vec![Span::styled(
        format!("{} {noun}", stats.total),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for status in ReadingStatus::ALL {
        spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("{} {}", status.label(), stats.count(status)),
            Style::default().fg(status_color(status)),
        ));
    }
    Line::from(spans)
}

fn entry_item(entry: &MyBookEntry, title_width: usize) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::raw(fit_width(&entry.book.title, title_width)),
        Span::raw("  "),
        Span::styled(
            fit_width(&entry.book.author, AUTHOR_WIDTH),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            fit_width(entry.status.label(), STATUS_WIDTH),
            Style::default().fg(status_color(entry.status)),
        ),
        Span::raw("  "),
        Span::styled(
            fit_width(&rating_label(entry.rating), RATING_WIDTH),
            Style::default().fg(Color::Yellow),
        ),
    ]))
}

fn status_color(status: ReadingStatus) -> Color {
    match status {
        ReadingStatus::WantToRead => Color::Blue,
        ReadingStatus::CurrentlyReading => Color::Yellow,
        ReadingStatus::Read => Color::Green,
        ReadingStatus::Dropped => Color::Red,
    }
}

/// `★★★☆☆ 3/5`, or "No rating".
fn rating_label(rating: Rating) -> String {
    if !rating.is_rated() {
        return "No rating".to_string();
    }
    let filled = usize::from(rating.get());
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{} {rating}", "★".repeat(filled), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_label() {
        assert_eq!(rating_label(Rating::default()), "No rating");
        assert_eq!(rating_label(Rating::new(3).unwrap()), "★★★☆☆ 3/5");
    }

    #[test]
    fn test_stats_line_counts_each_status() {
        let stats = CollectionStats {
            total: 3,
            want_to_read: 1,
            read: 2,
            ..CollectionStats::default()
        };
        let line = stats_line(&stats).to_string();
        assert!(line.starts_with("3 books"));
        assert!(line.contains("Want to Read 1"));
        assert!(line.contains("Read 2"));
        assert!(line.contains("Dropped 0"));
    }
}
