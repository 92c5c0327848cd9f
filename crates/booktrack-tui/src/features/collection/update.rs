//! Collection key handling.

use booktrack_core::api::Rating;
use booktrack_core::store::{AppState as Store, Request};
use crossterm::event::{KeyCode, KeyEvent};

use super::CollectionView;
use crate::effects::UiEffect;
use crate::update::Command;

/// Handles a key on the "My Books" screen. Returns `None` when the key isn't
/// a collection command.
pub fn handle_key(
    view: &mut CollectionView,
    store: &Store,
    key: KeyEvent,
) -> Option<Vec<Command>> {
    if view.searching {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => view.searching = false,
            _ => {
                if view.search.handle_key(key) {
                    view.selected = 0;
                }
            }
        }
        return Some(vec![]);
    }

    let entries = &store.my_books.entries;
    let len = view.visible(entries).len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if len > 0 {
                view.selected = (view.selected + 1).min(len - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.selected = view.selected.min(len.saturating_sub(1)).saturating_sub(1);
        }
        KeyCode::Char('/') => view.searching = true,
        KeyCode::Char('f') => {
            view.filter = view.filter.next();
            view.selected = 0;
        }
        KeyCode::Char('s') => {
            view.sort = view.sort.next();
            view.selected = 0;
        }
        KeyCode::Char('t') => {
            let entry = view.selected_entry(entries)?;
            return Some(vec![Command::Request(Request::UpdateStatus {
                book_id: entry.book.id.clone(),
                status: entry.status.next(),
            })]);
        }
        KeyCode::Char(ch @ '0'..='5') => {
            let entry = view.selected_entry(entries)?;
            let value = ch.to_digit(10).and_then(|d| u8::try_from(d).ok())?;
            let rating = Rating::new(value).ok()?;
            if rating == entry.rating {
                return Some(vec![]);
            }
            return Some(vec![Command::Request(Request::UpdateRating {
                book_id: entry.book.id.clone(),
                rating,
            })]);
        }
        KeyCode::Char('o') => {
            let entry = view.selected_entry(entries)?;
            return Some(vec![match &entry.book.cover_image {
                Some(url) => Command::Effect(UiEffect::OpenBrowser { url: url.clone() }),
                None => Command::Notice(format!("\"{}\" has no cover image", entry.book.title)),
            }]);
        }
        _ => return None,
    }
    Some(vec![])
}
