//! Catalog key handling.

use booktrack_core::store::{AppState as Store, Request};
use booktrack_core::view::is_tracked;
use crossterm::event::{KeyCode, KeyEvent};

use super::CatalogView;
use crate::effects::UiEffect;
use crate::overlays::OverlayRequest;
use crate::route::Route;
use crate::update::Command;

/// Handles a key on the catalog screen. Returns `None` when the key isn't
/// a catalog command.
pub fn handle_key(view: &mut CatalogView, store: &Store, key: KeyEvent) -> Option<Vec<Command>> {
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

    let len = view.visible(&store.books.books).len();
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
        KeyCode::Char('s') => {
            view.sort = view.sort.next();
            view.selected = 0;
        }
        KeyCode::Char('a') => return Some(vec![Command::OpenOverlay(OverlayRequest::AddBook)]),
        KeyCode::Enter => return Some(add_selected(view, store)),
        KeyCode::Char('o') => {
            let book = view.selected_book(&store.books.books)?;
            return Some(vec![match &book.cover_image {
                Some(url) => Command::Effect(UiEffect::OpenBrowser { url: url.clone() }),
                None => Command::Notice(format!("\"{}\" has no cover image", book.title)),
            }]);
        }
        _ => return None,
    }
    Some(vec![])
}

fn add_selected(view: &CatalogView, store: &Store) -> Vec<Command> {
    let Some(book) = view.selected_book(&store.books.books) else {
        return vec![];
    };
    if !store.auth.is_authenticated {
        return vec![
            Command::Navigate(Route::Login),
            Command::Notice("Log in to add books to your collection".to_string()),
        ];
    }
    if is_tracked(&store.my_books.entries, &book.id) {
        return vec![Command::Notice(format!(
            "\"{}\" is already in your collection",
            book.title
        ))];
    }
    vec![Command::Request(Request::AddToMyBooks(book.id.clone()))]
}
