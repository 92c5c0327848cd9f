use booktrack_core::api::Book;
use booktrack_core::view::{CatalogQuery, CatalogSort};

use crate::common::TextField;

/// Local view state of the catalog screen.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    pub search: TextField,
    /// The search field has focus.
    pub searching: bool,
    pub sort: CatalogSort,
    /// Index into the visible (filtered, sorted) rows.
    pub selected: usize,
}

impl CatalogView {
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.value().to_string(),
            sort: self.sort,
        }
    }

    pub fn visible<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        self.query().apply(books)
    }

    pub fn selected_book<'a>(&self, books: &'a [Book]) -> Option<&'a Book> {
        self.visible(books).get(self.selected).copied()
    }

    /// Selection index clamped to `len` rows.
    pub fn selected_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn paste(&mut self, text: &str) {
        self.search.insert_str(text);
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use booktrack_core::api::BookId;

    use super::*;

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: BookId::from(id),
            title: title.into(),
            author: author.into(),
            cover_image: None,
            availability: true,
        }
    }

    #[test]
    fn test_selected_book_follows_sort_and_search() {
        let books = vec![
            book("1", "Persuasion", "Jane Austen"),
            book("2", "Dune", "Frank Herbert"),
            book("3", "Emma", "Jane Austen"),
        ];
        let mut view = CatalogView {
            sort: CatalogSort::Title,
            ..CatalogView::default()
        };
        assert_eq!(view.selected_book(&books).map(|b| b.title.as_str()), Some("Dune"));

        view.paste("austen");
        assert_eq!(view.visible(&books).len(), 2);
        assert_eq!(view.selected_book(&books).map(|b| b.title.as_str()), Some("Emma"));
    }

    #[test]
    fn test_selected_index_clamps() {
        let view = CatalogView {
            selected: 7,
            ..CatalogView::default()
        };
        assert_eq!(view.selected_index(3), Some(2));
        assert_eq!(view.selected_index(0), None);
    }
}
