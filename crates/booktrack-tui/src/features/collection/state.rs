use booktrack_core::api::MyBookEntry;
use booktrack_core::view::{CollectionQuery, SortKey, StatusFilter};

use crate::common::TextField;

/// Local view state of the "My Books" screen.
#[derive(Debug, Clone, Default)]
pub struct CollectionView {
    pub filter: StatusFilter,
    pub search: TextField,
    pub searching: bool,
    pub sort: SortKey,
    pub selected: usize,
}

impl CollectionView {
    pub fn with_sort(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn query(&self) -> CollectionQuery {
        CollectionQuery {
            status: self.filter,
            search: self.search.value().to_string(),
            sort: self.sort,
        }
    }

    pub fn visible<'a>(&self, entries: &'a [MyBookEntry]) -> Vec<&'a MyBookEntry> {
        self.query().apply(entries)
    }

    pub fn selected_entry<'a>(&self, entries: &'a [MyBookEntry]) -> Option<&'a MyBookEntry> {
        let visible = self.visible(entries);
        let idx = self.selected_index(visible.len())?;
        visible.get(idx).copied()
    }

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
    use booktrack_core::api::{Book, BookId, Rating, ReadingStatus};

    use super::*;

    fn entry(id: &str, title: &str, status: ReadingStatus, rating: u8) -> MyBookEntry {
        MyBookEntry {
            id: format!("e-{id}"),
            book: Book {
                id: BookId::from(id),
                title: title.into(),
                author: "Someone".into(),
                cover_image: None,
                availability: true,
            },
            status,
            rating: Rating::new(rating).unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn test_filter_and_rating_sort() {
        let entries = vec![
            entry("1", "Dune", ReadingStatus::Read, 3),
            entry("2", "Emma", ReadingStatus::WantToRead, 0),
            entry("3", "Ulysses", ReadingStatus::Read, 5),
        ];
        let view = CollectionView {
            filter: StatusFilter::Only(ReadingStatus::Read),
            ..CollectionView::with_sort(SortKey::Rating)
        };
        let titles: Vec<&str> = view
            .visible(&entries)
            .iter()
            .map(|e| e.book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Ulysses", "Dune"]);
        assert_eq!(
            view.selected_entry(&entries).map(|e| e.book.id.as_str()),
            Some("3")
        );
    }

    #[test]
    fn test_selected_entry_clamps_after_list_shrinks() {
        let entries = vec![entry("1", "Dune", ReadingStatus::Read, 0)];
        let view = CollectionView {
            selected: 4,
            ..CollectionView::default()
        };
        assert_eq!(
            view.selected_entry(&entries).map(|e| e.book.id.as_str()),
            Some("1")
        );
    }
}
