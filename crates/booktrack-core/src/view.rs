//! Derived view logic shared by the TUI and the CLI.
//!
//! Everything here is a pure function of store state plus a query, recomputed
//! on every render.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::{Book, BookId, MyBookEntry, ReadingStatus};

/// Sort order for the personal collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Status,
    /// Highest rating first.
    Rating,
    /// Most recently added first; entries without a date go last.
    #[serde(rename = "date")]
    DateAdded,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Status,
        SortKey::Rating,
        SortKey::DateAdded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Status => "status",
            SortKey::Rating => "rating",
            SortKey::DateAdded => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Author => "Author",
            SortKey::Status => "Status",
            SortKey::Rating => "Rating",
            SortKey::DateAdded => "Date Added",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "status" => Ok(SortKey::Status),
            "rating" => Ok(SortKey::Rating),
            "date" | "date-added" | "dateadded" => Ok(SortKey::DateAdded),
            _ => Err(format!(
                "unknown sort '{s}' (expected title, author, status, rating or date)"
            )),
        }
    }
}

/// Sort order for the shared catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSort {
    /// Server order.
    #[default]
    Listed,
    Title,
    Author,
}

impl CatalogSort {
    pub fn name(self) -> &'static str {
        match self {
            CatalogSort::Listed => "listed",
            CatalogSort::Title => "title",
            CatalogSort::Author => "author",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            CatalogSort::Listed => CatalogSort::Title,
            CatalogSort::Title => CatalogSort::Author,
            CatalogSort::Author => CatalogSort::Listed,
        }
    }
}

impl fmt::Display for CatalogSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listed" | "none" => Ok(CatalogSort::Listed),
            "title" => Ok(CatalogSort::Title),
            "author" => Ok(CatalogSort::Author),
            _ => Err(format!(
                "unknown sort '{s}' (expected listed, title or author)"
            )),
        }
    }
}

/// Status filter for the collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReadingStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ReadingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// All, then each status in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(ReadingStatus::WantToRead),
            StatusFilter::Only(ReadingStatus::Dropped) => StatusFilter::All,
            StatusFilter::Only(status) => StatusFilter::Only(status.next()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<ReadingStatus>().map(StatusFilter::Only)
    }
}

/// Filter + sort applied to the personal collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub status: StatusFilter,
    pub search: String,
    pub sort: SortKey,
}

impl CollectionQuery {
    pub fn matches(&self, entry: &MyBookEntry) -> bool {
        self.status.matches(entry.status) && matches_search(&entry.book, &self.search)
    }

    /// Entries passing the filter, sorted (stable) by the query's key.
    pub fn apply<'a>(&self, entries: &'a [MyBookEntry]) -> Vec<&'a MyBookEntry> {
        let mut visible: Vec<&MyBookEntry> = entries.iter().filter(|e| self.matches(e)).collect();
        visible.sort_by(|a, b| compare_entries(a, b, self.sort));
        visible
    }
}

/// Search + sort applied to the shared catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub sort: CatalogSort,
}

impl CatalogQuery {
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        let mut visible: Vec<&Book> = books
            .iter()
            .filter(|b| matches_search(b, &self.search))
            .collect();
        match self.sort {
            CatalogSort::Listed => {}
            CatalogSort::Title => visible.sort_by(|a, b| compare_text(&a.title, &b.title)),
            CatalogSort::Author => visible.sort_by(|a, b| compare_text(&a.author, &b.author)),
        }
        visible
    }
}

/// Case-insensitive substring match on title or author. Empty query matches all.
pub fn matches_search(book: &Book, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
}

/// Case-insensitive ordering with a case-sensitive tie-break, so the result
/// is total and deterministic.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_entries(a: &MyBookEntry, b: &MyBookEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => compare_text(&a.book.title, &b.book.title),
        SortKey::Author => compare_text(&a.book.author, &b.book.author),
        SortKey::Status => compare_text(a.status.label(), b.status.label()),
        SortKey::Rating => b.rating.cmp(&a.rating),
        SortKey::DateAdded => match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Whether a catalog book is already in the collection.
pub fn is_tracked(entries: &[MyBookEntry], book_id: &BookId) -> bool {
    entries.iter().any(|e| &e.book.id == book_id)
}

/// Summary counts for the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub want_to_read: usize,
    pub currently_reading: usize,
    pub read: usize,
    pub dropped: usize,
    /// Entries with a rating above 0.
    pub rated: usize,
}

impl CollectionStats {
    pub fn from_entries(entries: &[MyBookEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, entry| {
            stats.total += 1;
            match entry.status {
                ReadingStatus::WantToRead => stats.want_to_read += 1,
                ReadingStatus::CurrentlyReading => stats.currently_reading += 1,
                ReadingStatus::Read => stats.read += 1,
                ReadingStatus::Dropped => stats.dropped += 1,
            }
            if entry.rating.is_rated() {
                stats.rated += 1;
            }
            stats
        })
    }

    pub fn count(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::WantToRead => self.want_to_read,
            ReadingStatus::CurrentlyReading => self.currently_reading,
            ReadingStatus::Read => self.read,
            ReadingStatus::Dropped => self.dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::api::Rating;

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: BookId::from(id),
            title: title.into(),
            author: author.into(),
            cover_image: None,
            availability: true,
        }
    }

    fn entry(id: &str, title: &str, status: ReadingStatus, rating: u8) -> MyBookEntry {
        MyBookEntry {
            id: format!("e-{id}"),
            book: book(id, title, "Author"),
            status,
            rating: Rating::new(rating).unwrap(),
            created_at: None,
        }
    }

    fn sample() -> Vec<MyBookEntry> {
        vec![
            entry("1", "Dune", ReadingStatus::WantToRead, 0),
            entry("2", "Emma", ReadingStatus::WantToRead, 2),
            entry("3", "Ulysses", ReadingStatus::CurrentlyReading, 0),
            entry("4", "Beloved", ReadingStatus::Read, 5),
            entry("5", "Carrie", ReadingStatus::Dropped, 1),
        ]
    }

    #[test]
    fn test_status_filter_counts() {
        let entries = sample();
        let read = CollectionQuery {
            status: StatusFilter::Only(ReadingStatus::Read),
            ..Default::default()
        };
        assert_eq!(read.apply(&entries).len(), 1);

        let all = CollectionQuery::default();
        assert_eq!(all.apply(&entries).len(), 5);
    }

    #[test]
    fn test_search_matches_title_or_author_case_insensitive() {
        let mut entries = sample();
        entries[0].book.author = "Frank Herbert".into();
        let query = CollectionQuery {
            search: "herb".into(),
            ..Default::default()
        };
        let visible = query.apply(&entries);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].book.title, "Dune");

        let query = CollectionQuery {
            search: "EMM".into(),
            ..Default::default()
        };
        assert_eq!(query.apply(&entries).len(), 1);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let entries = sample();
        let query = CollectionQuery {
            status: StatusFilter::Only(ReadingStatus::WantToRead),
            search: "dune".into(),
            sort: SortKey::Title,
        };
        assert_eq!(query.apply(&entries).len(), 1);
    }

    #[test]
    fn test_rating_sort_descending() {
        let entries = vec![
            entry("a", "A", ReadingStatus::Read, 3),
            entry("b", "B", ReadingStatus::Read, 0),
            entry("c", "C", ReadingStatus::Read, 5),
            entry("d", "D", ReadingStatus::Read, 1),
        ];
        let query = CollectionQuery {
            sort: SortKey::Rating,
            ..Default::default()
        };
        let ratings: Vec<u8> = query.apply(&entries).iter().map(|e| e.rating.get()).collect();
        assert_eq!(ratings, vec![5, 3, 1, 0]);
    }

    #[test]
    fn test_title_sort_is_case_insensitive_with_tiebreak() {
        let entries = vec![
            entry("1", "banana", ReadingStatus::Read, 0),
            entry("2", "Apple", ReadingStatus::Read, 0),
            entry("3", "apple", ReadingStatus::Read, 0),
        ];
        let query = CollectionQuery::default();
        let titles: Vec<&str> = query
            .apply(&entries)
            .iter()
            .map(|e| e.book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Apple", "apple", "banana"]);
    }

    #[test]
    fn test_status_sort_uses_labels() {
        let entries = sample();
        let query = CollectionQuery {
            sort: SortKey::Status,
            ..Default::default()
        };
        let statuses: Vec<ReadingStatus> = query.apply(&entries).iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ReadingStatus::CurrentlyReading,
                ReadingStatus::Dropped,
                ReadingStatus::Read,
                ReadingStatus::WantToRead,
                ReadingStatus::WantToRead,
            ]
        );
    }

    #[test]
    fn test_date_sort_newest_first_missing_last() {
        let mut entries = vec![
            entry("old", "Old", ReadingStatus::Read, 0),
            entry("none", "None", ReadingStatus::Read, 0),
            entry("new", "New", ReadingStatus::Read, 0),
        ];
        entries[0].created_at = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        entries[2].created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let query = CollectionQuery {
            sort: SortKey::DateAdded,
            ..Default::default()
        };
        let titles: Vec<&str> = query
            .apply(&entries)
            .iter()
            .map(|e| e.book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["New", "Old", "None"]);
    }

    #[test]
    fn test_catalog_query_search_and_sort() {
        let books = vec![
            book("1", "Dune", "Herbert"),
            book("2", "emma", "Austen"),
            book("3", "Carrie", "King"),
        ];

        let listed = CatalogQuery::default();
        let ids: Vec<&str> = listed.apply(&books).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let by_author = CatalogQuery {
            search: String::new(),
            sort: CatalogSort::Author,
        };
        let ids: Vec<&str> = by_author.apply(&books).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        let search = CatalogQuery {
            search: "  KING ".into(),
            sort: CatalogSort::Listed,
        };
        assert_eq!(search.apply(&books).len(), 1);
    }

    #[test]
    fn test_stats_and_tracking() {
        let entries = sample();
        let stats = CollectionStats::from_entries(&entries);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.count(ReadingStatus::WantToRead), 2);
        assert_eq!(stats.read, 1);
        assert_eq!(stats.rated, 3);

        assert!(is_tracked(&entries, &BookId::from("4")));
        assert!(!is_tracked(&entries, &BookId::from("99")));
    }

    #[test]
    fn test_cycles_wrap_around() {
        assert_eq!(SortKey::DateAdded.next(), SortKey::Title);
        assert_eq!(CatalogSort::Author.next(), CatalogSort::Listed);
        let mut filter = StatusFilter::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::DateAdded);
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert!("pages".parse::<SortKey>().is_err());
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "read".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ReadingStatus::Read)
        );
    }
}
