//! Wire types for the book-tracking API.
//!
//! Every endpoint gets an explicit DTO. Payloads that don't match are
//! rejected at the boundary as `ApiError::Decode`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned book identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A book in the shared catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(alias = "_id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(
        rename = "coverImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub availability: bool,
}

/// Payload for `POST /books`.
///
/// Built through [`crate::forms::BookForm::validate`], which guarantees a
/// non-empty title and author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub availability: bool,
}

/// The authenticated user, as returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
}

/// Body of `POST /auth/register` and `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response of `POST /auth/register`. Servers vary in what they return here,
/// so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reading status of a collection entry.
///
/// Serialized with the labels the server stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "Want to Read")]
    WantToRead,
    #[serde(rename = "Currently Reading")]
    CurrentlyReading,
    #[serde(rename = "Read")]
    Read,
    #[serde(rename = "Dropped")]
    Dropped,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::WantToRead,
        ReadingStatus::CurrentlyReading,
        ReadingStatus::Read,
        ReadingStatus::Dropped,
    ];

    /// The wire label, also used for display and lexicographic sorting.
    pub fn label(self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to Read",
            ReadingStatus::CurrentlyReading => "Currently Reading",
            ReadingStatus::Read => "Read",
            ReadingStatus::Dropped => "Dropped",
        }
    }

    /// Command-line friendly name.
    pub fn slug(self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "want-to-read",
            ReadingStatus::CurrentlyReading => "currently-reading",
            ReadingStatus::Read => "read",
            ReadingStatus::Dropped => "dropped",
        }
    }

    /// Next status in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ReadingStatus::WantToRead => ReadingStatus::CurrentlyReading,
            ReadingStatus::CurrentlyReading => ReadingStatus::Read,
            ReadingStatus::Read => ReadingStatus::Dropped,
            ReadingStatus::Dropped => ReadingStatus::WantToRead,
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    /// Accepts wire labels ("Want to Read") and slugs ("want-to-read"),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "want-to-read" | "want" => Ok(ReadingStatus::WantToRead),
            "currently-reading" | "reading" => Ok(ReadingStatus::CurrentlyReading),
            "read" => Ok(ReadingStatus::Read),
            "dropped" => Ok(ReadingStatus::Dropped),
            _ => Err(format!(
                "unknown status '{s}' (expected want-to-read, currently-reading, read or dropped)"
            )),
        }
    }
}

/// Error returned when a rating falls outside `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 0 and 5, got {0}")]
pub struct RatingOutOfRange(pub i64);

/// Star rating in `0..=5`, where 0 means "not rated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    /// # Errors
    /// Returns `RatingOutOfRange` for values above 5.
    pub fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_rated(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(RatingOutOfRange(value)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A book in the user's personal collection.
///
/// The server embeds the full book under `bookId`; a bare id there fails
/// to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyBookEntry {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "bookId")]
    pub book: Book,
    pub status: ReadingStatus,
    #[serde(default)]
    pub rating: Rating,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /mybooks/:bookId/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ReadingStatus,
}

/// Body of `PATCH /mybooks/:bookId/rating`.
#[derive(Debug, Clone, Serialize)]
pub struct RatingUpdate {
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_book_accepts_mongo_style_id() {
        let book: Book = serde_json::from_value(json!({
            "_id": "b1",
            "title": "Dune",
            "author": "Frank Herbert",
            "availability": true
        }))
        .unwrap();
        assert_eq!(book.id, BookId::from("b1"));
        assert_eq!(book.cover_image, None);
        assert!(book.availability);
    }

    #[test]
    fn test_entry_requires_embedded_book() {
        let result: Result<MyBookEntry, _> = serde_json::from_value(json!({
            "_id": "e1",
            "bookId": "b1",
            "status": "Read",
            "rating": 3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_decodes_full_payload() {
        let entry: MyBookEntry = serde_json::from_value(json!({
            "_id": "e1",
            "bookId": {"_id": "b1", "title": "Dune", "author": "Frank Herbert", "availability": false},
            "status": "Currently Reading",
            "rating": 4,
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.book.title, "Dune");
        assert_eq!(entry.status, ReadingStatus::CurrentlyReading);
        assert_eq!(entry.rating.get(), 4);
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_entry_rejects_out_of_range_rating() {
        let result: Result<MyBookEntry, _> = serde_json::from_value(json!({
            "_id": "e1",
            "bookId": {"_id": "b1", "title": "Dune", "author": "Frank Herbert"},
            "status": "Read",
            "rating": 9
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_parses_labels_and_slugs() {
        assert_eq!(
            "Want to Read".parse::<ReadingStatus>().unwrap(),
            ReadingStatus::WantToRead
        );
        assert_eq!(
            "currently-reading".parse::<ReadingStatus>().unwrap(),
            ReadingStatus::CurrentlyReading
        );
        assert_eq!("READ".parse::<ReadingStatus>().unwrap(), ReadingStatus::Read);
        assert!("finished".parse::<ReadingStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_to_label() {
        let body = serde_json::to_value(StatusUpdate {
            status: ReadingStatus::WantToRead,
        })
        .unwrap();
        assert_eq!(body, json!({"status": "Want to Read"}));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(Rating::new(6), Err(RatingOutOfRange(6)));
        assert_eq!(Rating::try_from(-1), Err(RatingOutOfRange(-1)));
    }

    #[test]
    fn test_new_book_omits_missing_cover() {
        let body = serde_json::to_value(NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover_image: None,
            availability: true,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"title": "Dune", "author": "Frank Herbert", "availability": true})
        );
    }
}
