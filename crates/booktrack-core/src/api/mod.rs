//! REST API access: typed client, wire DTOs and the error type.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    Book, BookId, Credentials, LoginResponse, MyBookEntry, NewBook, Rating, RatingOutOfRange,
    RatingUpdate, ReadingStatus, RegisterResponse, StatusUpdate, User,
};
