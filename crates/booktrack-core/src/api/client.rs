//! HTTP client for the book-tracking REST API.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    Book, BookId, Credentials, LoginResponse, MyBookEntry, NewBook, Rating, RatingUpdate,
    ReadingStatus, RegisterResponse, StatusUpdate, User,
};
use crate::session::SessionStore;

/// Typed client over the REST endpoints.
///
/// Attaches `Authorization: Bearer <token>` to every call while the session
/// store holds a token. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// `POST /auth/register`
    pub async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, ApiError> {
        let endpoint = "/auth/register";
        let body = self
            .execute(self.http.post(self.url(endpoint)).json(credentials), endpoint)
            .await?;
        if body.trim().is_empty() {
            return Ok(RegisterResponse::default());
        }
        decode(endpoint, &body)
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let endpoint = "/auth/login";
        self.send_json(self.http.post(self.url(endpoint)).json(credentials), endpoint)
            .await
    }

    /// `GET /auth/me`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let endpoint = "/auth/me";
        self.send_json(self.http.get(self.url(endpoint)), endpoint)
            .await
    }

    /// `GET /books`
    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let endpoint = "/books";
        self.send_json(self.http.get(self.url(endpoint)), endpoint)
            .await
    }

    /// `POST /books`
    pub async fn create_book(&self, book: &NewBook) -> Result<Book, ApiError> {
        let endpoint = "/books";
        self.send_json(self.http.post(self.url(endpoint)).json(book), endpoint)
            .await
    }

    /// `GET /mybooks`
    pub async fn list_my_books(&self) -> Result<Vec<MyBookEntry>, ApiError> {
        let endpoint = "/mybooks";
        self.send_json(self.http.get(self.url(endpoint)), endpoint)
            .await
    }

    /// `POST /mybooks/:bookId`
    pub async fn add_to_my_books(&self, book_id: &BookId) -> Result<MyBookEntry, ApiError> {
        let endpoint = format!("/mybooks/{book_id}");
        let request = self
            .http
            .post(self.url(&endpoint))
            .json(&serde_json::json!({}));
        self.send_json(request, &endpoint).await
    }

    /// `PATCH /mybooks/:bookId/status`. The response body is ignored.
    pub async fn update_status(
        &self,
        book_id: &BookId,
        status: ReadingStatus,
    ) -> Result<(), ApiError> {
        let endpoint = format!("/mybooks/{book_id}/status");
        let request = self
            .http
            .patch(self.url(&endpoint))
            .json(&StatusUpdate { status });
        self.execute(request, &endpoint).await.map(|_| ())
    }

    /// `PATCH /mybooks/:bookId/rating`. The response body is ignored.
    pub async fn update_rating(&self, book_id: &BookId, rating: Rating) -> Result<(), ApiError> {
        let endpoint = format!("/mybooks/{book_id}/rating");
        let request = self
            .http
            .patch(self.url(&endpoint))
            .json(&RatingUpdate { rating });
        self.execute(request, &endpoint).await.map(|_| ())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute(request, endpoint).await?;
        decode(endpoint, &body)
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> Result<String, ApiError> {
        let request = match self.session.token_or_none() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|err| {
            tracing::debug!(endpoint, error = %err, "request failed");
            ApiError::from(err)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(endpoint, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::decode(endpoint, err.to_string()))
}
