//! Application store.
//!
//! `AppState` holds three slices (auth, catalog, personal collection). Every
//! mutation goes through [`AppState::dispatch`], which forwards the action to
//! each slice reducer; a slice only reacts to the actions it cares about and
//! never writes another slice's state.
//!
//! Async operations are modeled as [`Request`]s. A request has a pending
//! action (dispatched before the HTTP call) and resolves to a
//! completion action (fulfilled or rejected). The TUI runs the two halves in
//! its reducer and runtime; the CLI uses [`AppState::run`].

mod auth;
mod books;
mod my_books;
mod request;

pub use auth::{AuthAction, AuthState};
pub use books::{BooksAction, BooksState};
pub use my_books::{MyBooksAction, MyBooksState};
pub use request::Request;

use crate::api::{ApiClient, BookId};
use crate::session::SessionStore;

/// Lifecycle of an async operation as seen by the reducers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    /// Carries the user-facing failure message.
    Rejected(String),
}

impl<T> Phase<T> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Phase::Rejected(_))
    }
}

/// Everything a reducer can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Books(BooksAction),
    MyBooks(MyBooksAction),
}

/// Local refusal of a request, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("not logged in")]
    NotAuthenticated,
    #[error("book {book_id} is not in your collection")]
    EntryNotFound { book_id: BookId },
}

/// Root state: one field per slice.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub books: BooksState,
    pub my_books: MyBooksState,
}

impl AppState {
    /// Fresh state, authenticated iff a token is present.
    pub fn new(token: Option<String>) -> Self {
        Self {
            auth: AuthState::with_token(token),
            books: BooksState::default(),
            my_books: MyBooksState::default(),
        }
    }

    /// Fresh state seeded from the persisted session.
    pub fn from_session(session: &SessionStore) -> Self {
        Self::new(session.token_or_none())
    }

    /// Folds an action into every slice.
    pub fn dispatch(&mut self, action: Action) {
        auth::reduce(&mut self.auth, &action);
        books::reduce(&mut self.books, &action);
        my_books::reduce(&mut self.my_books, &action);
    }

    /// Local guards for a request.
    ///
    /// # Errors
    /// `NotAuthenticated` for collection requests without a session, and
    /// `EntryNotFound` for status/rating updates of untracked books.
    pub fn check(&self, request: &Request) -> Result<(), StoreError> {
        if request.requires_auth() && !self.auth.is_authenticated {
            return Err(StoreError::NotAuthenticated);
        }
        match request {
            Request::UpdateStatus { book_id, .. } | Request::UpdateRating { book_id, .. }
                if self.my_books.entry(book_id).is_none() =>
            {
                Err(StoreError::EntryNotFound {
                    book_id: book_id.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Runs a request to completion: guard, pending, HTTP call, completion.
    ///
    /// Returns the failure message of a rejected request, if any.
    ///
    /// # Errors
    /// Returns the guard error; the request is not sent in that case.
    pub async fn run(
        &mut self,
        client: &ApiClient,
        request: Request,
    ) -> Result<Option<String>, StoreError> {
        self.check(&request)?;
        self.dispatch(request.pending());
        let completion = request.execute(client).await;
        let failure = completion.failure().map(str::to_string);
        self.dispatch(completion);
        Ok(failure)
    }

    /// Logs out without touching the network.
    ///
    /// The persisted token is removed; a failure to do so is logged and
    /// otherwise ignored.
    pub fn logout(&mut self, session: &SessionStore) {
        if let Err(err) = session.clear_token() {
            tracing::warn!(error = %err, "failed to remove persisted session");
        }
        self.dispatch(Action::Auth(AuthAction::Logout));
    }
}

impl Action {
    /// The rejection message, if this is a rejected completion.
    pub fn failure(&self) -> Option<&str> {
        fn rejected<T>(phase: &Phase<T>) -> Option<&str> {
            match phase {
                Phase::Rejected(message) => Some(message),
                _ => None,
            }
        }

        match self {
            Action::Auth(AuthAction::Register(p)) => rejected(p),
            Action::Auth(AuthAction::Login(p)) => rejected(p),
            Action::Auth(AuthAction::FetchCurrentUser(p)) => rejected(p),
            Action::Books(BooksAction::Fetch(p)) => rejected(p),
            Action::Books(BooksAction::Create(p)) => rejected(p),
            Action::MyBooks(MyBooksAction::Fetch(p)) => rejected(p),
            Action::MyBooks(MyBooksAction::Add { phase, .. }) => rejected(phase),
            Action::MyBooks(MyBooksAction::UpdateStatus { phase, .. }) => rejected(phase),
            Action::MyBooks(MyBooksAction::UpdateRating { phase, .. }) => rejected(phase),
            Action::Auth(AuthAction::Logout | AuthAction::ClearError)
            | Action::Books(BooksAction::ClearError)
            | Action::MyBooks(MyBooksAction::ClearError) => None,
        }
    }
}
