use super::{Action, AuthAction, BooksAction, MyBooksAction, Phase};
use crate::api::{ApiClient, ApiError, BookId, Credentials, NewBook, Rating, ReadingStatus};

/// An async store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Register(Credentials),
    Login(Credentials),
    FetchCurrentUser,
    FetchBooks,
    CreateBook(NewBook),
    FetchMyBooks,
    AddToMyBooks(BookId),
    UpdateStatus {
        book_id: BookId,
        status: ReadingStatus,
    },
    UpdateRating {
        book_id: BookId,
        rating: Rating,
    },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Register(_) => "register",
            Request::Login(_) => "login",
            Request::FetchCurrentUser => "fetch_current_user",
            Request::FetchBooks => "fetch_books",
            Request::CreateBook(_) => "create_book",
            Request::FetchMyBooks => "fetch_my_books",
            Request::AddToMyBooks(_) => "add_to_my_books",
            Request::UpdateStatus { .. } => "update_status",
            Request::UpdateRating { .. } => "update_rating",
        }
    }

    /// Message used when the server doesn't provide one.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Request::Register(_) => "Registration failed",
            Request::Login(_) => "Login failed",
            Request::FetchCurrentUser => "Failed to get user data",
            Request::FetchBooks => "Failed to fetch books",
            Request::CreateBook(_) => "Failed to create book",
            Request::FetchMyBooks => "Failed to fetch my books",
            Request::AddToMyBooks(_) => "Failed to add book",
            Request::UpdateStatus { .. } => "Failed to update status",
            Request::UpdateRating { .. } => "Failed to update rating",
        }
    }

    /// Whether the request only makes sense with a session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Request::FetchCurrentUser
                | Request::FetchMyBooks
                | Request::AddToMyBooks(_)
                | Request::UpdateStatus { .. }
                | Request::UpdateRating { .. }
        )
    }

    /// Action to dispatch before the call is sent.
    pub fn pending(&self) -> Action {
        match self {
            Request::Register(_) => Action::Auth(AuthAction::Register(Phase::Pending)),
            Request::Login(_) => Action::Auth(AuthAction::Login(Phase::Pending)),
            Request::FetchCurrentUser => Action::Auth(AuthAction::FetchCurrentUser(Phase::Pending)),
            Request::FetchBooks => Action::Books(BooksAction::Fetch(Phase::Pending)),
            Request::CreateBook(_) => Action::Books(BooksAction::Create(Phase::Pending)),
            Request::FetchMyBooks => Action::MyBooks(MyBooksAction::Fetch(Phase::Pending)),
            Request::AddToMyBooks(book_id) => Action::MyBooks(MyBooksAction::Add {
                book_id: book_id.clone(),
                phase: Phase::Pending,
            }),
            Request::UpdateStatus { book_id, .. } => Action::MyBooks(MyBooksAction::UpdateStatus {
                book_id: book_id.clone(),
                phase: Phase::Pending,
            }),
            Request::UpdateRating { book_id, .. } => Action::MyBooks(MyBooksAction::UpdateRating {
                book_id: book_id.clone(),
                phase: Phase::Pending,
            }),
        }
    }

    /// Performs the HTTP call and returns the completion action.
    ///
    /// Never fails: errors become a rejected completion carrying the server
    /// message or the request's fallback message. Session side effects
    /// happen here: a successful login persists the token and a failed
    /// current-user lookup removes it.
    pub async fn execute(self, client: &ApiClient) -> Action {
        let fallback = self.fallback_message();
        let name = self.name();
        let reject = |err: ApiError| -> String {
            tracing::warn!(request = name, error = %err, "request rejected");
            err.message_or(fallback)
        };

        match self {
            Request::Register(credentials) => {
                let phase = phase(client.register(&credentials).await, reject);
                Action::Auth(AuthAction::Register(phase))
            }
            Request::Login(credentials) => {
                let result = match client.login(&credentials).await {
                    Ok(response) => client
                        .session()
                        .save_token(&response.token)
                        .map(|()| response)
                        .map_err(|err| ApiError::Session(format!("{err:#}"))),
                    Err(err) => Err(err),
                };
                Action::Auth(AuthAction::Login(phase(result, reject)))
            }
            Request::FetchCurrentUser => {
                let result = client.current_user().await;
                if result.is_err()
                    && let Err(err) = client.session().clear_token()
                {
                    tracing::warn!(error = %err, "failed to remove persisted session");
                }
                Action::Auth(AuthAction::FetchCurrentUser(phase(result, reject)))
            }
            Request::FetchBooks => {
                let phase = phase(client.list_books().await, reject);
                Action::Books(BooksAction::Fetch(phase))
            }
            Request::CreateBook(book) => {
                let phase = phase(client.create_book(&book).await, reject);
                Action::Books(BooksAction::Create(phase))
            }
            Request::FetchMyBooks => {
                let phase = phase(client.list_my_books().await, reject);
                Action::MyBooks(MyBooksAction::Fetch(phase))
            }
            Request::AddToMyBooks(book_id) => {
                let phase = phase(client.add_to_my_books(&book_id).await, reject);
                Action::MyBooks(MyBooksAction::Add { book_id, phase })
            }
            Request::UpdateStatus { book_id, status } => {
                let result = client.update_status(&book_id, status).await.map(|()| status);
                Action::MyBooks(MyBooksAction::UpdateStatus {
                    book_id,
                    phase: phase(result, reject),
                })
            }
            Request::UpdateRating { book_id, rating } => {
                let result = client.update_rating(&book_id, rating).await.map(|()| rating);
                Action::MyBooks(MyBooksAction::UpdateRating {
                    book_id,
                    phase: phase(result, reject),
                })
            }
        }
    }
}

fn phase<T>(result: Result<T, ApiError>, reject: impl FnOnce(ApiError) -> String) -> Phase<T> {
    match result {
        Ok(value) => Phase::Fulfilled(value),
        Err(err) => Phase::Rejected(reject(err)),
    }
}
