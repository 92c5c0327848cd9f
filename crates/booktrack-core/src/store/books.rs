use super::{Action, Phase};
use crate::api::Book;

#[derive(Debug, Clone, PartialEq)]
pub enum BooksAction {
    Fetch(Phase<Vec<Book>>),
    Create(Phase<Book>),
    ClearError,
}

/// Shared catalog slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooksState {
    pub books: Vec<Book>,
    pub loading: bool,
    pub error: Option<String>,
}

pub(super) fn reduce(state: &mut BooksState, action: &Action) {
    let Action::Books(action) = action else {
        return;
    };

    match action {
        BooksAction::Fetch(phase) => match phase {
            Phase::Pending => start(state),
            Phase::Fulfilled(books) => {
                state.loading = false;
                state.books.clone_from(books);
            }
            Phase::Rejected(message) => fail(state, message),
        },
        BooksAction::Create(phase) => match phase {
            Phase::Pending => start(state),
            Phase::Fulfilled(book) => {
                state.loading = false;
                state.books.push(book.clone());
            }
            Phase::Rejected(message) => fail(state, message),
        },
        BooksAction::ClearError => state.error = None,
    }
}

fn start(state: &mut BooksState) {
    state.loading = true;
    state.error = None;
}

fn fail(state: &mut BooksState, message: &str) {
    tracing::warn!(error = message, "catalog request failed");
    state.loading = false;
    state.error = Some(message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::book;

    fn apply(state: &mut BooksState, action: BooksAction) {
        reduce(state, &Action::Books(action));
    }

    #[test]
    fn test_fetch_replaces_catalog() {
        let mut state = BooksState {
            books: vec![book("old", "Old")],
            ..Default::default()
        };
        apply(&mut state, BooksAction::Fetch(Phase::Pending));
        assert!(state.loading);

        apply(
            &mut state,
            BooksAction::Fetch(Phase::Fulfilled(vec![book("1", "Dune"), book("2", "Emma")])),
        );
        assert!(!state.loading);
        assert_eq!(state.books.len(), 2);
        assert_eq!(state.books[0].title, "Dune");
    }

    #[test]
    fn test_create_appends() {
        let mut state = BooksState {
            books: vec![book("1", "Dune")],
            ..Default::default()
        };
        apply(&mut state, BooksAction::Create(Phase::Pending));
        apply(&mut state, BooksAction::Create(Phase::Fulfilled(book("2", "Emma"))));
        assert_eq!(state.books.len(), 2);
        assert_eq!(state.books[1].title, "Emma");
    }

    #[test]
    fn test_failure_keeps_books_and_sets_error() {
        let mut state = BooksState {
            books: vec![book("1", "Dune")],
            ..Default::default()
        };
        apply(&mut state, BooksAction::Create(Phase::Pending));
        apply(
            &mut state,
            BooksAction::Create(Phase::Rejected("Failed to create book".into())),
        );
        assert_eq!(state.books.len(), 1);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to create book"));

        apply(&mut state, BooksAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_ignores_other_slices() {
        let mut state = BooksState::default();
        reduce(&mut state, &Action::Auth(crate::store::AuthAction::Logout));
        assert_eq!(state, BooksState::default());
    }
}
