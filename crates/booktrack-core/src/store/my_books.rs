use super::{Action, AuthAction, Phase};
use crate::api::{BookId, MyBookEntry, Rating, ReadingStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum MyBooksAction {
    Fetch(Phase<Vec<MyBookEntry>>),
    Add {
        book_id: BookId,
        phase: Phase<MyBookEntry>,
    },
    UpdateStatus {
        book_id: BookId,
        phase: Phase<ReadingStatus>,
    },
    UpdateRating {
        book_id: BookId,
        phase: Phase<Rating>,
    },
    ClearError,
}

/// Personal collection slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyBooksState {
    pub entries: Vec<MyBookEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MyBooksState {
    /// Entry for a catalog book, matched on the embedded book id.
    pub fn entry(&self, book_id: &BookId) -> Option<&MyBookEntry> {
        self.entries.iter().find(|e| &e.book.id == book_id)
    }

    fn entry_mut(&mut self, book_id: &BookId) -> Option<&mut MyBookEntry> {
        self.entries.iter_mut().find(|e| &e.book.id == book_id)
    }
}

pub(super) fn reduce(state: &mut MyBooksState, action: &Action) {
    match action {
        Action::Auth(AuthAction::Logout | AuthAction::FetchCurrentUser(Phase::Rejected(_))) => {
            state.entries.clear();
            state.loading = false;
        }
        Action::MyBooks(action) => reduce_own(state, action),
        _ => {}
    }
}

fn reduce_own(state: &mut MyBooksState, action: &MyBooksAction) {
    match action {
        MyBooksAction::Fetch(phase) => match phase {
            Phase::Pending => {
                state.loading = true;
                state.error = None;
            }
            Phase::Fulfilled(entries) => {
                state.loading = false;
                state.entries.clone_from(entries);
            }
            Phase::Rejected(message) => fail(state, message),
        },
        MyBooksAction::Add { phase, .. } => match phase {
            Phase::Pending => {}
            Phase::Fulfilled(entry) => state.entries.push(entry.clone()),
            Phase::Rejected(message) => fail(state, message),
        },
        MyBooksAction::UpdateStatus { book_id, phase } => match phase {
            Phase::Pending => {}
            Phase::Fulfilled(status) => match state.entry_mut(book_id) {
                Some(entry) => entry.status = *status,
                None => tracing::warn!(%book_id, "status update for an entry no longer in the collection"),
            },
            Phase::Rejected(message) => fail(state, message),
        },
        MyBooksAction::UpdateRating { book_id, phase } => match phase {
            Phase::Pending => {}
            Phase::Fulfilled(rating) => match state.entry_mut(book_id) {
                Some(entry) => entry.rating = *rating,
                None => tracing::warn!(%book_id, "rating update for an entry no longer in the collection"),
            },
            Phase::Rejected(message) => fail(state, message),
        },
        MyBooksAction::ClearError => state.error = None,
    }
}

fn fail(state: &mut MyBooksState, message: &str) {
    tracing::warn!(error = message, "collection request failed");
    state.loading = false;
    state.error = Some(message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::entry;

    fn apply(state: &mut MyBooksState, action: MyBooksAction) {
        reduce(state, &Action::MyBooks(action));
    }

    fn populated() -> MyBooksState {
        MyBooksState {
            entries: vec![
                entry("b1", "Dune", ReadingStatus::WantToRead),
                entry("b2", "Emma", ReadingStatus::Read),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_replaces_collection() {
        let mut state = populated();
        apply(&mut state, MyBooksAction::Fetch(Phase::Pending));
        assert!(state.loading);
        apply(
            &mut state,
            MyBooksAction::Fetch(Phase::Fulfilled(vec![entry("b3", "Ulysses", ReadingStatus::Dropped)])),
        );
        assert!(!state.loading);
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].book.title, "Ulysses");
    }

    #[test]
    fn test_pending_mutations_do_not_toggle_loading() {
        let mut state = populated();
        let id = BookId::from("b1");
        apply(
            &mut state,
            MyBooksAction::Add {
                book_id: BookId::from("b3"),
                phase: Phase::Pending,
            },
        );
        apply(
            &mut state,
            MyBooksAction::UpdateStatus {
                book_id: id.clone(),
                phase: Phase::Pending,
            },
        );
        apply(
            &mut state,
            MyBooksAction::UpdateRating {
                book_id: id,
                phase: Phase::Pending,
            },
        );
        assert!(!state.loading);
    }

    #[test]
    fn test_add_appends_entry() {
        let mut state = populated();
        apply(
            &mut state,
            MyBooksAction::Add {
                book_id: BookId::from("b3"),
                phase: Phase::Fulfilled(entry("b3", "Ulysses", ReadingStatus::WantToRead)),
            },
        );
        assert_eq!(state.entries.len(), 3);
        assert!(state.entry(&BookId::from("b3")).is_some());
    }

    #[test]
    fn test_updates_find_entry_by_book_id() {
        let mut state = populated();
        apply(
            &mut state,
            MyBooksAction::UpdateStatus {
                book_id: BookId::from("b1"),
                phase: Phase::Fulfilled(ReadingStatus::CurrentlyReading),
            },
        );
        apply(
            &mut state,
            MyBooksAction::UpdateRating {
                book_id: BookId::from("b2"),
                phase: Phase::Fulfilled(Rating::new(4).unwrap()),
            },
        );
        assert_eq!(state.entries[0].status, ReadingStatus::CurrentlyReading);
        assert_eq!(state.entries[1].rating.get(), 4);
    }

    #[test]
    fn test_update_for_vanished_entry_is_noop() {
        let mut state = populated();
        let before = state.clone();
        apply(
            &mut state,
            MyBooksAction::UpdateRating {
                book_id: BookId::from("gone"),
                phase: Phase::Fulfilled(Rating::new(5).unwrap()),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_mutation_rejection_sets_error() {
        let mut state = populated();
        apply(
            &mut state,
            MyBooksAction::UpdateStatus {
                book_id: BookId::from("b1"),
                phase: Phase::Rejected("Failed to update status".into()),
            },
        );
        assert_eq!(state.error.as_deref(), Some("Failed to update status"));
        assert_eq!(state.entries[0].status, ReadingStatus::WantToRead);
    }

    #[test]
    fn test_logout_and_failed_user_fetch_clear_entries() {
        let mut state = populated();
        reduce(&mut state, &Action::Auth(AuthAction::Logout));
        assert!(state.entries.is_empty());

        let mut state = populated();
        reduce(
            &mut state,
            &Action::Auth(AuthAction::FetchCurrentUser(Phase::Rejected("x".into()))),
        );
        assert!(state.entries.is_empty());

        let mut state = populated();
        reduce(
            &mut state,
            &Action::Auth(AuthAction::FetchCurrentUser(Phase::Pending)),
        );
        assert_eq!(state.entries.len(), 2);
    }
}
