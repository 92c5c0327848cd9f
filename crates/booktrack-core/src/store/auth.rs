use super::{Action, Phase};
use crate::api::{LoginResponse, RegisterResponse, User};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Register(Phase<RegisterResponse>),
    Login(Phase<LoginResponse>),
    FetchCurrentUser(Phase<User>),
    Logout,
    ClearError,
}

/// Authentication slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            is_authenticated: token.is_some(),
            token,
            ..Self::default()
        }
    }
}

pub(super) fn reduce(state: &mut AuthState, action: &Action) {
    let Action::Auth(action) = action else {
        return;
    };

    match action {
        AuthAction::Register(phase) => match phase {
            Phase::Pending => {
                state.loading = true;
                state.error = None;
            }
            Phase::Fulfilled(_) => state.loading = false,
            Phase::Rejected(message) => fail(state, message),
        },
        AuthAction::Login(phase) => match phase {
            Phase::Pending => {
                state.loading = true;
                state.error = None;
            }
            Phase::Fulfilled(response) => {
                state.loading = false;
                state.token = Some(response.token.clone());
                state.is_authenticated = true;
                if let Some(user) = &response.user {
                    state.user = Some(user.clone());
                }
            }
            Phase::Rejected(message) => fail(state, message),
        },
        AuthAction::FetchCurrentUser(phase) => match phase {
            Phase::Pending => state.loading = true,
            Phase::Fulfilled(user) => {
                state.loading = false;
                state.user = Some(user.clone());
                state.is_authenticated = true;
            }
            Phase::Rejected(message) => {
                fail(state, message);
                state.is_authenticated = false;
                state.token = None;
                state.user = None;
            }
        },
        AuthAction::Logout => {
            state.user = None;
            state.token = None;
            state.is_authenticated = false;
        }
        AuthAction::ClearError => state.error = None,
    }
}

fn fail(state: &mut AuthState, message: &str) {
    tracing::warn!(error = message, "auth request failed");
    state.loading = false;
    state.error = Some(message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut AuthState, action: AuthAction) {
        reduce(state, &Action::Auth(action));
    }

    #[test]
    fn test_seeded_from_token() {
        assert!(AuthState::with_token(Some("t".into())).is_authenticated);
        assert!(!AuthState::with_token(None).is_authenticated);
    }

    #[test]
    fn test_login_lifecycle() {
        let mut state = AuthState::default();
        state.error = Some("old".into());

        apply(&mut state, AuthAction::Login(Phase::Pending));
        assert!(state.loading);
        assert_eq!(state.error, None);

        apply(
            &mut state,
            AuthAction::Login(Phase::Fulfilled(LoginResponse {
                token: "tok".into(),
                user: None,
            })),
        );
        assert!(!state.loading);
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_register_does_not_authenticate() {
        let mut state = AuthState::default();
        apply(&mut state, AuthAction::Register(Phase::Pending));
        apply(
            &mut state,
            AuthAction::Register(Phase::Fulfilled(RegisterResponse {
                token: Some("ignored".into()),
                ..Default::default()
            })),
        );
        assert!(!state.loading);
        assert!(!state.is_authenticated);
        assert_eq!(state.token, None);
    }

    #[test]
    fn test_rejection_sets_error_until_cleared() {
        let mut state = AuthState::default();
        apply(&mut state, AuthAction::Login(Phase::Pending));
        apply(
            &mut state,
            AuthAction::Login(Phase::Rejected("Invalid credentials".into())),
        );
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));

        apply(&mut state, AuthAction::ClearError);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_current_user_rejection_logs_out() {
        let mut state = AuthState::with_token(Some("stale".into()));
        apply(&mut state, AuthAction::FetchCurrentUser(Phase::Pending));
        assert!(state.loading);
        apply(
            &mut state,
            AuthAction::FetchCurrentUser(Phase::Rejected("Failed to get user data".into())),
        );
        assert!(!state.is_authenticated);
        assert_eq!(state.token, None);
        assert!(!state.loading);
    }

    #[test]
    fn test_current_user_fulfilled_sets_user() {
        let mut state = AuthState::with_token(Some("tok".into()));
        apply(
            &mut state,
            AuthAction::FetchCurrentUser(Phase::Fulfilled(User {
                id: "u1".into(),
                email: "a@b.co".into(),
            })),
        );
        assert_eq!(state.user.as_ref().map(|u| u.email.as_str()), Some("a@b.co"));
        assert!(state.is_authenticated);
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut state = AuthState::with_token(Some("tok".into()));
        state.user = Some(User {
            id: "u1".into(),
            email: "a@b.co".into(),
        });
        apply(&mut state, AuthAction::Logout);
        assert_eq!(state, AuthState::default());
    }
}
