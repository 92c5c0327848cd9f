//! Auth form key handling.

use booktrack_core::forms::{CredentialErrors, validate_credentials};
use booktrack_core::store::{Action, AuthAction, Request};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{AuthForm, AuthFormKind};
use crate::update::Command;

/// Handles a key on the login or register screen.
///
/// With no field focused only `Enter`, `Tab` and `i` are taken (they focus
/// the form); everything else falls through to navigation.
pub fn handle_key(form: &mut AuthForm, loading: bool, key: KeyEvent) -> Option<Vec<Command>> {
    if !form.is_editing() {
        return match key.code {
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char('i') => {
                form.focus_first();
                Some(vec![])
            }
            _ => None,
        };
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => form.focus = None,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
        KeyCode::Char('t') if ctrl => form.show_password = !form.show_password,
        KeyCode::Enter => return Some(submit(form, loading)),
        _ => {
            form.clear_focused_error();
            if let Some(field) = form.focused_field() {
                field.handle_key(key);
            }
        }
    }
    Some(vec![])
}

fn submit(form: &mut AuthForm, loading: bool) -> Vec<Command> {
    if loading {
        return vec![];
    }
    let mut commands = vec![Command::Dispatch(Action::Auth(AuthAction::ClearError))];
    match validate_credentials(form.email.value(), form.password.value()) {
        Ok(credentials) => {
            form.errors = CredentialErrors::default();
            commands.push(Command::Request(match form.kind {
                AuthFormKind::Login => Request::Login(credentials),
                AuthFormKind::Register => Request::Register(credentials),
            }));
        }
        Err(errors) => form.errors = errors,
    }
    commands
}

#[cfg(test)]
mod tests {
    use booktrack_core::api::Credentials;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut AuthForm, text: &str) {
        for ch in text.chars() {
            handle_key(form, false, key(KeyCode::Char(ch)));
        }
    }

    fn filled(kind: AuthFormKind) -> AuthForm {
        let mut form = AuthForm::new(kind);
        form.focus_first();
        type_str(&mut form, "reader@example.com");
        handle_key(&mut form, false, key(KeyCode::Tab));
        type_str(&mut form, "hunter22");
        form
    }

    #[test]
    fn test_unfocused_form_lets_navigation_through() {
        let mut form = AuthForm::new(AuthFormKind::Login);
        assert_eq!(handle_key(&mut form, false, key(KeyCode::Char('h'))), None);
        assert_eq!(handle_key(&mut form, false, key(KeyCode::Enter)), Some(vec![]));
        assert!(form.is_editing());
    }

    #[test]
    fn test_register_submits_register_request() {
        let mut form = filled(AuthFormKind::Register);
        let commands = handle_key(&mut form, false, key(KeyCode::Enter));
        assert_eq!(
            commands,
            Some(vec![
                Command::Dispatch(Action::Auth(AuthAction::ClearError)),
                Command::Request(Request::Register(Credentials {
                    email: "reader@example.com".into(),
                    password: "hunter22".into(),
                })),
            ])
        );
    }

    #[test]
    fn test_short_password_is_rejected_locally() {
        let mut form = AuthForm::new(AuthFormKind::Login);
        form.focus_first();
        type_str(&mut form, "reader@example.com");
        handle_key(&mut form, false, key(KeyCode::Down));
        type_str(&mut form, "abc");
        let commands = handle_key(&mut form, false, key(KeyCode::Enter)).unwrap_or_default();
        assert!(!commands.iter().any(|c| matches!(c, Command::Request(_))));
        assert_eq!(
            form.errors.password,
            Some("Password must be at least 6 characters")
        );
        assert_eq!(form.errors.email, None);
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut form = filled(AuthFormKind::Login);
        assert_eq!(handle_key(&mut form, true, key(KeyCode::Enter)), Some(vec![]));
    }

    #[test]
    fn test_esc_releases_focus_and_keeps_input() {
        let mut form = filled(AuthFormKind::Login);
        handle_key(&mut form, false, key(KeyCode::Esc));
        assert!(!form.is_editing());
        assert_eq!(form.password.value(), "hunter22");
    }
}
