use booktrack_core::forms::CredentialErrors;

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFormKind {
    Login,
    Register,
}

impl AuthFormKind {
    pub fn title(self) -> &'static str {
        match self {
            AuthFormKind::Login => "Login",
            AuthFormKind::Register => "Register",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            AuthFormKind::Login => "Logging in…",
            AuthFormKind::Register => "Registering…",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// Email/password form state.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub kind: AuthFormKind,
    pub email: TextField,
    pub password: TextField,
    /// Field capturing keys; `None` lets navigation keys through.
    pub focus: Option<AuthField>,
    pub show_password: bool,
    pub errors: CredentialErrors,
}

impl AuthForm {
    pub fn new(kind: AuthFormKind) -> Self {
        Self {
            kind,
            email: TextField::default(),
            password: TextField::default(),
            focus: None,
            show_password: false,
            errors: CredentialErrors::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    pub fn focus_first(&mut self) {
        self.focus = Some(AuthField::Email);
    }

    /// Clears input and errors, keeping the kind.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = Some(match self.focus {
            Some(AuthField::Email) => AuthField::Password,
            Some(AuthField::Password) | None => AuthField::Email,
        });
    }

    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus? {
            AuthField::Email => Some(&mut self.email),
            AuthField::Password => Some(&mut self.password),
        }
    }

    /// Drops the error of the focused field once the user edits it.
    pub fn clear_focused_error(&mut self) {
        match self.focus {
            Some(AuthField::Email) => self.errors.email = None,
            Some(AuthField::Password) => self.errors.password = None,
            None => {}
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.clear_focused_error();
        if let Some(field) = self.focused_field() {
            field.insert_str(text);
        }
    }
}
