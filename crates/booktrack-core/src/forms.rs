//! Client-side form validation.
//!
//! A form that fails validation never reaches the network; the caller gets
//! per-field messages to show next to the inputs.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{Credentials, NewBook};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// Raw input of the add-book form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub availability: bool,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            cover_image: String::new(),
            availability: true,
        }
    }
}

/// Field errors of the add-book form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFormErrors {
    pub title: Option<&'static str>,
    pub author: Option<&'static str>,
}

impl BookFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

impl BookForm {
    /// Checks required fields and produces the trimmed create payload.
    ///
    /// # Errors
    /// Returns the field errors when title or author is blank.
    pub fn validate(&self) -> Result<NewBook, BookFormErrors> {
        let title = self.title.trim();
        let author = self.author.trim();
        let errors = BookFormErrors {
            title: title.is_empty().then_some("Title is required"),
            author: author.is_empty().then_some("Author is required"),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let cover = self.cover_image.trim();
        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            cover_image: (!cover.is_empty()).then(|| cover.to_string()),
            availability: self.availability,
        })
    }
}

/// Field errors of the login and register forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl CredentialErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Validates login/register input.
///
/// # Errors
/// Returns the field errors for a missing or malformed email, or a missing or
/// short password.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, CredentialErrors> {
    let email_error = if email.is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Email is invalid")
    } else {
        None
    };

    let password_error = if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    };

    let errors = CredentialErrors {
        email: email_error,
        password: password_error,
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_form_requires_title_and_author() {
        let form = BookForm {
            title: "   ".into(),
            author: String::new(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.title, Some("Title is required"));
        assert_eq!(errors.author, Some("Author is required"));

        let form = BookForm {
            title: "Dune".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.title, None);
        assert_eq!(errors.author, Some("Author is required"));
    }

    #[test]
    fn test_book_form_trims_and_drops_empty_cover() {
        let form = BookForm {
            title: "  Dune ".into(),
            author: " Frank Herbert".into(),
            cover_image: "  ".into(),
            availability: false,
        };
        let book = form.validate().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.cover_image, None);
        assert!(!book.availability);
    }

    #[test]
    fn test_book_form_keeps_cover_url() {
        let form = BookForm {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover_image: " https://img.example/dune.jpg ".into(),
            availability: true,
        };
        assert_eq!(
            form.validate().unwrap().cover_image.as_deref(),
            Some("https://img.example/dune.jpg")
        );
    }

    #[test]
    fn test_credentials_messages() {
        let errors = validate_credentials("", "").unwrap_err();
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.password, Some("Password is required"));

        let errors = validate_credentials("not-an-email", "12345").unwrap_err();
        assert_eq!(errors.email, Some("Email is invalid"));
        assert_eq!(
            errors.password,
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_valid_credentials_pass_through() {
        let creds = validate_credentials("reader@example.com", "secret1").unwrap();
        assert_eq!(creds.email, "reader@example.com");
        assert_eq!(creds.password, "secret1");
    }
}
