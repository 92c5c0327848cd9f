//! Login and register forms.
//!
//! Both screens share one form type; `AuthFormKind` picks the title, the
//! submit label and the request sent.

mod render;
mod state;
mod update;

pub use render::render_auth_form;
pub use state::{AuthField, AuthForm, AuthFormKind};
pub use update::handle_key;
