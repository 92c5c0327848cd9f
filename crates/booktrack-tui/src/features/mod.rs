//! Feature slices for the TUI (state/update/render per slice).

pub mod auth;
pub mod catalog;
pub mod collection;
pub mod navbar;

pub use auth::{AuthField, AuthForm, AuthFormKind};
pub use catalog::CatalogView;
pub use collection::CollectionView;
