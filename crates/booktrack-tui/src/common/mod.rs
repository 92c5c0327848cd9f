//! Shared UI building blocks.

pub mod text;
pub mod text_field;

pub use text::{fit_width, truncate_with_ellipsis};
pub use text_field::TextField;
