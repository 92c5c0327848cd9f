//! Catalog feature slice (the home screen).
//!
//! ## Module Structure
//!
//! - `state.rs`: CatalogView (search, sort, selection)
//! - `update.rs`: Key handling
//! - `render.rs`: Book table and header

mod render;
mod state;
mod update;

pub use render::render_catalog;
pub use state::CatalogView;
pub use update::handle_key;
