//! Personal collection feature slice ("My Books").
//!
//! ## Module Structure
//!
//! - `state.rs`: CollectionView (status filter, search, sort, selection)
//! - `update.rs`: Key handling, including status and rating changes
//! - `render.rs`: Stats header and entry list

mod render;
mod state;
mod update;

pub use render::render_collection;
pub use state::CollectionView;
pub use update::handle_key;
