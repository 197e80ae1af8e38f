//! Placement engine built on top of the core rules.
//!
//! - [`place`]: execute a (column, rotation) placement atomically
//! - [`planner`]: pick the best placement for the active piece

pub mod place;
pub mod planner;

pub use tetromino_types as types;

pub use place::{apply_place, PlaceError};
pub use planner::{best_placement, evaluate, BoardFeatures, Placement};
