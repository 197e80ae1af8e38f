//! Tetromino (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the headless simulator.

pub use tetromino_core as core;
pub use tetromino_engine as engine;
pub use tetromino_host as host;
pub use tetromino_types as types;

pub mod sim;
