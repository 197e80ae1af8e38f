//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else. It has no
//! timers, no rendering and no I/O: a driver feeds commands and gravity ticks into a
//! [`Session`] and reads back a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: the settled-cell grid, row queries and row removal
//! - [`pieces`]: tetromino shapes in all four rotation states and spawn placement
//! - [`collision`]: placement checks and ghost (landing row) computation
//! - [`rotation`]: rotation with pluggable wall-kick strategies
//! - [`lock`]: merging a piece into the board and clearing full rows
//! - [`scoring`]: line-clear points, drop bonuses, level and gravity interval
//! - [`rng`]: seeded piece selection
//! - [`session`]: the game state machine and its commands
//! - [`snapshot`]: serializable view of a session
//!
//! # Example
//!
//! ```
//! use tetromino_core::{Session, SessionConfig};
//! use tetromino_core::types::GameAction;
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(12345));
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateCw);
//! session.apply_action(GameAction::HardDrop);
//!
//! // hard drop awards two points per row
//! assert!(session.score() > 0);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod lock;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetromino_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{can_place, ghost_y, piece_fits};
pub use config::SessionConfig;
pub use lock::ClearedRows;
pub use pieces::{get_shape, ActivePiece, Shape};
pub use rng::{PieceSource, Randomizer, SimpleRng};
pub use rotation::{try_rotate, KickStrategy, Rotated, SimpleKicks, SrsKicks};
pub use scoring::{ClearResult, Progression};
pub use session::{LockEvent, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
