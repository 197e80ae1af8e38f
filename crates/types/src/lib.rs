//! Core types module - shared data structures and constants
//!
//! This crate defines the value types used throughout the workspace. They carry no
//! behavior beyond conversions, so the simulation core, the placement planner and any
//! rendering host can all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! Canonical playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Progression Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORES` | 0/100/300/500/800 | Base points for 0-4 lines, times level |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//! | `SOFT_DROP_POINTS` | 1 | Points per row of soft drop |
//! | `HARD_DROP_POINTS` | 2 | Points per row of hard drop |
//!
//! # Examples
//!
//! ```
//! use tetromino_types::{Cell, Color, GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), Color::Purple);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert!(Cell::Filled(Color::Red).is_filled());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Line clear base points indexed by the number of rows cleared in one lock.
///
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lines that must be cleared to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Points per row moved by a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row moved by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// A single lock can complete at most this many rows (a tetromino spans four rows)
pub const MAX_LINES_PER_LOCK: usize = 4;

/// Color tag carried by a filled cell.
///
/// Each tetromino kind has a fixed color. `code()` gives the compact numeric form used
/// in snapshots, where `0` is reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Numeric code in `1..=7`
    pub fn code(self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Yellow => 2,
            Color::Purple => 3,
            Color::Green => 4,
            Color::Red => 5,
            Color::Blue => 6,
            Color::Orange => 7,
        }
    }

    /// Inverse of [`Color::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Cyan),
            2 => Some(Color::Yellow),
            3 => Some(Color::Purple),
            4 => Some(Color::Green),
            5 => Some(Color::Red),
            6 => Some(Color::Blue),
            7 => Some(Color::Orange),
            _ => None,
        }
    }
}

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }

    /// Snapshot code: `0` for empty, otherwise the color code
    pub fn code(self) -> u8 {
        self.color().map_or(0, Color::code)
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, one per quarter turn
///
/// - **North**: Spawn orientation (rotation index 0, 0°)
/// - **East**: 90° clockwise (index 1)
/// - **South**: 180° (index 2)
/// - **West**: 270° clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotation index in `0..4`
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index, reduced modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands a driver can issue to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// One natural gravity step
    GravityTick,
    /// Start a fresh game
    Reset,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotatecw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" | "rotate" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "gravitytick" | "tick" => Some(GameAction::GravityTick),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::GravityTick => "gravityTick",
            GameAction::Reset => "reset",
        }
    }
}

/// Externally visible session phase.
///
/// Locking happens inside a single command and is never observable between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// Created but no piece spawned yet
    Spawning,
    /// A piece is falling and accepts commands
    Falling,
    /// Terminal: the last spawn collided. Only a reset leaves this state.
    GameOver,
}

/// Contract violations against a board.
///
/// These indicate a bug in the caller, never a reachable player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },
    #[error("board is {found_width}x{found_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u8,
        expected_height: u8,
        found_width: u8,
        found_height: u8,
    },
    #[error("row {0} is already full")]
    FullRow(i8),
}
