//! Snapshot module - serializable view of a session

use serde::{Deserialize, Serialize};

use crate::pieces::ActivePiece;
use crate::types::{PieceKind, Rotation, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Board coordinates of the minos
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Everything a renderer needs for one frame.
///
/// `board` is row-major, `width * height` long, `0` for empty and the color code
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub state: SessionState,
    pub episode: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Cell code at `(x, y)`, `None` outside the board
    pub fn code_at(&self, x: i8, y: i8) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Falling
    }
}
