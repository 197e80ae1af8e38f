//! Pieces module - tetromino shapes and the active piece
//!
//! Every kind has four rotation states stored in a precomputed lookup table
//! (kind x rotation -> shape). Each state is the 90° clockwise rotation of the
//! previous one inside the kind's square bounding box, so rotating four times is the
//! identity. No matrix math happens at runtime.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece origin (top-left of the bounding box)
pub type MinoOffset = (i8, i8);

/// A rotation state: four minos inside a `size x size` bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub minos: [MinoOffset; 4],
    pub size: u8,
}

impl Shape {
    const fn new(size: u8, minos: [MinoOffset; 4]) -> Self {
        Self { minos, size }
    }

    /// The 0/1 matrix for this state, `size` rows of `size` columns
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        let n = self.size as usize;
        let mut rows = vec![vec![0u8; n]; n];
        for &(dx, dy) in &self.minos {
            rows[dy as usize][dx as usize] = 1;
        }
        rows
    }

    /// Leftmost and rightmost occupied columns
    pub fn column_span(&self) -> (i8, i8) {
        self.minos
            .iter()
            .fold((i8::MAX, i8::MIN), |(lo, hi), &(dx, _)| (lo.min(dx), hi.max(dx)))
    }

    /// Same minos rotated 90° clockwise inside the bounding box
    pub fn rotated_cw(&self) -> Shape {
        let last = self.size as i8 - 1;
        let mut minos = self.minos.map(|(x, y)| (last - y, x));
        minos.sort_by_key(|&(x, y)| (y, x));
        Shape::new(self.size, minos)
    }

    /// Minos in reading order, for comparing shapes regardless of listing order
    pub fn normalized(&self) -> Shape {
        let mut minos = self.minos;
        minos.sort_by_key(|&(x, y)| (y, x));
        Shape::new(self.size, minos)
    }
}

/// Shape table indexed by `[kind.index()][rotation.index()]`
const SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        Shape::new(4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        Shape::new(4, [(2, 0), (2, 1), (2, 2), (2, 3)]),
        Shape::new(4, [(0, 2), (1, 2), (2, 2), (3, 2)]),
        Shape::new(4, [(1, 0), (1, 1), (1, 2), (1, 3)]),
    ],
    // O
    [
        Shape::new(2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        Shape::new(2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        Shape::new(2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        Shape::new(2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
    ],
    // T
    [
        Shape::new(3, [(1, 0), (0, 1), (1, 1), (2, 1)]),
        Shape::new(3, [(1, 0), (1, 1), (2, 1), (1, 2)]),
        Shape::new(3, [(0, 1), (1, 1), (2, 1), (1, 2)]),
        Shape::new(3, [(1, 0), (0, 1), (1, 1), (1, 2)]),
    ],
    // S
    [
        Shape::new(3, [(1, 0), (2, 0), (0, 1), (1, 1)]),
        Shape::new(3, [(1, 0), (1, 1), (2, 1), (2, 2)]),
        Shape::new(3, [(1, 1), (2, 1), (0, 2), (1, 2)]),
        Shape::new(3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
    ],
    // Z
    [
        Shape::new(3, [(0, 0), (1, 0), (1, 1), (2, 1)]),
        Shape::new(3, [(2, 0), (1, 1), (2, 1), (1, 2)]),
        Shape::new(3, [(0, 1), (1, 1), (1, 2), (2, 2)]),
        Shape::new(3, [(1, 0), (0, 1), (1, 1), (0, 2)]),
    ],
    // J
    [
        Shape::new(3, [(0, 0), (0, 1), (1, 1), (2, 1)]),
        Shape::new(3, [(1, 0), (2, 0), (1, 1), (1, 2)]),
        Shape::new(3, [(0, 1), (1, 1), (2, 1), (2, 2)]),
        Shape::new(3, [(1, 0), (1, 1), (0, 2), (1, 2)]),
    ],
    // L
    [
        Shape::new(3, [(2, 0), (0, 1), (1, 1), (2, 1)]),
        Shape::new(3, [(1, 0), (1, 1), (1, 2), (2, 2)]),
        Shape::new(3, [(0, 1), (1, 1), (2, 1), (0, 2)]),
        Shape::new(3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
    ],
];

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> Shape {
    SHAPES[kind.index()][rotation.index()]
}

/// Spawn row for new pieces
pub const SPAWN_Y: i8 = 0;

/// Spawn column: the bounding box centered horizontally, rounding left
pub fn spawn_x(kind: PieceKind, board_width: u8) -> i8 {
    let size = get_shape(kind, Rotation::North).size;
    ((board_width - size) / 2) as i8
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the top-center of a board of the given width
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_x(kind, board_width),
            y: SPAWN_Y,
        }
    }

    /// Shape of the current rotation
    pub fn shape(&self) -> Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().minos.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
