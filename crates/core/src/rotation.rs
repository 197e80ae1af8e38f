//! Rotation system - next rotation state plus wall-kick resolution
//!
//! A rotation looks up the target state's shape and tries it at a short ordered list of
//! origin offsets. The first collision-free offset wins; if none fits the rotation is
//! rejected and the piece is left untouched.
//!
//! The offset list comes from a [`KickStrategy`]. [`SimpleKicks`] is the default:
//! same origin, then one column left, one right, two left, two right. [`SrsKicks`]
//! carries the per-kind, per-transition tables of the Super Rotation System
//! (Reference: https://tetris.wiki/SRS) for callers that want them.

use tracing::trace;

use crate::board::Board;
use crate::collision::can_place;
use crate::pieces::ActivePiece;
use crate::types::{PieceKind, Rotation};

/// Origin offset `(dx, dy)` tried during a rotation, y growing downward
pub type KickOffset = (i8, i8);

/// Source of ordered wall-kick candidates
pub trait KickStrategy {
    /// Offsets to try, in priority order, for `kind` rotating from `from` to `to`.
    /// The list should start with `(0, 0)` for an unkicked rotation to be preferred.
    fn offsets(&self, kind: PieceKind, from: Rotation, to: Rotation) -> &[KickOffset];
}

/// Same origin, then left 1, right 1, left 2, right 2, for every kind and transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleKicks;

const SIMPLE_KICKS: [KickOffset; 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

impl KickStrategy for SimpleKicks {
    fn offsets(&self, _kind: PieceKind, _from: Rotation, _to: Rotation) -> &[KickOffset] {
        &SIMPLE_KICKS
    }
}

/// Super Rotation System kick tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrsKicks;

/// Indexed by [`transition_index`]
type KickTable = [[KickOffset; 5]; 8];

/// O piece never kicks
const O_KICKS: [KickOffset; 1] = [(0, 0)];

// Published tables use y-up; these rows are negated on y for the y-down board.
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Row of the kick tables for a quarter-turn transition.
/// Returns `None` for a 180° or identity transition, which SRS does not define.
fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    let clockwise = from.rotate_cw() == to;
    if !clockwise && from.rotate_ccw() != to {
        return None;
    }
    Some(match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    })
}

impl KickStrategy for SrsKicks {
    fn offsets(&self, kind: PieceKind, from: Rotation, to: Rotation) -> &[KickOffset] {
        let Some(idx) = transition_index(from, to) else {
            return &O_KICKS;
        };
        match kind {
            PieceKind::O => &O_KICKS,
            PieceKind::I => &I_KICKS[idx],
            _ => &JLSTZ_KICKS[idx],
        }
    }
}

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub piece: ActivePiece,
    /// The offset that was accepted
    pub kick: KickOffset,
}

/// Try to rotate `piece` one quarter turn, resolving wall kicks with `kicks`.
///
/// Returns `None` if every candidate offset collides.
pub fn try_rotate<K: KickStrategy + ?Sized>(
    board: &Board,
    piece: &ActivePiece,
    clockwise: bool,
    kicks: &K,
) -> Option<Rotated> {
    let to = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };
    let shape = crate::pieces::get_shape(piece.kind, to);

    for &(dx, dy) in kicks.offsets(piece.kind, piece.rotation, to) {
        let x = piece.x + dx;
        let y = piece.y + dy;
        if can_place(board, &shape, x, y) {
            if (dx, dy) != (0, 0) {
                trace!(kind = ?piece.kind, dx, dy, "wall kick accepted");
            }
            return Some(Rotated {
                piece: ActivePiece {
                    rotation: to,
                    x,
                    y,
                    ..*piece
                },
                kick: (dx, dy),
            });
        }
    }

    None
}
