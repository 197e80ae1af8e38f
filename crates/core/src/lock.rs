//! Lock and line-clear engine.
//!
//! Locking writes the piece into the board, then removes every row it completed. All
//! full rows are identified first and only then removed, top-most first, so each
//! recorded index still points at the row it named when the scan ran.

use arrayvec::ArrayVec;
use tracing::warn;

use crate::board::Board;
use crate::pieces::ActivePiece;
use crate::types::{Cell, MAX_LINES_PER_LOCK};

/// Rows removed by one lock, bottom to top, as indices before removal
pub type ClearedRows = ArrayVec<i8, MAX_LINES_PER_LOCK>;

/// Write the piece's minos into the board with its color.
///
/// Minos above the top edge are skipped; a piece that locks partly above the board
/// leaves only its visible part behind. Returns the number of cells written.
pub fn merge_piece(board: &mut Board, piece: &ActivePiece) -> usize {
    let cell = Cell::Filled(piece.kind.color());
    let mut written = 0;
    for (x, y) in piece.cells() {
        if y < 0 {
            continue;
        }
        match board.set_cell(x, y, cell) {
            Ok(()) => written += 1,
            Err(err) => warn!(%err, kind = ?piece.kind, "mino skipped during lock"),
        }
    }
    written
}

/// Remove every full row and compact the rows above it.
pub fn clear_full_rows(board: &mut Board) -> ClearedRows {
    let cleared = board.full_rows();
    for &y in cleared.iter().rev() {
        let removed = board.remove_row(y);
        debug_assert!(removed.is_ok(), "full row {} is off the board", y);
    }
    cleared
}

/// Merge the piece and clear the rows it completed
pub fn lock_piece(board: &mut Board, piece: &ActivePiece) -> ClearedRows {
    merge_piece(board, piece);
    clear_full_rows(board)
}
