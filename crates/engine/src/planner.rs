//! Greedy placement search.
//!
//! Every reachable (rotation, column) pair for the active piece is tried on a cloned
//! session and the resulting board is scored with the classic four-feature heuristic:
//!
//! ```text
//! 0.760666 * lines - 0.510066 * aggregate_height - 0.35663 * holes - 0.184483 * bumpiness
//! ```
//!
//! Placements that end the game score negative infinity.

use tracing::trace;

use tetromino_core::{Board, KickStrategy, Session};

use crate::place::apply_place;
use crate::types::Rotation;

const LINES_WEIGHT: f32 = 0.760666;
const HEIGHT_WEIGHT: f32 = -0.510066;
const HOLES_WEIGHT: f32 = -0.35663;
const BUMPINESS_WEIGHT: f32 = -0.184483;

/// A candidate placement and its evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: i8,
    pub rotation: Rotation,
    pub score: f32,
}

/// Board features used by the heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub fn of(board: &Board) -> Self {
        let heights: Vec<u32> = (0..board.width() as i8)
            .map(|x| board.column_height(x) as u32)
            .collect();
        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();

        Self {
            aggregate_height: heights.iter().sum(),
            holes: board.hole_count() as u32,
            bumpiness,
        }
    }
}

/// Heuristic value of a board after a placement that cleared `lines`
pub fn evaluate(board: &Board, lines: usize) -> f32 {
    let features = BoardFeatures::of(board);
    LINES_WEIGHT * lines as f32
        + HEIGHT_WEIGHT * features.aggregate_height as f32
        + HOLES_WEIGHT * features.holes as f32
        + BUMPINESS_WEIGHT * features.bumpiness as f32
}

/// Best placement for the active piece, or `None` if nothing can be placed
pub fn best_placement<K: KickStrategy + Clone>(session: &Session<K>) -> Option<Placement> {
    let width = session.board().width() as i8;
    let mut best: Option<Placement> = None;

    for rot_index in 0..4 {
        let rotation = Rotation::from_index(rot_index);
        for x in -3..width {
            let mut trial = session.clone();
            if apply_place(&mut trial, x, rotation).is_err() {
                continue;
            }
            let Some(event) = trial.take_last_event() else {
                continue;
            };

            let score = if event.game_over {
                f32::NEG_INFINITY
            } else {
                evaluate(trial.board(), event.lines_cleared())
            };
            trace!(x, ?rotation, score, "candidate");

            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement { x, rotation, score });
            }
        }
    }

    best
}
