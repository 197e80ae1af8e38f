//! Placement: drive the active piece to a target rotation and column, then hard drop.
//!
//! A placement is all or nothing. If any step fails the session is restored to the state
//! it had before the call.

use tracing::debug;

use tetromino_core::{KickStrategy, Session};

use crate::types::{Rotation, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate the active piece to `target_rot`, move it to column `target_x`, hard drop.
///
/// The shorter rotation direction is tried first; if kicks block it, the other direction
/// is tried from the original state.
pub fn apply_place<K: KickStrategy + Clone>(
    session: &mut Session<K>,
    target_x: i8,
    target_rot: Rotation,
) -> Result<(), PlaceError> {
    let before = session.clone();
    let result = place_inner(session, target_x, target_rot);
    if let Err(err) = result {
        debug!(target_x, ?target_rot, code = err.code(), "placement rejected");
        *session = before;
    }
    result
}

fn place_inner<K: KickStrategy + Clone>(
    session: &mut Session<K>,
    target_x: i8,
    target_rot: Rotation,
) -> Result<(), PlaceError> {
    if session.state() != SessionState::Falling {
        return Err(PlaceError::NotPlayable);
    }
    let Some(active0) = session.active() else {
        return Err(PlaceError::NoActive);
    };

    let cur = active0.rotation.index() as i8;
    let tgt = target_rot.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    // for 180 both are 2
    let mut plans = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let start = session.clone();
    let mut rotated = false;
    for (is_cw, steps) in plans {
        *session = start.clone();
        let ok = (0..steps).all(|_| {
            if is_cw {
                session.rotate()
            } else {
                session.rotate_ccw()
            }
        });
        if ok {
            rotated = true;
            break;
        }
    }
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = session.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.rotation != target_rot {
        return Err(PlaceError::RotationBlocked);
    }

    let (min_dx, max_dx) = active.shape().column_span();
    // i16: target_x can be any i8
    let width = session.board().width() as i16;
    let target = target_x as i16;
    if target + (min_dx as i16) < 0 || target + (max_dx as i16) >= width {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target - active.x as i16;
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx > 0 {
            session.move_right()
        } else {
            session.move_left()
        };
        if !moved {
            return Err(PlaceError::XBlocked);
        }
    }

    if !session.hard_drop() {
        return Err(PlaceError::NotPlayable);
    }

    Ok(())
}
