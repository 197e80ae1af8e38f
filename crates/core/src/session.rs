//! Session module - the complete game state and its commands
//!
//! A [`Session`] owns the board, the falling piece, the next-piece preview, the piece
//! source and the progression counters. Every command runs to completion before
//! returning and either fully applies or changes nothing.
//!
//! Lifecycle: `Spawning` (created, nothing on the board yet) -> `start()` -> `Falling`.
//! A piece that can no longer move down is locked, completed rows are cleared and the
//! next piece spawns, all inside the command that caused it. If the spawned piece does
//! not fit, the session moves to the terminal `GameOver` state; afterwards every command
//! except [`Session::reset`] is rejected.
//!
//! The session has no timers. A driver calls [`Session::gravity_tick`] every
//! [`Session::drop_interval_ms`] and forwards input commands as they arrive; pausing
//! means not calling it.

use tracing::{debug, info};

use crate::board::Board;
use crate::collision::{can_place, drop_distance, ghost_y, piece_fits};
use crate::config::SessionConfig;
use crate::lock::{self, ClearedRows};
use crate::pieces::ActivePiece;
use crate::rng::PieceSource;
use crate::rotation::{try_rotate, KickStrategy, SimpleKicks};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{BoardError, GameAction, PieceKind, SessionState};

/// What happened when a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Rows removed, bottom to top, as indices before removal
    pub cleared_rows: ClearedRows,
    /// Points from the line-clear table
    pub line_clear_score: u32,
    /// Points from the drop that ended in this lock (hard drop only)
    pub drop_score: u32,
    pub leveled_up: bool,
    /// The next piece did not fit and the game ended
    pub game_over: bool,
}

impl LockEvent {
    /// Number of rows removed, 0 to 4
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<K = SimpleKicks> {
    config: SessionConfig,
    kicks: K,
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    pieces: PieceSource,
    progression: Progression,
    state: SessionState,
    /// Monotonic game counter (increments on reset).
    episode: u32,
    pieces_locked: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Session<SimpleKicks> {
    /// Create a session using the default left/right wall kicks
    pub fn new(config: SessionConfig) -> Self {
        Self::with_kicks(config, SimpleKicks)
    }
}

impl Default for Session<SimpleKicks> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<K: KickStrategy> Session<K> {
    /// Create a session with a custom kick strategy
    pub fn with_kicks(config: SessionConfig, kicks: K) -> Self {
        let mut pieces = PieceSource::new(config.randomizer.clone(), config.seed);
        let next = pieces.draw();

        Self {
            board: Board::with_size(config.width, config.height),
            config,
            kicks,
            active: None,
            next,
            pieces,
            progression: Progression::new(),
            state: SessionState::Spawning,
            episode: 0,
            pieces_locked: 0,
            last_event: None,
        }
    }

    /// Install a prepared board and return to an unstarted game.
    ///
    /// The board must match the configured dimensions and must not contain full rows.
    /// Progression, the lock counter and the last event are cleared and the session is
    /// put into `Spawning`, whatever state it was in; call [`Session::start`] to play.
    /// The piece stream and the episode counter carry over.
    pub fn with_board(mut self, board: Board) -> Result<Self, BoardError> {
        if board.width() != self.board.width() || board.height() != self.board.height() {
            return Err(BoardError::DimensionMismatch {
                expected_width: self.board.width(),
                expected_height: self.board.height(),
                found_width: board.width(),
                found_height: board.height(),
            });
        }
        if let Some(&y) = board.full_rows().first() {
            return Err(BoardError::FullRow(y));
        }

        self.board = board;
        self.active = None;
        self.progression = Progression::new();
        self.pieces_locked = 0;
        self.last_event = None;
        self.state = SessionState::Spawning;
        Ok(self)
    }

    /// Spawn the first piece. Returns false if the session already started or the
    /// first piece does not fit (which ends the game).
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Spawning {
            return false;
        }
        self.spawn_next()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn kicks(&self) -> &K {
        &self.kicks
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        self.progression.drop_interval_ms()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Row the active piece would land on if hard dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| ghost_y(&self.board, &piece))
    }

    /// The active piece moved to its landing row
    pub fn ghost_piece(&self) -> Option<ActivePiece> {
        self.active.map(|piece| ActivePiece {
            y: ghost_y(&self.board, &piece),
            ..piece
        })
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.codes(),
            active: self.active.map(ActiveSnapshot::from),
            ghost_y: self.ghost_y(),
            next: self.next,
            score: self.score(),
            level: self.level(),
            lines: self.lines(),
            drop_interval_ms: self.drop_interval_ms(),
            state: self.state,
            episode: self.episode,
            pieces_locked: self.pieces_locked,
        }
    }

    /// Active piece if commands are accepted right now
    fn playable(&self) -> Option<ActivePiece> {
        if self.state != SessionState::Falling {
            return None;
        }
        self.active
    }

    /// Promote the next piece to active and draw a new next
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.pieces.draw();

        let piece = ActivePiece::spawn(kind, self.board.width());
        if !piece_fits(&self.board, &piece) {
            self.active = None;
            self.state = SessionState::GameOver;
            info!(
                ?kind,
                score = self.score(),
                lines = self.lines(),
                level = self.level(),
                "spawn blocked, game over"
            );
            return false;
        }

        self.active = Some(piece);
        self.state = SessionState::Falling;
        true
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.playable() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !can_place(&self.board, &moved.shape(), moved.x, moved.y) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.playable() else {
            return false;
        };

        match try_rotate(&self.board, &active, clockwise, &self.kicks) {
            Some(rotated) => {
                self.active = Some(rotated.piece);
                true
            }
            None => false,
        }
    }

    /// Rotate 90° clockwise, resolving wall kicks. A rotation that fits nowhere leaves
    /// the piece unchanged and returns false.
    pub fn rotate(&mut self) -> bool {
        self.try_rotate(true)
    }

    /// Rotate 90° counter-clockwise, resolving wall kicks
    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Move down one row for one point. Blocked soft drops do nothing and do not lock.
    pub fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.progression.award_drop(1, false);
        true
    }

    /// Drop to the landing row for two points per row, then lock
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.playable() else {
            return false;
        };

        let distance = drop_distance(&self.board, &active);
        self.active = Some(active.shifted(0, distance as i8));
        let drop_score = self.progression.award_drop(distance, true);

        self.lock_active(drop_score);
        true
    }

    /// One natural gravity step: move down a row, or lock if the piece is resting
    pub fn gravity_tick(&mut self) -> bool {
        if self.playable().is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_active(0);
        }
        true
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    fn lock_active(&mut self, drop_score: u32) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let cleared_rows = lock::lock_piece(&mut self.board, &piece);
        let clear = self.progression.record_clear(cleared_rows.len());
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        debug!(
            kind = ?piece.kind,
            x = piece.x,
            y = piece.y,
            lines = cleared_rows.len(),
            points = clear.points,
            "piece locked"
        );
        if clear.leveled_up {
            info!(
                level = self.level(),
                drop_interval_ms = self.drop_interval_ms(),
                "level up"
            );
        }

        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            cleared_rows,
            line_clear_score: clear.points,
            drop_score,
            leveled_up: clear.leveled_up,
            game_over: !spawned,
        });
    }

    /// Start a fresh game: empty board, zeroed progression, new pieces.
    ///
    /// The piece source is reseeded from its current state, so consecutive games differ
    /// but replay identically from the same initial seed.
    pub fn reset(&mut self) -> bool {
        self.board.clear();
        self.pieces = self.pieces.reseeded();
        self.next = self.pieces.draw();
        self.progression = Progression::new();
        self.active = None;
        self.last_event = None;
        self.pieces_locked = 0;
        self.episode = self.episode.wrapping_add(1);
        self.state = SessionState::Spawning;
        info!(episode = self.episode, "session reset");
        self.spawn_next();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::GravityTick => self.gravity_tick(),
            GameAction::Reset => self.reset(),
        }
    }

    /// Check if the active piece can move by `(dx, dy)`
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        can_place(&self.board, &moved.shape(), moved.x, moved.y)
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        self.active.is_some() && !self.can_move(0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomizer;
    use crate::rotation::SrsKicks;
    use crate::types::Rotation;

    fn scripted(kinds: &[PieceKind]) -> Session {
        Session::new(SessionConfig::default().with_randomizer(Randomizer::Sequence(kinds.to_vec())))
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(SessionConfig::default().with_seed(12345));

        assert_eq!(session.state(), SessionState::Spawning);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.drop_interval_ms(), 1000);
        assert!(session.active().is_none());
        assert!(session.ghost_y().is_none());
    }

    #[test]
    fn test_commands_rejected_before_start() {
        let mut session = scripted(&[PieceKind::T]);
        assert!(!session.move_left());
        assert!(!session.rotate());
        assert!(!session.soft_drop());
        assert!(!session.hard_drop());
        assert!(!session.gravity_tick());
        assert_eq!(session.state(), SessionState::Spawning);
    }

    #[test]
    fn test_start_spawns_next_and_draws_new_next() {
        let mut session = scripted(&[PieceKind::T, PieceKind::I, PieceKind::O]);
        assert_eq!(session.next_kind(), PieceKind::T);

        assert!(session.start());
        assert_eq!(session.state(), SessionState::Falling);
        let active = session.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(session.next_kind(), PieceKind::I);

        assert!(!session.start());
    }

    #[test]
    fn test_try_move() {
        let mut session = scripted(&[PieceKind::T]);
        session.start();

        let initial_x = session.active().unwrap().x;
        assert!(session.move_right());
        assert_eq!(session.active().unwrap().x, initial_x + 1);
        assert!(session.move_left());
        assert_eq!(session.active().unwrap().x, initial_x);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut session = scripted(&[PieceKind::T]);
        session.start();

        let mut moved = 0;
        for _ in 0..10 {
            if session.move_left() {
                moved += 1;
            }
        }
        // T spawns at x=3 with its leftmost mino at column 3
        assert_eq!(moved, 3);
        assert_eq!(session.active().unwrap().x, 0);
    }

    #[test]
    fn test_soft_drop_awards_one_point_per_row() {
        let mut session = scripted(&[PieceKind::O]);
        session.start();

        for _ in 0..5 {
            assert!(session.soft_drop());
        }
        assert_eq!(session.score(), 5);
        assert_eq!(session.active().unwrap().y, 5);
    }

    #[test]
    fn test_blocked_soft_drop_does_not_lock() {
        let mut session = scripted(&[PieceKind::O]);
        session.start();
        while session.soft_drop() {}

        let resting = session.active().unwrap();
        assert_eq!(resting.y, 18);
        let score = session.score();

        assert!(!session.soft_drop());
        assert_eq!(session.active(), Some(resting));
        assert_eq!(session.score(), score);
        assert_eq!(session.pieces_locked(), 0);
    }

    #[test]
    fn test_hard_drop_awards_two_points_per_row_and_locks() {
        let mut session = scripted(&[PieceKind::O, PieceKind::T]);
        session.start();

        assert!(session.hard_drop());
        assert_eq!(session.score(), 36);
        assert_eq!(session.pieces_locked(), 1);
        assert!(session.board().is_occupied(4, 19));
        assert_eq!(session.active().unwrap().kind, PieceKind::T);

        let event = session.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.drop_score, 36);
        assert_eq!(event.lines_cleared(), 0);
        assert!(!event.game_over);
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_gravity_tick_moves_then_locks() {
        let mut session = scripted(&[PieceKind::O, PieceKind::I]);
        session.start();

        for expected_y in 1..=18 {
            assert!(session.gravity_tick());
            assert_eq!(session.active().unwrap().y, expected_y);
        }
        assert_eq!(session.score(), 0);

        // resting: the next tick locks
        assert!(session.gravity_tick());
        assert_eq!(session.pieces_locked(), 1);
        assert_eq!(session.active().unwrap().kind, PieceKind::I);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_ghost_tracks_active() {
        let mut session = scripted(&[PieceKind::I]);
        session.start();
        assert_eq!(session.ghost_y(), Some(18));
        assert!(session.rotate());
        assert_eq!(session.ghost_y(), Some(16));
        assert_eq!(session.ghost_piece().unwrap().y, 16);
    }

    #[test]
    fn test_with_board_rejects_full_row_and_wrong_size() {
        let full = Board::from_rows(10, 20, &["##########"]);
        let err = Session::default().with_board(full).unwrap_err();
        assert_eq!(err, BoardError::FullRow(19));

        let small = Board::with_size(8, 20);
        let err = Session::default().with_board(small).unwrap_err();
        assert!(matches!(err, BoardError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_with_board_on_finished_game_starts_fresh() {
        let rows = ["....##...."; 18];
        let board = Board::from_rows(10, 20, &rows);
        let mut session = scripted(&[PieceKind::O]).with_board(board.clone()).unwrap();
        session.start();
        session.hard_drop();
        assert!(session.game_over());
        assert_eq!(session.pieces_locked(), 1);

        let mut session = session.with_board(Board::new()).unwrap();
        assert_eq!(session.state(), SessionState::Spawning);
        assert_eq!(session.progression(), &Progression::new());
        assert_eq!(session.pieces_locked(), 0);
        assert!(session.last_event().is_none());
        assert!(session.start());
        assert_eq!(session.state(), SessionState::Falling);
    }

    #[test]
    fn test_accessors_reflect_construction() {
        let config = SessionConfig::default().with_seed(77).with_size(8, 16);
        let session = Session::with_kicks(config.clone(), SrsKicks);
        assert_eq!(session.config(), &config);
        assert_eq!(session.kicks(), &SrsKicks);
        assert_eq!(session.board().width(), 8);
        assert_eq!(session.progression().level(), 1);
    }

    #[test]
    fn test_last_event_peek_then_take() {
        let mut session = scripted(&[PieceKind::O]);
        session.start();
        assert!(session.last_event().is_none());
        session.hard_drop();

        let peeked = session.last_event().cloned().unwrap();
        assert_eq!(session.take_last_event(), Some(peeked));
        assert!(session.last_event().is_none());
    }

    #[test]
    fn test_reset_increments_episode_and_clears() {
        let mut session = scripted(&[PieceKind::O]);
        session.start();
        session.hard_drop();
        assert!(session.score() > 0);

        assert!(session.apply_action(GameAction::Reset));
        assert_eq!(session.episode(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.state(), SessionState::Falling);
        assert!(session.active().is_some());
    }

    #[test]
    fn test_is_grounded() {
        let mut session = scripted(&[PieceKind::O]);
        session.start();
        assert!(!session.is_grounded());
        while session.soft_drop() {}
        assert!(session.is_grounded());
    }
}
