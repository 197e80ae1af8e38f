//! Headless autoplay: a session driven by the greedy planner.
//!
//! Used by the `tetromino-sim` binary and handy for soak-testing the rules: every lock
//! runs the full merge, clear, progression and spawn path.

use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, Level};

use crate::core::{GameSnapshot, KickStrategy, Randomizer, Session, SessionConfig, SimpleKicks, SrsKicks};
use crate::engine::{apply_place, best_placement};

/// Which wall-kick table the simulated session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KickChoice {
    #[default]
    Simple,
    Srs,
}

impl KickChoice {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(KickChoice::Simple),
            "srs" => Some(KickChoice::Srs),
            _ => None,
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u32,
    /// Stop after this many locked pieces even if the game is still running
    pub max_pieces: u32,
    pub randomizer: Randomizer,
    pub kicks: KickChoice,
    pub log_level: Level,
    /// Print the final snapshot as JSON
    pub json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_pieces: 500,
            randomizer: Randomizer::Uniform,
            kicks: KickChoice::Simple,
            log_level: Level::INFO,
            json: false,
        }
    }
}

impl SimConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SimConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("TETROMINO_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);
        let max_pieces = get("TETROMINO_PIECES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pieces);
        let randomizer = get("TETROMINO_RANDOMIZER")
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);
        let kicks = get("TETROMINO_KICKS")
            .and_then(|s| KickChoice::from_str(&s))
            .unwrap_or(defaults.kicks);
        let log_level = get("TETROMINO_LOG")
            .and_then(|s| Level::from_str(&s).ok())
            .unwrap_or(defaults.log_level);
        let json = get("TETROMINO_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.json);

        Self {
            seed,
            max_pieces,
            randomizer,
            kicks,
            log_level,
            json,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_seed(self.seed)
            .with_randomizer(self.randomizer.clone())
    }
}

/// Result of one autoplay run
#[derive(Debug, Clone, Serialize)]
pub struct SimSummary {
    pub seed: u32,
    pub kicks: KickChoice,
    pub pieces_locked: u32,
    pub lines: u32,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub snapshot: GameSnapshot,
}

/// Play a started session with the planner until game over or `max_pieces` locks
pub fn autoplay<K: KickStrategy + Clone>(session: &mut Session<K>, max_pieces: u32) -> u32 {
    let mut placed = 0;
    while placed < max_pieces && !session.game_over() {
        let Some(best) = best_placement(session) else {
            // nothing fits: drop where it is
            session.hard_drop();
            placed += 1;
            continue;
        };
        if let Err(err) = apply_place(session, best.x, best.rotation) {
            debug!(code = err.code(), "planned placement failed");
            session.hard_drop();
        }
        placed += 1;

        if let Some(event) = session.take_last_event() {
            if event.lines_cleared() > 0 {
                debug!(
                    lines = event.lines_cleared(),
                    points = event.line_clear_score,
                    "lines cleared"
                );
            }
        }
    }
    placed
}

fn run_with<K: KickStrategy + Clone>(config: &SimConfig, kicks: K) -> SimSummary {
    let mut session = Session::with_kicks(config.session_config(), kicks);
    session.start();
    autoplay(&mut session, config.max_pieces);

    info!(
        pieces = session.pieces_locked(),
        lines = session.lines(),
        score = session.score(),
        level = session.level(),
        "simulation finished"
    );

    SimSummary {
        seed: config.seed,
        kicks: config.kicks,
        pieces_locked: session.pieces_locked(),
        lines: session.lines(),
        score: session.score(),
        level: session.level(),
        game_over: session.game_over(),
        snapshot: session.snapshot(),
    }
}

/// Run one simulation as configured
pub fn run(config: &SimConfig) -> SimSummary {
    match config.kicks {
        KickChoice::Simple => run_with(config, SimpleKicks),
        KickChoice::Srs => run_with(config, SrsKicks),
    }
}
