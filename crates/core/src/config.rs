//! Session configuration

use serde::{Deserialize, Serialize};

use crate::rng::Randomizer;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Parameters fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board columns (10 canonically)
    pub width: u8,
    /// Board rows (20 canonically)
    pub height: u8,
    /// Seed for piece selection
    pub seed: u32,
    pub randomizer: Randomizer,
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            randomizer: Randomizer::Uniform,
        }
    }
}
