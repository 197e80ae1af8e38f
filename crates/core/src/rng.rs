//! RNG module - seeded piece selection
//!
//! The default [`Randomizer::Uniform`] picks each piece independently and uniformly among
//! the seven kinds. It gives no fairness guarantee: droughts and repeats of any length are
//! possible. [`Randomizer::Bag`] (shuffle all seven, deal, repeat) and
//! [`Randomizer::Sequence`] (cycle a fixed script) are available for callers that want
//! them.
//!
//! All randomness comes from a small LCG so the same seed always produces the same game.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How the next piece is chosen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Independent uniform choice among the seven kinds
    #[default]
    Uniform,
    /// 7-bag: every kind once per shuffled bag of seven
    Bag,
    /// Cycle through a fixed list. An empty list behaves like `Uniform`.
    Sequence(Vec<PieceKind>),
}

impl Randomizer {
    /// Parse `uniform` or `bag` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }
}

/// Seeded stream of piece kinds
#[derive(Debug, Clone)]
pub struct PieceSource {
    randomizer: Randomizer,
    rng: SimpleRng,
    seed: u32,
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means empty
    bag_index: usize,
    /// Position in a scripted sequence
    sequence_index: usize,
}

impl PieceSource {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        Self {
            randomizer,
            rng: SimpleRng::new(seed),
            seed,
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            sequence_index: 0,
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    fn draw_uniform(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        if let Randomizer::Sequence(kinds) = &self.randomizer {
            if !kinds.is_empty() {
                let piece = kinds[self.sequence_index % kinds.len()];
                self.sequence_index = (self.sequence_index + 1) % kinds.len();
                return piece;
            }
        }

        if self.randomizer == Randomizer::Bag {
            if self.bag_index >= self.bag.len() {
                self.refill_bag();
            }
            let piece = self.bag[self.bag_index];
            self.bag_index += 1;
            return piece;
        }

        self.draw_uniform()
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    /// Fresh source seeded from the current generator state
    pub fn reseeded(&self) -> Self {
        Self::new(self.randomizer.clone(), self.rng.state())
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(Randomizer::Uniform, 1)
    }
}
