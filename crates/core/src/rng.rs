//! RNG module - deterministic pseudo-random numbers
//!
//! A small LCG that can also absorb input words, so a seed combined with a
//! well always yields the same sequence. Piece choices that depend only on
//! (seed, well) stay reproducible under replay.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fold a word into the state.
    pub fn mix(&mut self, word: u32) {
        self.state ^= word;
        self.next_u32();
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}
