//! RNG module - random shape selection
//!
//! Shapes are drawn uniformly with a soft anti-repeat bias: if a draw matches
//! the previously spawned shape, draw once more and keep whatever comes out.
//! This is not a bag randomizer; repeats are rarer, not impossible.
//!
//! Also provides a simple LCG so games can be replayed from a seed.

use crate::types::ShapeKind;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Shape generator with one-retry anti-repeat
///
/// Each game owns its own generator, so parallel sessions never share the
/// "last spawned" memory.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    last: Option<ShapeKind>,
}

impl PieceGenerator {
    /// Create a generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            last: None,
        }
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u32>())
    }

    fn draw_uniform(&mut self) -> ShapeKind {
        ShapeKind::from_index(self.rng.next_range(ShapeKind::ALL.len() as u32) as usize)
    }

    /// Draw the next shape
    pub fn next_shape(&mut self) -> ShapeKind {
        let mut shape = self.draw_uniform();
        if Some(shape) == self.last {
            shape = self.draw_uniform();
        }
        self.last = Some(shape);
        shape
    }

    /// Shape returned by the previous draw
    pub fn last_shape(&self) -> Option<ShapeKind> {
        self.last
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
