//! Randomness seam for the battle core.
//!
//! Every random draw made by the resolver, the opponent selector and the
//! session goes through [`Dice`]. Any `rand::Rng` is a `Dice`, so the game
//! passes a thread RNG, the simulator a seeded `ChaCha8Rng`, and tests can
//! script exact rolls.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

pub trait Dice {
    /// Uniform integer in `min..=max`.
    fn roll(&mut self, min: u32, max: u32) -> u32;

    /// Index into `weights` drawn proportionally to the weights.
    /// `None` when the weights are empty or all zero.
    fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize>;

    /// Uniform index in `0..len`. `len` must be nonzero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.random_range(min..=max)
    }

    fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let index = WeightedIndex::new(weights).ok()?;
        Some(index.sample(self))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
