//! Box-shaped observation and action spaces.

use rand::Rng;

/// Axis-aligned box `[low_i, high_i]` in N dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpace<const N: usize> {
    pub low: [f64; N],
    pub high: [f64; N],
}

impl<const N: usize> BoxSpace<N> {
    pub fn new(low: [f64; N], high: [f64; N]) -> Self {
        Self { low, high }
    }

    /// Same bounds on every axis.
    pub fn splat(low: f64, high: f64) -> Self {
        Self {
            low: [low; N],
            high: [high; N],
        }
    }

    pub fn contains(&self, x: &[f64; N]) -> bool {
        x.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(v, (lo, hi))| (*lo..=*hi).contains(v))
    }

    /// Uniform sample from the box.
    ///
    /// # Panics
    ///
    /// Panics if any `low_i > high_i`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; N] {
        std::array::from_fn(|i| rng.random_range(self.low[i]..=self.high[i]))
    }
}
