use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use super::SamplerConfig;
use crate::math;

/// The smallest number of states a sampled automaton has before minimization.
pub const MIN_SIZE: usize = 2;

/// Draws the number of states for a sampled automaton from `[2, max_size]`. Without skew, all
/// sizes are equally likely. With skew `p`, size `v + 2` is drawn with probability proportional
/// to `p^v`, which favours small automata for `p < 1` and large ones for `p > 1`.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let config = SamplerConfig::builder().max_size(5).build().unwrap();
/// let sizes = SizeDistribution::new(&config);
/// let mut rng = StdRng::seed_from_u64(0);
/// assert!((2..=5).contains(&sizes.sample(&mut rng)));
/// ```
#[derive(Debug, Clone)]
pub struct SizeDistribution {
    max_size: usize,
    weighted: Option<WeightedIndex<f64>>,
    probabilities: Vec<f64>,
}

impl SizeDistribution {
    /// Creates the size distribution for the given configuration.
    pub fn new(config: &SamplerConfig) -> Self {
        Self::with_skew(config.max_size(), config.skew())
    }

    /// Creates the size distribution over `[2, max_size]` with an optional skew. Panics if
    /// `max_size < 2` or if the skew is not positive, both of which are ruled out by
    /// [`SamplerConfig`].
    pub fn with_skew(max_size: usize, skew: Option<f64>) -> Self {
        assert!(max_size >= MIN_SIZE, "automata have at least two states");
        let values = max_size - MIN_SIZE + 1;

        let Some(p) = skew else {
            return Self {
                max_size,
                weighted: None,
                probabilities: vec![1.0 / values as f64; values],
            };
        };
        assert!(p.is_finite() && p > 0.0, "skew must be positive");

        // p^v is scaled by the largest weight so that neither overflow nor a total underflow
        // can happen, the largest weight is always 1
        let heaviest = if p > 1.0 { values - 1 } else { 0 };
        let weights: Vec<f64> = (0..values)
            .map(|v| ((v as f64 - heaviest as f64) * p.ln()).exp())
            .collect();
        let total: f64 = weights.iter().sum();
        let probabilities = weights.iter().map(|w| w / total).collect();
        let weighted =
            WeightedIndex::new(&weights).expect("the heaviest weight is 1, all are finite");

        Self {
            max_size,
            weighted: Some(weighted),
            probabilities,
        }
    }

    /// Draws a size from `[2, max_size]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let offset = match &self.weighted {
            Some(weighted) => weighted.sample(rng),
            None => rng.gen_range(0..=self.max_size - MIN_SIZE),
        };
        MIN_SIZE + offset
    }

    /// Returns the probability with which `size` is drawn.
    pub fn probability(&self, size: usize) -> f64 {
        size.checked_sub(MIN_SIZE)
            .and_then(|offset| self.probabilities.get(offset))
            .copied()
            .unwrap_or(0.0)
    }

    /// Returns the expected size.
    pub fn mean(&self) -> f64 {
        (MIN_SIZE..=self.max_size)
            .map(|size| size as f64 * self.probability(size))
            .sum()
    }

    /// The largest size that can be drawn.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// Computes the number of decimal digits of the largest integer that is needed for encoding
/// an automaton with at most `max_size` states over `n_tokens` tokens, assuming a single
/// accepting state. The encoding uses `ceil(log2(Q))` bits per state and `ceil(log2(E))`
/// bits per token, so with `Q = max_size`, `E = n_tokens` and `F = min(1, Q - 1)` its
/// length in bits is
/// `3 + 2 b_Q + 2 b_E + (F + 1) b_Q + Q E (b_E + 2 b_Q)`, and the bound is the number of
/// digits of `2^bits - 1`. This does not influence sampling, it can be used for sizing
/// fixed-width buffers.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
/// assert_eq!(size_bound(10, 6), 188);
/// ```
pub fn size_bound(n_tokens: usize, max_size: usize) -> usize {
    const ACCEPTING: u64 = 1;
    let q = max_size as u64;
    let e = n_tokens as u64;
    let f = ACCEPTING.min(q.saturating_sub(ACCEPTING));
    let b_q = math::ceil_log2(max_size) as u64;
    let b_e = math::ceil_log2(n_tokens) as u64;
    let bits = 3 + 2 * b_q + 2 * b_e + (f + 1) * b_q + q * e * (b_e + 2 * b_q);
    math::decimal_digits_of_mersenne(bits)
}
