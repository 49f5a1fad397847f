use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ConfigError, RadSampler, ReachAvoidSampler, ReachSampler, Sampler, SamplerConfig};

/// An endless iterator of automata with non-empty language. It owns its sampler as well as its
/// source of randomness, so separately created instances never share any state. Calling
/// [`Iterator::next`] always yields `Some`.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let config = SamplerConfig::builder().n_tokens(3).build().unwrap();
/// for dfa in reach_sequence(config).take(5) {
///     assert!(!dfa.is_empty_language());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Samples<S, R> {
    sampler: S,
    rng: R,
    drawn: usize,
    attempts: usize,
}

impl<S: Sampler, R: Rng> Samples<S, R> {
    /// Creates an endless iterator of samples drawn by `sampler` using `rng`.
    pub fn new(sampler: S, rng: R) -> Self {
        Self {
            sampler,
            rng,
            drawn: 0,
            attempts: 0,
        }
    }

    /// Gives access to the sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// The number of automata that were produced so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// The total number of candidates that were drawn so far, including the ones that were
    /// rejected because their language is empty.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl<S: Sampler, R: Rng> Iterator for Samples<S, R> {
    type Item = S::Automaton;

    fn next(&mut self) -> Option<Self::Item> {
        let (automaton, attempts) = self.sampler.sample_with_attempts(&mut self.rng);
        self.drawn += 1;
        self.attempts += attempts;
        Some(automaton)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Endless sequence of reach automata, drawing from a freshly seeded generator.
pub fn reach_sequence(config: SamplerConfig) -> Samples<ReachSampler, StdRng> {
    Samples::new(ReachSampler::new(config), StdRng::from_entropy())
}

/// Endless, reproducible sequence of reach automata.
pub fn reach_sequence_seeded(config: SamplerConfig, seed: u64) -> Samples<ReachSampler, StdRng> {
    Samples::new(ReachSampler::new(config), StdRng::seed_from_u64(seed))
}

/// Endless sequence of reach-avoid automata, drawing from a freshly seeded generator.
pub fn reach_avoid_sequence(config: SamplerConfig) -> Samples<ReachAvoidSampler, StdRng> {
    Samples::new(ReachAvoidSampler::new(config), StdRng::from_entropy())
}

/// Endless, reproducible sequence of reach-avoid automata.
pub fn reach_avoid_sequence_seeded(
    config: SamplerConfig,
    seed: u64,
) -> Samples<ReachAvoidSampler, StdRng> {
    Samples::new(ReachAvoidSampler::new(config), StdRng::seed_from_u64(seed))
}

/// Endless sequence of mutated reach-avoid automata, drawing from a freshly seeded generator.
/// Fails under the same conditions as [`RadSampler::new`].
pub fn rad_sequence(config: SamplerConfig) -> Result<Samples<RadSampler, StdRng>, ConfigError> {
    Ok(Samples::new(RadSampler::new(config)?, StdRng::from_entropy()))
}

/// Endless, reproducible sequence of mutated reach-avoid automata.
pub fn rad_sequence_seeded(
    config: SamplerConfig,
    seed: u64,
) -> Result<Samples<RadSampler, StdRng>, ConfigError> {
    Ok(Samples::new(
        RadSampler::new(config)?,
        StdRng::seed_from_u64(seed),
    ))
}
