use thiserror::Error;

use super::size::size_bound;

/// Errors that are reported when a sampler is configured with parameters that it cannot work
/// with. Parameters are never clamped silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Reach objectives need at least two tokens.
    #[error("at least two tokens are needed, but {0} were given")]
    TooFewTokens(usize),
    /// Automata consist of at least two states.
    #[error("the maximal size must be at least 2, but {0} was given")]
    MaxSizeTooSmall(usize),
    /// The skew parameter weighs sizes geometrically and must thus be positive.
    #[error("the size skew must be a finite positive number, but {0} was given")]
    InvalidSkew(f64),
    /// The stutter probability is a probability.
    #[error("the stutter probability must lie in [0, 1], but {0} was given")]
    InvalidStutterProbability(f64),
    /// Mutating reach-avoid automata is only meaningful if they can have more than one state
    /// after minimization.
    #[error("mutated reach-avoid automata need a maximal size of at least 3, but {0} was given")]
    RadNeedsThreeStates(usize),
}

/// The immutable parameters shared by all samplers. Values are obtained through
/// [`SamplerConfig::builder`], which verifies all parameters, or through
/// [`SamplerConfig::default`].
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let config = SamplerConfig::builder()
///     .n_tokens(4)
///     .max_size(8)
///     .skew(0.5)
///     .build()
///     .unwrap();
/// assert_eq!(config.n_tokens(), 4);
/// assert_eq!(config.skew(), Some(0.5));
/// assert!(SamplerConfig::builder().n_tokens(1).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    n_tokens: usize,
    max_size: usize,
    skew: Option<f64>,
    prob_stutter: f64,
    max_mutations: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            n_tokens: 10,
            max_size: 6,
            skew: None,
            prob_stutter: 0.9,
            max_mutations: 5,
        }
    }
}

impl SamplerConfig {
    /// Starts building a configuration from the default values.
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder(Self::default())
    }

    /// The number of tokens in the alphabet.
    pub fn n_tokens(&self) -> usize {
        self.n_tokens
    }

    /// The largest number of states a sampled automaton has before minimization.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The geometric skew of the size distribution, if any.
    pub fn skew(&self) -> Option<f64> {
        self.skew
    }

    /// The probability with which a token that is not needed for progress loops on a state.
    pub fn prob_stutter(&self) -> f64 {
        self.prob_stutter
    }

    /// The largest number of mutation rounds applied by the RAD sampler.
    pub fn max_mutations(&self) -> usize {
        self.max_mutations
    }

    /// Conservative number of decimal digits needed for the integer encoding of any automaton
    /// produced with this configuration, see [`size_bound`].
    pub fn size_bound(&self) -> usize {
        size_bound(self.n_tokens, self.max_size)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.n_tokens <= 1 {
            return Err(ConfigError::TooFewTokens(self.n_tokens));
        }
        if self.max_size < 2 {
            return Err(ConfigError::MaxSizeTooSmall(self.max_size));
        }
        if let Some(p) = self.skew {
            if !p.is_finite() || p <= 0.0 {
                return Err(ConfigError::InvalidSkew(p));
            }
        }
        if !(0.0..=1.0).contains(&self.prob_stutter) {
            return Err(ConfigError::InvalidStutterProbability(self.prob_stutter));
        }
        Ok(())
    }
}

/// Builder for [`SamplerConfig`], all fields that are not set keep their default value.
#[derive(Debug, Clone)]
pub struct SamplerConfigBuilder(SamplerConfig);

impl SamplerConfigBuilder {
    /// Sets the number of tokens, which must be larger than 1.
    pub fn n_tokens(mut self, n_tokens: usize) -> Self {
        self.0.n_tokens = n_tokens;
        self
    }

    /// Sets the maximal size, which must be at least 2.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.0.max_size = max_size;
        self
    }

    /// Skews the size distribution geometrically with parameter `p`. Values below 1 favour
    /// small automata, values above 1 favour large ones.
    pub fn skew(mut self, p: f64) -> Self {
        self.0.skew = Some(p);
        self
    }

    /// Sets or removes the skew of the size distribution.
    pub fn maybe_skew(mut self, p: Option<f64>) -> Self {
        self.0.skew = p;
        self
    }

    /// Sets the stutter probability, which must lie in `[0, 1]`.
    pub fn prob_stutter(mut self, prob_stutter: f64) -> Self {
        self.0.prob_stutter = prob_stutter;
        self
    }

    /// Sets the maximal number of mutation rounds.
    pub fn max_mutations(mut self, max_mutations: usize) -> Self {
        self.0.max_mutations = max_mutations;
        self
    }

    /// Verifies the parameters and produces the configuration.
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        self.0.validate()?;
        Ok(self.0)
    }
}
