use std::marker::PhantomData;

use rand::Rng;

use super::{Sampler, SamplerConfig, SizeDistribution};
use crate::{automaton::StateIndex, Dfa, FiniteAutomaton, TokenAlphabet, TransitionTable};

/// Samples automata for the objective "eventually reach the goal". The automaton is a chain of
/// states `0, 1, ..., n-1` in which `n-1` is an accepting sink. Each state `s < n-1` has at least
/// one token advancing to `s+1`; every further token loops on `s` with probability
/// `prob_stutter` and advances otherwise.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let sampler: ReachSampler = ReachSampler::new(SamplerConfig::default());
/// let dfa = sampler.sample(&mut StdRng::seed_from_u64(1));
/// assert!(dfa.give_word().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ReachSampler<A = Dfa> {
    config: SamplerConfig,
    sizes: SizeDistribution,
    _automaton: PhantomData<fn() -> A>,
}

impl<A: FiniteAutomaton> ReachSampler<A> {
    /// Creates a sampler for the given configuration.
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            sizes: SizeDistribution::new(&config),
            config,
            _automaton: PhantomData,
        }
    }

    /// Gives access to the distribution from which sizes are drawn.
    pub fn sizes(&self) -> &SizeDistribution {
        &self.sizes
    }

    /// Builds the (unminimized) transition table of a chain with `n` states, where state `0` is
    /// initial and `n-1` is the accepting sink. Panics if `n` is zero.
    pub fn sample_table<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> TransitionTable {
        assert!(n >= 1, "a reach chain needs at least the accepting sink");
        let alphabet = TokenAlphabet::of_size(self.config.n_tokens());
        let success: StateIndex = n - 1;
        let mut table = TransitionTable::new(alphabet);
        table.add_sink(success, true);

        for state in 0..success {
            table.add_state(state, false);
            for (token, advances) in self.draw_advancing(rng).into_iter().enumerate() {
                let target = if advances { state + 1 } else { state };
                table.add_transition(state, token, target);
            }
        }
        table
    }

    /// Flags the tokens that advance along the chain. One token, drawn uniformly, always
    /// advances. Each remaining token loops with probability `prob_stutter` and advances
    /// otherwise.
    fn draw_advancing<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        let n_tokens = self.config.n_tokens();
        let good = rng.gen_range(0..n_tokens);
        (0..n_tokens)
            .map(|token| token == good || !rng.gen_bool(self.config.prob_stutter()))
            .collect()
    }
}

impl<A: FiniteAutomaton> Sampler for ReachSampler<A> {
    type Automaton = A;

    fn config(&self) -> &SamplerConfig {
        &self.config
    }

    fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> A {
        let n = self.sizes.sample(rng);
        let table = self.sample_table(n, rng);
        A::construct(&table, 0)
            .expect("sampled reach tables are complete")
            .minimize()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::prelude::*;

    fn config(n_tokens: usize, max_size: usize, prob_stutter: f64) -> SamplerConfig {
        SamplerConfig::builder()
            .n_tokens(n_tokens)
            .max_size(max_size)
            .prob_stutter(prob_stutter)
            .build()
            .unwrap()
    }

    #[test]
    fn chains_end_in_accepting_sink() {
        let sampler: ReachSampler = ReachSampler::new(config(5, 8, 0.7));
        let mut rng = StdRng::seed_from_u64(11);
        for n in 2..=8 {
            for _ in 0..20 {
                let table = sampler.sample_table(n, &mut rng);
                assert_eq!(table.size(), n);
                assert_eq!(table.validate(0), Ok(()));
                assert!(table.is_sink(n - 1));
                assert_eq!(table.is_accepting(n - 1), Some(true));

                for state in 0..n - 1 {
                    assert_eq!(table.is_accepting(state), Some(false));
                    let targets = (0..5)
                        .map(|token| table.target(state, token).unwrap())
                        .collect::<Vec<_>>();
                    assert!(targets.contains(&(state + 1)));
                    assert!(targets.iter().all(|t| *t == state || *t == state + 1));
                }

                // the sink is reachable from the initial state
                let dfa = Dfa::construct(&table, 0).unwrap();
                assert!(dfa.reachable_state_indices().contains(&(n - 1)));
            }
        }
    }

    #[test]
    fn stutter_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        let eager: ReachSampler = ReachSampler::new(config(4, 5, 0.0));
        let table = eager.sample_table(5, &mut rng);
        for state in 0..4 {
            assert!((0..4).all(|token| table.target(state, token) == Some(state + 1)));
        }

        let lazy: ReachSampler = ReachSampler::new(config(4, 5, 1.0));
        let table = lazy.sample_table(5, &mut rng);
        for state in 0..4 {
            let advancing = (0..4)
                .filter(|token| table.target(state, *token) == Some(state + 1))
                .count();
            assert_eq!(advancing, 1);
        }
    }

    #[test]
    fn advancing_tokens_follow_stutter_probability() {
        let mut rng = StdRng::seed_from_u64(12);
        let eager: ReachSampler = ReachSampler::new(config(6, 4, 0.0));
        assert!(eager.draw_advancing(&mut rng).into_iter().all(|advances| advances));

        let lazy: ReachSampler = ReachSampler::new(config(6, 4, 1.0));
        for _ in 0..20 {
            let flags = lazy.draw_advancing(&mut rng);
            assert_eq!(flags.len(), 6);
            assert_eq!(flags.into_iter().filter(|advances| *advances).count(), 1);
        }
    }

    #[test]
    fn single_state_table_is_the_sink() {
        let sampler: ReachSampler = ReachSampler::new(config(3, 4, 0.5));
        let table = sampler.sample_table(1, &mut StdRng::seed_from_u64(0));
        assert_eq!(table.size(), 1);
        assert!(table.is_sink(0));
    }

    #[test]
    #[should_panic(expected = "at least the accepting sink")]
    fn empty_chain_is_rejected() {
        let sampler: ReachSampler = ReachSampler::new(config(3, 4, 0.5));
        sampler.sample_table(0, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn samples_are_never_empty() {
        let sampler: ReachSampler = ReachSampler::new(SamplerConfig::default());
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let dfa = sampler.sample(&mut rng);
            assert!(dfa.give_word().is_some());
            assert!(dfa.size() >= 2 && dfa.size() <= 6);
            for q in dfa.accepting_states() {
                assert!(dfa.is_sink(q));
            }
        }
    }

    #[test]
    fn two_tokens_two_states() {
        let sampler: ReachSampler = ReachSampler::new(config(2, 2, 1.0));
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..20 {
            let dfa = sampler.sample(&mut rng);
            assert_eq!(dfa.size(), 2);
            let start = dfa.initial();
            assert!(!dfa.is_accepting(start));

            let good = (0..2)
                .find(|token| dfa.successor(start, *token) != Some(start))
                .unwrap();
            let other = 1 - good;
            let sink = dfa.successor(start, good).unwrap();
            assert!(dfa.is_accepting(sink) && dfa.is_sink(sink));

            assert!(dfa.accepts(&[good]));
            assert!(dfa.accepts(&[other, good]));
            assert!(dfa.accepts(&[good, other, other]));
            // the other token stutters, so it alone never reaches the goal
            assert!(!dfa.accepts(&[other]));
            assert!(!dfa.accepts(&[other, other, other]));
            assert!(!dfa.accepts(&[]));
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let sampler: ReachSampler = ReachSampler::new(SamplerConfig::default());
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10).map(|_| sampler.sample(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(99), draw(99));
    }
}
