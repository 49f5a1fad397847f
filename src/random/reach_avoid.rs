use std::marker::PhantomData;

use rand::{seq::index, Rng};

use super::{Role, Sampler, SamplerConfig, SizeDistribution};
use crate::{automaton::StateIndex, Dfa, FiniteAutomaton, TokenAlphabet, TransitionTable};

/// Samples automata for the objective "reach the goal while avoiding failure". States `n-2`
/// and `n-1` are an accepting and a rejecting sink respectively, all states `s < n-2` form a
/// chain. In each chain state, one token advances to `s+1` and a different one leads to the
/// rejecting sink. Every further token loops on `s` with probability `prob_stutter`, otherwise
/// it is good or bad with equal probability.
///
/// For `n = 2` there is no chain at all and the initial state is the accepting sink.
#[derive(Debug, Clone)]
pub struct ReachAvoidSampler<A = Dfa> {
    config: SamplerConfig,
    sizes: SizeDistribution,
    _automaton: PhantomData<fn() -> A>,
}

impl<A: FiniteAutomaton> ReachAvoidSampler<A> {
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

    /// Builds the (unminimized) transition table with `n` states, where state `0` is initial,
    /// `n-2` is the accepting and `n-1` the rejecting sink. Panics if `n < 2`.
    pub fn sample_table<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> TransitionTable {
        assert!(n >= 2, "reach-avoid tables need both sinks");
        let alphabet = TokenAlphabet::of_size(self.config.n_tokens());
        let (success, fail): (StateIndex, StateIndex) = (n - 2, n - 1);
        let mut table = TransitionTable::new(alphabet);
        table.add_sink(success, true);
        table.add_sink(fail, false);

        for state in 0..success {
            table.add_state(state, false);
            for (token, role) in self.draw_roles(rng).into_iter().enumerate() {
                let target = match role {
                    Role::Good => state + 1,
                    Role::Bad => fail,
                    Role::Noop => state,
                };
                table.add_transition(state, token, target);
            }
        }
        table
    }

    /// Two distinct tokens are drawn to be good and bad. Each remaining token is a noop with
    /// probability `prob_stutter`, otherwise it is good or bad with equal probability.
    fn draw_roles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Role> {
        let n_tokens = self.config.n_tokens();
        let distinct = index::sample(rng, n_tokens, 2);
        let (good, bad) = (distinct.index(0), distinct.index(1));
        (0..n_tokens)
            .map(|token| {
                if token == good {
                    Role::Good
                } else if token == bad {
                    Role::Bad
                } else if rng.gen_bool(self.config.prob_stutter()) {
                    Role::Noop
                } else if rng.gen_bool(0.5) {
                    Role::Good
                } else {
                    Role::Bad
                }
            })
            .collect()
    }
}

impl<A: FiniteAutomaton> Sampler for ReachAvoidSampler<A> {
    type Automaton = A;

    fn config(&self) -> &SamplerConfig {
        &self.config
    }

    fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> A {
        let n = self.sizes.sample(rng);
        let table = self.sample_table(n, rng);
        A::construct(&table, 0)
            .expect("sampled reach-avoid tables are complete")
            .minimize()
    }
}
