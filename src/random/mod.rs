use rand::Rng;
use tracing::{debug, trace};

use crate::FiniteAutomaton;

mod config;
pub use config::{ConfigError, SamplerConfig, SamplerConfigBuilder};

mod size;
pub use size::{size_bound, SizeDistribution, MIN_SIZE};

mod reach;
pub use reach::ReachSampler;

mod reach_avoid;
pub use reach_avoid::ReachAvoidSampler;

mod rad;
pub use rad::{normalize_sinks, RadSampler};

mod sequence;
pub use sequence::{
    rad_sequence, rad_sequence_seeded, reach_avoid_sequence, reach_avoid_sequence_seeded,
    reach_sequence, reach_sequence_seeded, Samples,
};

/// The part a token plays in a non-terminal state of a sampled chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Role {
    /// Advances towards the accepting sink.
    Good,
    /// Leads to the rejecting sink.
    Bad,
    /// Loops on the current state.
    Noop,
}

/// A sampler produces random automata whose accepted language is never empty.
///
/// Implementors only provide [`Sampler::sample_candidate`], which draws a single (minimized)
/// automaton that may still accept nothing. The provided [`Sampler::sample`] repeats this until
/// a candidate with a non-empty language comes up. There is no bound on the number of retries,
/// the constructions make empty candidates rare so that the loop terminates with probability
/// one. [`Sampler::sample_with_attempts`] reports how many candidates were needed.
pub trait Sampler {
    /// The type of automaton that is produced.
    type Automaton: FiniteAutomaton;

    /// Gives access to the configuration of the sampler.
    fn config(&self) -> &SamplerConfig;

    /// Draws a single candidate, whose language may be empty.
    fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Automaton;

    /// Draws candidates until one of them accepts a word. Returns that candidate together with
    /// the number of candidates that were drawn, which is always at least one.
    fn sample_with_attempts<R: Rng + ?Sized>(&self, rng: &mut R) -> (Self::Automaton, usize) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let candidate = self.sample_candidate(rng);
            if !candidate.is_empty_language() {
                debug!(
                    "sampled automaton with {} states after {attempts} attempt(s)",
                    candidate.size()
                );
                return (candidate, attempts);
            }
            trace!("discarding candidate {attempts}, its language is empty");
        }
    }

    /// Draws an automaton whose accepted language is not empty.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Automaton {
        self.sample_with_attempts(rng).0
    }

    /// Conservative number of decimal digits needed for encoding any sampled automaton, see
    /// [`size_bound`].
    fn size_bound(&self) -> usize {
        self.config().size_bound()
    }

    /// Turns `self` into an endless iterator of samples that draws from `rng`.
    fn samples<R: Rng>(self, rng: R) -> Samples<Self, R>
    where
        Self: Sized,
    {
        Samples::new(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::prelude::*;

    /// Automaton that keeps the table it was built from and never minimizes, so the samplers
    /// can be observed independently of [`Dfa`].
    #[derive(Debug, Clone)]
    struct Tabled {
        table: TransitionTable,
        initial: StateIndex,
    }

    impl FiniteAutomaton for Tabled {
        fn construct(
            table: &TransitionTable,
            initial: StateIndex,
        ) -> Result<Self, ConstructionError> {
            table.validate(initial)?;
            Ok(Self {
                table: table.clone(),
                initial,
            })
        }

        fn alphabet(&self) -> &TokenAlphabet {
            self.table.alphabet()
        }

        fn initial(&self) -> StateIndex {
            self.initial
        }

        fn state_indices(&self) -> Vec<StateIndex> {
            self.table.states().map(|(q, _)| q).collect()
        }

        fn is_accepting(&self, q: StateIndex) -> bool {
            self.table.is_accepting(q).unwrap_or(false)
        }

        fn successor(&self, q: StateIndex, token: Token) -> Option<StateIndex> {
            self.table.target(q, token)
        }

        fn minimize(&self) -> Self {
            self.clone()
        }

        fn give_word(&self) -> Option<Vec<Token>> {
            let mut seen = math::Set::default();
            let mut queue = VecDeque::from([(vec![], self.initial)]);
            seen.insert(self.initial);
            while let Some((word, q)) = queue.pop_front() {
                if self.is_accepting(q) {
                    return Some(word);
                }
                for token in self.alphabet().universe() {
                    let target = self.table.target(q, token)?;
                    if seen.insert(target) {
                        let mut extended = word.clone();
                        extended.push(token);
                        queue.push_back((extended, target));
                    }
                }
            }
            None
        }

        fn change_transition<R: rand::Rng + ?Sized>(&self, _rng: &mut R) -> Option<Self> {
            None
        }
    }

    #[test]
    fn samplers_drive_other_automata() {
        let config = SamplerConfig::builder()
            .n_tokens(4)
            .max_size(7)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let reach = ReachSampler::<Tabled>::new(config.clone());
        for _ in 0..50 {
            let automaton = reach.sample(&mut rng);
            // nothing is merged, so the whole chain survives
            assert!((2..=7).contains(&automaton.size()));
            assert_eq!(automaton.initial(), 0);
            assert_eq!(automaton.accepting_states(), vec![automaton.size() - 1]);
            let word = automaton.give_word().unwrap();
            assert_eq!(word.len(), automaton.size() - 1);
            assert!(automaton.accepts(&word));
        }

        // no transition can be changed, so the reach-avoid seed comes back as it is
        let rad = RadSampler::<Tabled>::new(config).unwrap();
        for _ in 0..20 {
            let automaton = rad.sample(&mut rng);
            assert!(automaton.size() >= 2);
            let sinks = automaton
                .state_indices()
                .into_iter()
                .filter(|q| automaton.is_sink(*q))
                .count();
            assert_eq!(sinks, 2);
        }
    }

    /// Sampler whose first candidates accept nothing, used to observe the rejection loop.
    struct EmptyFirst {
        config: SamplerConfig,
        empty: std::cell::Cell<usize>,
    }

    impl Sampler for EmptyFirst {
        type Automaton = Dfa;

        fn config(&self) -> &SamplerConfig {
            &self.config
        }

        fn sample_candidate<R: rand::Rng + ?Sized>(&self, _rng: &mut R) -> Dfa {
            let accepting = self.empty.get() == 0;
            self.empty.set(self.empty.get().saturating_sub(1));
            let mut table = TransitionTable::new(TokenAlphabet::of_size(self.config.n_tokens()));
            table.add_sink(0, accepting);
            Dfa::construct(&table, 0).unwrap()
        }
    }

    #[test_log::test]
    fn rejection_loop_counts_attempts() {
        let sampler = EmptyFirst {
            config: SamplerConfig::default(),
            empty: std::cell::Cell::new(3),
        };
        let (dfa, attempts) = sampler.sample_with_attempts(&mut StdRng::seed_from_u64(0));
        assert_eq!(attempts, 4);
        assert!(!dfa.is_empty_language());
        assert_eq!(sampler.size_bound(), 188);
    }
}
