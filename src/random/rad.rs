use rand::Rng;
use tracing::trace;

use super::{ConfigError, ReachAvoidSampler, Sampler, SamplerConfig};
use crate::{Dfa, FiniteAutomaton, TransitionTable};

/// Rewrites the transitions of `automaton` such that every accepting state becomes a sink,
/// i.e. all tokens lead from an accepting state back to itself. Transitions of rejecting
/// states are kept as they are. The result is not minimized.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
/// table.add_state(0, false);
/// table.add_transition(0, 0, 1);
/// table.add_transition(0, 1, 0);
/// table.add_state(1, true);
/// table.add_transition(1, 0, 0);
/// table.add_transition(1, 1, 1);
/// let dfa = Dfa::construct(&table, 0).unwrap();
/// assert!(!dfa.is_sink(1));
/// assert!(normalize_sinks(&dfa).is_sink(1));
/// ```
pub fn normalize_sinks<A: FiniteAutomaton>(automaton: &A) -> A {
    let mut table = TransitionTable::from_automaton(automaton);
    for q in automaton.accepting_states() {
        table.add_sink(q, true);
    }
    A::construct(&table, automaton.initial()).expect("snapshots of automata are complete")
}

/// Samples reach-avoid automata and perturbs them with random transition mutations (RAD stands
/// for reach-avoid derived). After drawing a reach-avoid automaton with more than one state,
/// a number of rounds `k` is drawn uniformly from `0..=max_mutations`. In each round
/// 1. one transition of the current candidate is redirected, if that is possible,
/// 2. all accepting states are turned back into sinks (see [`normalize_sinks`]),
/// 3. the result is minimized and becomes the new candidate unless it has a single state.
///
/// Thereby every accepting state of a returned automaton is a sink and no returned automaton
/// consists of a single state.
#[derive(Debug, Clone)]
pub struct RadSampler<A = Dfa> {
    reach_avoid: ReachAvoidSampler<A>,
}

impl<A: FiniteAutomaton> RadSampler<A> {
    /// Creates a sampler for the given configuration. The inner reach-avoid sampler uses the
    /// same configuration. Fails if `max_size < 3`, since then every reach-avoid automaton
    /// collapses into a single state.
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigError> {
        if config.max_size() < 3 {
            return Err(ConfigError::RadNeedsThreeStates(config.max_size()));
        }
        Ok(Self {
            reach_avoid: ReachAvoidSampler::new(config),
        })
    }

    /// Gives access to the inner reach-avoid sampler.
    pub fn reach_avoid(&self) -> &ReachAvoidSampler<A> {
        &self.reach_avoid
    }

    /// Draws reach-avoid automata until one with more than one state comes up.
    fn sample_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> A {
        loop {
            let candidate = self.reach_avoid.sample(rng);
            if candidate.size() > 1 {
                return candidate;
            }
            trace!("discarding single state reach-avoid automaton");
        }
    }

    /// Applies `rounds` rounds of mutation to `candidate`. Rounds in which no transition can be
    /// changed or in which the mutated automaton minimizes to a single state leave the
    /// candidate untouched.
    pub fn mutate<R: Rng + ?Sized>(&self, mut candidate: A, rounds: usize, rng: &mut R) -> A {
        for round in 0..rounds {
            let Some(mutated) = candidate.change_transition(rng) else {
                trace!("round {round}: no transition can be changed");
                continue;
            };
            let normalized = normalize_sinks(&mutated).minimize();
            if normalized.size() == 1 {
                trace!("round {round}: mutation collapses the automaton, rejecting it");
                continue;
            }
            candidate = normalized;
        }
        candidate
    }
}

impl<A: FiniteAutomaton> Sampler for RadSampler<A> {
    type Automaton = A;

    fn config(&self) -> &SamplerConfig {
        self.reach_avoid.config()
    }

    fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> A {
        let candidate = self.sample_seed(rng);
        let rounds = rng.gen_range(0..=self.config().max_mutations());
        trace!("applying {rounds} rounds of mutation");
        self.mutate(candidate, rounds, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::prelude::*;

    fn accepting_are_sinks(dfa: &Dfa) -> bool {
        dfa.accepting_states().into_iter().all(|q| dfa.is_sink(q))
    }

    #[test]
    fn rad_needs_three_states() {
        let config = SamplerConfig::builder().max_size(2).build().unwrap();
        assert_eq!(
            RadSampler::<Dfa>::new(config).unwrap_err(),
            ConfigError::RadNeedsThreeStates(2)
        );
    }

    #[test]
    fn inner_sampler_shares_the_configuration() {
        let sampler: RadSampler = RadSampler::new(SamplerConfig::default()).unwrap();
        assert_eq!(sampler.config(), sampler.reach_avoid().config());
        assert_eq!(sampler.reach_avoid().config().prob_stutter(), 0.9);
        assert_eq!(sampler.config().skew(), None);
    }

    #[test]
    fn normalization_turns_accepting_states_into_sinks() {
        let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
        table.add_state(0, false);
        table.add_transition(0, 0, 1);
        table.add_transition(0, 1, 2);
        table.add_state(1, true);
        table.add_transition(1, 0, 0);
        table.add_transition(1, 1, 2);
        table.add_state(2, false);
        table.add_transition(2, 0, 1);
        table.add_transition(2, 1, 0);
        let dfa = Dfa::construct(&table, 0).unwrap();

        let normalized = normalize_sinks(&dfa);
        assert_eq!(normalized.size(), 3);
        assert!(normalized.is_sink(1));
        assert_eq!(normalized.successor(0, 1), Some(2));
        assert_eq!(normalized.successor(2, 1), Some(0));
        assert_eq!(normalized.initial(), dfa.initial());
        assert!(accepting_are_sinks(&normalized));
    }

    #[test_log::test]
    fn mutated_samples_keep_invariants() {
        let config = SamplerConfig::builder()
            .n_tokens(4)
            .max_size(7)
            .max_mutations(8)
            .build()
            .unwrap();
        let sampler: RadSampler = RadSampler::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..100 {
            let dfa = sampler.sample(&mut rng);
            assert!(dfa.give_word().is_some());
            assert!(dfa.size() > 1);
            assert!(accepting_are_sinks(&dfa));
        }
    }

    #[test]
    fn every_round_preserves_invariants() {
        let sampler: RadSampler = RadSampler::new(SamplerConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let mut candidate = sampler.reach_avoid().sample(&mut rng);
        while candidate.size() < 2 {
            candidate = sampler.reach_avoid().sample(&mut rng);
        }
        for _ in 0..50 {
            candidate = sampler.mutate(candidate, 1, &mut rng);
            assert!(candidate.size() > 1);
            assert!(accepting_are_sinks(&candidate));
            assert_eq!(candidate, candidate.minimize());
        }
    }

    #[test]
    fn zero_mutations_give_reach_avoid_automata() {
        let config = SamplerConfig::builder().max_mutations(0).build().unwrap();
        let sampler: RadSampler = RadSampler::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let dfa = sampler.sample(&mut rng);
            let sinks = dfa
                .state_indices()
                .into_iter()
                .filter(|q| dfa.is_sink(*q))
                .collect::<Vec<_>>();
            assert_eq!(sinks.len(), 2);
            assert_eq!(sinks.iter().filter(|q| dfa.is_accepting(**q)).count(), 1);
        }
    }
}
