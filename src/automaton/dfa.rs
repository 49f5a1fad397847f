use bit_set::BitSet;
use itertools::Itertools;
use rand::Rng;
use tracing::trace;

use super::{minimization, ConstructionError, FiniteAutomaton, MinimalRepresentatives, StateIndex};
use crate::{math, Show, Token, TokenAlphabet, TransitionTable};

/// A deterministic finite automaton (DFA) that stores its transitions in a flat table. It accepts
/// a finite word if reading the word from the initial state leads to an accepting state.
///
/// States are always numbered densely from `0` to `size - 1`. When a [`Dfa`] is constructed from
/// a [`TransitionTable`] whose keys are not dense, the keys are renumbered in ascending order.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
/// table.add_state(0, false);
/// table.add_transition(0, 0, 0);
/// table.add_transition(0, 1, 1);
/// table.add_sink(1, true);
/// let dfa = Dfa::construct(&table, 0).unwrap();
/// assert!(dfa.accepts(&[0, 1]));
/// assert!(!dfa.accepts(&[0, 0]));
/// assert_eq!(dfa.give_word(), Some(vec![1]));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dfa {
    alphabet: TokenAlphabet,
    initial: StateIndex,
    size: usize,
    accepting: BitSet,
    transitions: Vec<StateIndex>,
}

impl Dfa {
    /// Assembles a [`Dfa`] from its raw parts, `transitions` is row-major, i.e. the successor of
    /// `q` on `token` is at position `q * alphabet.size() + token`.
    pub(crate) fn from_parts(
        alphabet: TokenAlphabet,
        initial: StateIndex,
        accepting: BitSet,
        transitions: Vec<StateIndex>,
        size: usize,
    ) -> Self {
        debug_assert_eq!(transitions.len(), size * alphabet.size());
        debug_assert!(initial < size);
        Self {
            alphabet,
            initial,
            size,
            accepting,
            transitions,
        }
    }

    #[inline(always)]
    pub(crate) fn successor_unchecked(&self, q: StateIndex, token: Token) -> StateIndex {
        self.transitions[q * self.alphabet.size() + token]
    }

    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from the initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        self.minimal_representatives_from(self.initial)
    }

    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from `origin`.
    pub fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Returns the indices of all states reachable from the initial state in breadth-first order.
    pub fn reachable_state_indices(&self) -> Vec<StateIndex> {
        self.minimal_representatives().map(|(_, q)| q).collect()
    }

}

impl FiniteAutomaton for Dfa {
    fn construct(table: &TransitionTable, initial: StateIndex) -> Result<Self, ConstructionError> {
        table.validate(initial)?;

        let alphabet = *table.alphabet();
        let renumbering: math::Map<StateIndex, StateIndex> = table
            .states()
            .enumerate()
            .map(|(position, (q, _))| (q, position))
            .collect();

        let size = table.size();
        let mut accepting = BitSet::with_capacity(size);
        let mut transitions = Vec::with_capacity(size * alphabet.size());
        for (position, (_, entry)) in table.states().enumerate() {
            if entry.accepting {
                accepting.insert(position);
            }
            transitions.extend(entry.edges.values().map(|target| renumbering[target]));
        }

        Ok(Self::from_parts(
            alphabet,
            renumbering[&initial],
            accepting,
            transitions,
            size,
        ))
    }

    fn alphabet(&self) -> &TokenAlphabet {
        &self.alphabet
    }

    fn initial(&self) -> StateIndex {
        self.initial
    }

    fn state_indices(&self) -> Vec<StateIndex> {
        (0..self.size).collect()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn is_accepting(&self, q: StateIndex) -> bool {
        self.accepting.contains(q)
    }

    fn successor(&self, q: StateIndex, token: Token) -> Option<StateIndex> {
        if q < self.size && self.alphabet.contains(token) {
            Some(self.successor_unchecked(q, token))
        } else {
            None
        }
    }

    fn minimize(&self) -> Self {
        minimization::minimize(self)
    }

    fn give_word(&self) -> Option<Vec<Token>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(q).then_some(word))
    }

    fn change_transition<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self> {
        if self.size < 2 || self.alphabet.size() == 0 {
            return None;
        }
        let q = rng.gen_range(0..self.size);
        let token = rng.gen_range(0..self.alphabet.size());
        let current = self.successor_unchecked(q, token);
        // draw among all states except the current target
        let mut target = rng.gen_range(0..self.size - 1);
        if target >= current {
            target += 1;
        }
        trace!("redirecting transition q{q} --{token}--> q{current} to q{target}");

        let mut mutated = self.clone();
        mutated.transitions[q * self.alphabet.size() + token] = target;
        Some(mutated)
    }
}

impl Show for Dfa {
    fn show(&self) -> String {
        (0..self.size)
            .map(|q| {
                format!(
                    "{}q{q}{} {}",
                    if q == self.initial { ">" } else { " " },
                    self.is_accepting(q).show(),
                    self.alphabet
                        .universe()
                        .map(|token| format!("{token}->q{}", self.successor_unchecked(q, token)))
                        .join(" ")
                )
            })
            .join("\n")
    }
}
