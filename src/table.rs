use thiserror::Error;

use crate::{
    automaton::{FiniteAutomaton, StateIndex},
    math::OrderedMap,
    Show, Token, TokenAlphabet,
};

/// Errors that can occur when a [`TransitionTable`] is turned into an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The table does not contain a single state.
    #[error("transition table contains no states")]
    EmptyTable,
    /// The designated initial state is not a key of the table.
    #[error("initial state {0} does not exist")]
    UnknownInitial(StateIndex),
    /// Some state has no outgoing transition on some token of the alphabet.
    #[error("state {state} has no transition on token {token}")]
    MissingTransition {
        /// The state that lacks a transition.
        state: StateIndex,
        /// The token for which the transition is missing.
        token: Token,
    },
    /// A transition points to a state that is not a key of the table.
    #[error("transition from state {state} on token {token} leads to unknown state {target}")]
    UnknownTarget {
        /// Origin of the offending transition.
        state: StateIndex,
        /// Token of the offending transition.
        token: Token,
        /// The target that does not exist.
        target: StateIndex,
    },
    /// A transition is labeled with a token that is not in the alphabet.
    #[error("state {state} has a transition on token {token}, which is not in the alphabet")]
    UnknownToken {
        /// Origin of the offending transition.
        state: StateIndex,
        /// The token that is not part of the alphabet.
        token: Token,
    },
}

/// The row of a [`TransitionTable`] belonging to a single state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateEntry {
    /// Whether the state is accepting.
    pub accepting: bool,
    /// Maps each token to the state that is reached when reading it.
    pub edges: OrderedMap<Token, StateIndex>,
}

/// Plain description of a deterministic automaton: a mapping from each state to a pair of its
/// acceptance label and a mapping from tokens to successor states. Tables are built one state
/// at a time and then handed to [`FiniteAutomaton::construct`].
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
/// table.add_state(0, false);
/// table.add_transition(0, 0, 1);
/// table.add_transition(0, 1, 0);
/// table.add_sink(1, true);
/// assert!(table.is_sink(1));
/// assert!(table.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    alphabet: TokenAlphabet,
    states: OrderedMap<StateIndex, StateEntry>,
}

impl TransitionTable {
    /// Creates an empty table over the given alphabet.
    pub fn new(alphabet: TokenAlphabet) -> Self {
        Self {
            alphabet,
            states: OrderedMap::new(),
        }
    }

    /// Snapshots the transition structure of an existing automaton into a table. The
    /// resulting table uses the state indices of `automaton`.
    pub fn from_automaton<A: FiniteAutomaton>(automaton: &A) -> Self {
        let alphabet = *automaton.alphabet();
        let mut table = Self::new(alphabet);
        for q in automaton.state_indices() {
            table.add_state(q, automaton.is_accepting(q));
            for token in alphabet.universe() {
                let target = automaton
                    .successor(q, token)
                    .expect("automata must be complete");
                table.add_transition(q, token, target);
            }
        }
        table
    }

    /// Returns the alphabet of the table.
    pub fn alphabet(&self) -> &TokenAlphabet {
        &self.alphabet
    }

    /// Adds the state `q` with the given acceptance label. If the state already exists,
    /// only its label is updated and its transitions are kept.
    pub fn add_state(&mut self, q: StateIndex, accepting: bool) -> &mut StateEntry {
        let entry = self.states.entry(q).or_default();
        entry.accepting = accepting;
        entry
    }

    /// Adds the transition `q --token--> target`, replacing an existing transition of `q`
    /// on `token`. The state `q` is created as a non-accepting state if it does not exist.
    pub fn add_transition(&mut self, q: StateIndex, token: Token, target: StateIndex) {
        self.states.entry(q).or_default().edges.insert(token, target);
    }

    /// Adds `q` as an absorbing state with the given label, i.e. every token leads from
    /// `q` back to `q`.
    pub fn add_sink(&mut self, q: StateIndex, accepting: bool) {
        let alphabet = self.alphabet;
        let entry = self.add_state(q, accepting);
        entry.edges = alphabet.universe().map(|token| (token, q)).collect();
    }

    /// Returns the entry of state `q` if it exists.
    pub fn state(&self, q: StateIndex) -> Option<&StateEntry> {
        self.states.get(&q)
    }

    /// Iterates over all states together with their entries in ascending order.
    pub fn states(&self) -> impl Iterator<Item = (StateIndex, &StateEntry)> + '_ {
        self.states.iter().map(|(q, entry)| (*q, entry))
    }

    /// Returns the number of states in the table.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns whether `q` is accepting, or `None` if the state does not exist.
    pub fn is_accepting(&self, q: StateIndex) -> Option<bool> {
        self.state(q).map(|entry| entry.accepting)
    }

    /// Returns the target of the transition from `q` on `token`, if it exists.
    pub fn target(&self, q: StateIndex, token: Token) -> Option<StateIndex> {
        self.state(q).and_then(|entry| entry.edges.get(&token).copied())
    }

    /// Returns true if and only if `q` exists and every token of the alphabet leads from `q`
    /// back to `q`.
    pub fn is_sink(&self, q: StateIndex) -> bool {
        self.alphabet
            .universe()
            .all(|token| self.target(q, token) == Some(q))
    }

    /// Verifies that the table describes a complete deterministic automaton with initial state
    /// `initial`: every state must have precisely one transition on every token of the alphabet
    /// and all targets must be states of the table.
    pub fn validate(&self, initial: StateIndex) -> Result<(), ConstructionError> {
        if self.states.is_empty() {
            return Err(ConstructionError::EmptyTable);
        }
        if !self.states.contains_key(&initial) {
            return Err(ConstructionError::UnknownInitial(initial));
        }
        for (&state, entry) in &self.states {
            if let Some(&token) = entry.edges.keys().find(|t| !self.alphabet.contains(**t)) {
                return Err(ConstructionError::UnknownToken { state, token });
            }
            for token in self.alphabet.universe() {
                let Some(&target) = entry.edges.get(&token) else {
                    return Err(ConstructionError::MissingTransition { state, token });
                };
                if !self.states.contains_key(&target) {
                    return Err(ConstructionError::UnknownTarget {
                        state,
                        token,
                        target,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Show for TransitionTable {
    fn show(&self) -> String {
        self.states()
            .map(|(q, entry)| {
                format!(
                    "q{q}{} {}",
                    entry.accepting.show(),
                    itertools::Itertools::join(
                        &mut entry.edges.iter().map(|(t, p)| format!("{t}->q{p}")),
                        " "
                    )
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
