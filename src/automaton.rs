use rand::Rng;

use crate::{Token, TokenAlphabet, TransitionTable};

mod dfa;
pub use dfa::Dfa;

mod minimization;

mod reachable;
pub use reachable::MinimalRepresentatives;

pub use crate::table::ConstructionError;

/// States of an automaton with `n` states are identified by the integers `0` to `n-1`.
pub type StateIndex = usize;

/// The operations that the samplers need from an automaton. The samplers never look into how an
/// automaton is represented, they only build [`TransitionTable`]s, hand them to
/// [`FiniteAutomaton::construct`] and then work through the methods of this trait. This allows
/// swapping in a different automaton implementation, for example one that is backed by an
/// external library or a stub for testing.
///
/// An automaton is deterministic and complete over its [`TokenAlphabet`], it has a designated
/// initial state and labels every state as either accepting or rejecting. A finite word is
/// accepted if reading it from the initial state leads to an accepting state.
pub trait FiniteAutomaton: Sized + Clone + std::fmt::Debug {
    /// Builds an automaton from a complete transition table, where `initial` designates the
    /// initial state. Fails if the table does not describe a complete deterministic automaton.
    fn construct(table: &TransitionTable, initial: StateIndex) -> Result<Self, ConstructionError>;

    /// Returns the alphabet over which the automaton operates.
    fn alphabet(&self) -> &TokenAlphabet;

    /// Returns the initial state.
    fn initial(&self) -> StateIndex;

    /// Returns the indices of all states.
    fn state_indices(&self) -> Vec<StateIndex>;

    /// Returns whether `q` is accepting. States that do not exist are never accepting.
    fn is_accepting(&self, q: StateIndex) -> bool;

    /// Returns the state that is reached from `q` on `token`, or `None` if either of the two
    /// does not exist.
    fn successor(&self, q: StateIndex, token: Token) -> Option<StateIndex>;

    /// Returns an automaton that accepts the same language and has the least possible number of
    /// states. State indices are not preserved.
    fn minimize(&self) -> Self;

    /// Tries to construct a (finite) word witnessing that the accepted language is non-empty.
    /// If such a word exists, it is returned, otherwise `None`.
    fn give_word(&self) -> Option<Vec<Token>>;

    /// Returns a copy of `self` in which precisely one transition has been redirected to a
    /// different target, or `None` if no such change is possible.
    fn change_transition<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self>;

    /// Returns the number of states.
    fn size(&self) -> usize {
        self.state_indices().len()
    }

    /// Returns true if and only if the accepted language is empty.
    fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Returns the indices of all accepting states.
    fn accepting_states(&self) -> Vec<StateIndex> {
        self.state_indices()
            .into_iter()
            .filter(|q| self.is_accepting(*q))
            .collect()
    }

    /// Returns the state that is reached by reading `word` from the initial state.
    fn reached_state(&self, word: &[Token]) -> Option<StateIndex> {
        word.iter()
            .try_fold(self.initial(), |q, token| self.successor(q, *token))
    }

    /// Returns whether the automaton accepts the given finite word.
    fn accepts(&self, word: &[Token]) -> bool {
        self.reached_state(word)
            .map(|q| self.is_accepting(q))
            .unwrap_or(false)
    }

    /// Returns true if and only if every token leads from `q` back to `q`.
    fn is_sink(&self, q: StateIndex) -> bool {
        self.alphabet()
            .universe()
            .all(|token| self.successor(q, token) == Some(q))
    }
}
