use std::collections::VecDeque;

use bit_set::BitSet;

use crate::{automaton::StateIndex, Dfa, FiniteAutomaton, Token};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Token>, StateIndex);

/// Struct that can return the minimal representatives of a [`Dfa`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin. States are produced in breadth-first order.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a Dfa,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the search in `origin`.
    pub fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for token in self.dfa.alphabet().universe() {
            let Some(p) = self.dfa.successor(q, token) else {
                continue;
            };
            if self.seen.insert(p) {
                let mut new_access = access.clone();
                new_access.push(token);
                self.queue.push_back((new_access, p));
            }
        }
        Some((access, q))
    }
}
