use std::collections::VecDeque;

use bit_set::BitSet;

use super::{Dfa, FiniteAutomaton, StateIndex};
use crate::math::{Map, Set};

/// Result of Moore's partition refinement restricted to the reachable states.
struct Refinement {
    reachable: Vec<StateIndex>,
    class: Vec<usize>,
}

/// Runs Moore's partition refinement on the states of `dfa` that are reachable from its
/// initial state. Two states end up with the same class index if and only if they accept
/// the same language. Class indices of unreachable states are meaningless.
fn refine(dfa: &Dfa) -> Refinement {
    let reachable = dfa.reachable_state_indices();
    let mut class = vec![0; dfa.size()];
    for &q in &reachable {
        class[q] = usize::from(dfa.is_accepting(q));
    }
    let mut count = reachable
        .iter()
        .map(|q| class[*q])
        .collect::<Set<_>>()
        .len();

    loop {
        let mut signatures: Map<(usize, Vec<usize>), usize> = Map::default();
        let mut next = vec![0; dfa.size()];
        for &q in &reachable {
            let signature = (
                class[q],
                dfa.alphabet()
                    .universe()
                    .map(|token| class[dfa.successor_unchecked(q, token)])
                    .collect(),
            );
            let fresh = signatures.len();
            next[q] = *signatures.entry(signature).or_insert(fresh);
        }
        class = next;
        // classes are only ever split, so an unchanged count means the partition is stable
        if signatures.len() == count {
            break;
        }
        count = signatures.len();
    }

    Refinement { reachable, class }
}

/// Computes the unique minimal [`Dfa`] that accepts the same language as `dfa`. The states of
/// the result are numbered in the order in which a breadth-first search from the initial
/// state discovers them, so two automata with the same language minimize to identical values.
pub(crate) fn minimize(dfa: &Dfa) -> Dfa {
    let Refinement { reachable, class } = refine(dfa);
    let alphabet = *dfa.alphabet();

    // the first member of each class that was reached acts as its representative
    let mut representative: Map<usize, StateIndex> = Map::default();
    for &q in &reachable {
        representative.entry(class[q]).or_insert(q);
    }

    let mut numbering: Map<usize, StateIndex> = Map::default();
    numbering.insert(class[dfa.initial()], 0);
    let mut queue = VecDeque::from([class[dfa.initial()]]);
    let mut transitions = Vec::with_capacity(representative.len() * alphabet.size());
    let mut accepting = BitSet::with_capacity(representative.len());

    while let Some(c) = queue.pop_front() {
        let q = representative[&c];
        if dfa.is_accepting(q) {
            accepting.insert(numbering[&c]);
        }
        for token in alphabet.universe() {
            let target = class[dfa.successor_unchecked(q, token)];
            let fresh = numbering.len();
            let index = *numbering.entry(target).or_insert_with(|| {
                queue.push_back(target);
                fresh
            });
            transitions.push(index);
        }
    }

    Dfa::from_parts(alphabet, 0, accepting, transitions, numbering.len())
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// The chain 0 -> 1 -> 2 where states 1 and 2 are both accepting sinks for all practical
    /// purposes, and state 3 is unreachable.
    fn redundant() -> Dfa {
        let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
        table.add_state(0, false);
        table.add_transition(0, 0, 1);
        table.add_transition(0, 1, 0);
        table.add_state(1, true);
        table.add_transition(1, 0, 2);
        table.add_transition(1, 1, 1);
        table.add_sink(2, true);
        table.add_sink(3, false);
        Dfa::construct(&table, 0).unwrap()
    }

    #[test]
    fn minimization_merges_and_trims() {
        let dfa = redundant();
        let min = dfa.minimize();
        assert_eq!(min.size(), 2);
        assert_eq!(min.initial(), 0);
        assert!(!min.is_accepting(0));
        assert!(min.is_accepting(1));
        assert!(min.is_sink(1));
        for word in [vec![0], vec![1, 1, 0, 1], vec![], vec![1]] {
            assert_eq!(dfa.accepts(&word), min.accepts(&word));
        }
    }

    #[test]
    fn minimization_is_canonical() {
        let mut table = TransitionTable::new(TokenAlphabet::of_size(2));
        table.add_sink(0, true);
        table.add_state(5, false);
        table.add_transition(5, 0, 0);
        table.add_transition(5, 1, 5);
        let other = Dfa::construct(&table, 5).unwrap();

        assert_eq!(redundant().minimize(), other.minimize());
        assert_eq!(other.minimize().minimize(), other.minimize());
    }

    #[test]
    fn empty_language_collapses() {
        let mut table = TransitionTable::new(TokenAlphabet::of_size(3));
        table.add_state(0, false);
        for token in 0..3 {
            table.add_transition(0, token, (token + 1) % 3);
            table.add_transition(1, token, 2);
        }
        table.add_sink(2, false);
        let min = Dfa::construct(&table, 0).unwrap().minimize();
        assert_eq!(min.size(), 1);
        assert!(min.is_empty_language());
    }
}
