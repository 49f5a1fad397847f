//! Library for sampling random deterministic finite automata (DFAs) that encode "reach" and
//! "reach-avoid" goals over a fixed alphabet of tokens. The sampled automata are meant to be
//! used as task specifications for automaton-conditioned agents, so every automaton that is
//! handed out accepts at least one word.
//!
//! The central abstraction is the [`random::Sampler`] trait. A sampler draws a size through a
//! [`random::SizeDistribution`], builds a [`TransitionTable`] that forms a chain of states
//! leading to an accepting sink, hands it to some [`FiniteAutomaton`] implementation which
//! constructs and minimizes it, and finally discards the candidate if its language turns out
//! to be empty. Three samplers are provided:
//! - [`random::ReachSampler`] produces chains that end in a single accepting sink.
//! - [`random::ReachAvoidSampler`] additionally adds a rejecting sink that must be avoided.
//! - [`random::RadSampler`] starts from a reach-avoid automaton and applies a bounded number
//!   of random transition mutations, repairing the "accepting states are absorbing" invariant
//!   after every mutation.
//!
//! The automaton itself is abstracted through [`FiniteAutomaton`], which is implemented for the
//! table based [`Dfa`] of this crate. All randomness is threaded through explicitly, meaning that
//! every sampling operation takes a mutable reference to some [`rand::Rng`]. For an endless
//! stream of automata, see [`random::Samples`] and the `*_sequence` functions.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_samplers::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Token, TokenAlphabet},
        automaton::{ConstructionError, Dfa, FiniteAutomaton, StateIndex},
        math,
        random::{
            normalize_sinks, rad_sequence, reach_avoid_sequence, reach_sequence, size_bound,
            ConfigError, RadSampler, ReachAvoidSampler, ReachSampler, Sampler, SamplerConfig,
            SamplerConfigBuilder, Samples, SizeDistribution,
        },
        show::Show,
        table::{StateEntry, TransitionTable},
    };
}

/// Defines the token alphabet over which all automata operate.
pub mod alphabet;
pub use alphabet::{Token, TokenAlphabet};

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

mod show;
pub use show::{show_duration, Show};

/// Transition tables are the plain description of an automaton that the samplers build
/// before handing it to a [`FiniteAutomaton`].
pub mod table;
pub use table::TransitionTable;

/// Defines the interface that sampled automata have to provide together with a table based
/// implementation of it.
pub mod automaton;
pub use automaton::{Dfa, FiniteAutomaton};

/// Implements the random generation of reach, reach-avoid and mutated reach-avoid automata.
pub mod random;
