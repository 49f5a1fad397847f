use itertools::Itertools;

use crate::Show;

/// A token is identified by its position in the [`TokenAlphabet`], i.e. for an alphabet with
/// `n` tokens, the tokens are `0, 1, ..., n-1`.
pub type Token = usize;

/// Represents the fixed alphabet `{0, ..., n-1}` of tokens. As the tokens are just consecutive
/// integers, the alphabet only needs to remember how many of them there are.
///
/// # Example
/// ```
/// use dfa_samplers::prelude::*;
///
/// let alphabet = TokenAlphabet::of_size(3);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec![0, 1, 2]);
/// assert!(alphabet.contains(2));
/// assert!(!alphabet.contains(3));
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct TokenAlphabet(usize);

impl TokenAlphabet {
    /// Creates a new [`TokenAlphabet`] consisting of the tokens `0` to `size - 1`.
    pub fn of_size(size: usize) -> Self {
        Self(size)
    }

    /// Returns the number of tokens in the alphabet.
    pub fn size(&self) -> usize {
        self.0
    }

    /// Returns an iterator over all tokens in ascending order.
    pub fn universe(&self) -> std::ops::Range<Token> {
        0..self.0
    }

    /// Returns true if and only if `token` belongs to the alphabet.
    pub fn contains(&self, token: Token) -> bool {
        token < self.0
    }
}

impl Show for TokenAlphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.universe().join(", "))
    }
}
