//! This module defines the core value types shared by the pushdown automaton simulator:
//! symbols, alphabets, global limits, and the error type used throughout the crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The character reserved for the empty symbol in definitions and push sequences.
pub const EPSILON_CHAR: char = '.';
/// Lines of a definition starting with this character are ignored.
pub const COMMENT_SYMBOL: char = '#';
/// The maximum allowed size for a definition in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB
/// The default number of configurations a single run may process before giving up.
pub const MAX_TRANSITIONS: usize = 10_000_000;

/// An atomic alphabet element.
///
/// Equality and ordering are those of the underlying character. The value
/// [`Symbol::EPSILON`] stands for "no symbol" and is never a member of an [`Alphabet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    /// The empty symbol: consumes no input when matched, pushes nothing when pushed.
    pub const EPSILON: Symbol = Symbol(EPSILON_CHAR);

    pub const fn new(value: char) -> Self {
        Symbol(value)
    }

    pub fn value(self) -> char {
        self.0
    }

    pub fn is_epsilon(self) -> bool {
        self == Self::EPSILON
    }

    /// Splits a string into its symbols, left to right.
    ///
    /// Used both for input tapes and for the push text of a transition.
    pub fn to_symbols(input: &str) -> Vec<Symbol> {
        input.chars().map(Symbol).collect()
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite set of symbols. Used for both the input and the stack vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet(BTreeSet<Symbol>);

impl Alphabet {
    /// Builds an alphabet from the given symbols, collapsing duplicates.
    ///
    /// # Returns
    ///
    /// * `Ok(Alphabet)` if none of the symbols is [`Symbol::EPSILON`].
    /// * `Err(PdaError::DefinitionError)` otherwise.
    pub fn new<I>(symbols: I) -> Result<Self, PdaError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut alphabet = Alphabet::default();
        for symbol in symbols {
            alphabet.insert(symbol)?;
        }

        Ok(alphabet)
    }

    /// Adds a symbol. Returns `true` if it was not already present.
    pub fn insert(&mut self, symbol: Symbol) -> Result<bool, PdaError> {
        if symbol.is_epsilon() {
            return Err(PdaError::DefinitionError(format!(
                "Symbol '{}' is reserved for epsilon and cannot be part of an alphabet",
                EPSILON_CHAR
            )));
        }

        Ok(self.0.insert(symbol))
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Alphabet {
    /// Renders the symbols separated by spaces, in order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        write!(f, "{}", symbols.join(" "))
    }
}

/// Represents the errors that can occur while loading or running a pushdown automaton.
///
/// `FileError`, `ParseError` and `DefinitionError` are raised at load time; the remaining
/// variants abort a run in progress.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdaError {
    /// Indicates that a definition file or directory could not be read.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates that the definition text does not follow the line format.
    #[error("Definition parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a definition that parses but references undeclared or reserved names.
    #[error("Definition error: {0}")]
    DefinitionError(String),
    /// Indicates an input symbol outside the declared input alphabet.
    #[error("Runtime error: symbol '{symbol}' not found in input alphabet ( {alphabet} )")]
    InvalidInput { symbol: Symbol, alphabet: Alphabet },
    /// Indicates that the search processed too many configurations without finishing.
    #[error("Runtime error: computation bound of {0} transitions exceeded")]
    BoundExceeded(usize),
}

impl PdaError {
    /// Returns `true` for errors raised while loading a definition.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            PdaError::FileError(_) | PdaError::ParseError(_) | PdaError::DefinitionError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_serialization() {
        let symbol = Symbol::new('(');

        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"(\"");

        let deserialized: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, symbol);
    }

    #[test]
    fn test_to_symbols_keeps_order() {
        let symbols = Symbol::to_symbols("ab.");

        assert_eq!(
            symbols,
            vec![Symbol::new('a'), Symbol::new('b'), Symbol::EPSILON]
        );
        assert!(symbols[2].is_epsilon());
        assert!(Symbol::to_symbols("").is_empty());
    }

    #[test]
    fn test_symbol_ordering() {
        assert!(Symbol::new('a') < Symbol::new('b'));
        assert_eq!(Symbol::from('x'), Symbol::new('x'));
        assert_ne!(Symbol::new('x'), Symbol::EPSILON);
    }

    #[test]
    fn test_alphabet_collapses_duplicates() {
        let alphabet = Alphabet::new(Symbol::to_symbols("abba")).unwrap();

        assert_eq!(alphabet.len(), 2);
        assert!(alphabet.contains(Symbol::new('a')));
        assert!(!alphabet.contains(Symbol::new('c')));
        assert_eq!(alphabet.to_string(), "a b");
    }

    #[test]
    fn test_alphabet_rejects_epsilon() {
        let result = Alphabet::new(Symbol::to_symbols("A.B"));

        assert!(matches!(result, Err(PdaError::DefinitionError(_))));
    }

    #[test]
    fn test_error_display() {
        let error = PdaError::InvalidInput {
            symbol: Symbol::new('z'),
            alphabet: Alphabet::new(Symbol::to_symbols("ab")).unwrap(),
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("'z'"));
        assert!(error_msg.contains("a b"));
        assert!(!error.is_definition_error());

        let error = PdaError::BoundExceeded(MAX_TRANSITIONS);
        assert!(error.to_string().contains("10000000"));
    }

    #[test]
    fn test_definition_error_grouping() {
        assert!(PdaError::FileError("missing".into()).is_definition_error());
        assert!(PdaError::DefinitionError("bad".into()).is_definition_error());
        assert!(!PdaError::BoundExceeded(1).is_definition_error());
    }
}
