//! The pushdown store of an automaton: a LIFO sequence of symbols drawn from a fixed
//! stack alphabet.

use crate::types::{Alphabet, PdaError, Symbol};
use std::fmt;

/// A stack of symbols constrained to a stack alphabet.
///
/// Cloning a stack copies its contents; the alphabet is borrowed from the automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<'a> {
    alphabet: &'a Alphabet,
    symbols: Vec<Symbol>,
}

impl<'a> Stack<'a> {
    /// Creates an empty stack over the given alphabet.
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            symbols: Vec::new(),
        }
    }

    /// Creates a stack holding a single initial symbol.
    pub fn with_initial(alphabet: &'a Alphabet, initial: Symbol) -> Result<Self, PdaError> {
        let mut stack = Self::new(alphabet);
        stack.push(initial)?;
        Ok(stack)
    }

    /// Pushes a symbol on top of the stack.
    ///
    /// Pushing [`Symbol::EPSILON`] does nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the symbol was pushed or was epsilon.
    /// * `Err(PdaError::DefinitionError)` if the symbol is not in the stack alphabet.
    pub fn push(&mut self, symbol: Symbol) -> Result<(), PdaError> {
        if symbol.is_epsilon() {
            return Ok(());
        }

        if !self.alphabet.contains(symbol) {
            return Err(PdaError::DefinitionError(format!(
                "Stack symbol '{}' not found in stack alphabet ( {} )",
                symbol, self.alphabet
            )));
        }

        self.symbols.push(symbol);
        Ok(())
    }

    /// Pushes a sequence so that its first symbol ends up on top.
    pub fn push_all(&mut self, sequence: &[Symbol]) -> Result<(), PdaError> {
        for &symbol in sequence.iter().rev() {
            self.push(symbol)?;
        }

        Ok(())
    }

    /// Removes and returns the top symbol, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<Symbol> {
        self.symbols.pop()
    }

    pub fn top(&self) -> Option<Symbol> {
        self.symbols.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Iterates the contents from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().rev().copied()
    }
}

impl fmt::Display for Stack<'_> {
    /// Renders the contents top to bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
