//! Per-state transition tables.

use crate::automaton::StateId;
use crate::types::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One alternative of a transition: the state to move to and the symbols replacing the
/// popped stack top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The state the automaton moves to.
    pub target: StateId,
    /// Symbols pushed after the pop; the first one ends up on top.
    pub push: Vec<Symbol>,
}

/// Maps `(input symbol, stack top)` to the ordered outcomes available from a state.
///
/// Several outcomes under the same key are nondeterministic alternatives and are explored
/// in insertion order. The input symbol may be [`Symbol::EPSILON`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    transitions: BTreeMap<(Symbol, Symbol), Vec<Outcome>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome under `(input, top)`. Existing outcomes are never replaced.
    pub fn add_transition(
        &mut self,
        input: Symbol,
        top: Symbol,
        target: StateId,
        push: Vec<Symbol>,
    ) {
        self.transitions
            .entry((input, top))
            .or_default()
            .push(Outcome { target, push });
    }

    pub fn has_transitions(&self, input: Symbol, top: Symbol) -> bool {
        self.transitions
            .get(&(input, top))
            .is_some_and(|outcomes| !outcomes.is_empty())
    }

    /// Returns the outcomes for `(input, top)`; an empty slice when there are none.
    pub fn transitions(&self, input: Symbol, top: Symbol) -> &[Outcome] {
        self.transitions
            .get(&(input, top))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of outcomes in the table.
    pub fn len(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterates every `(input, top, outcome)` entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Symbol, &Outcome)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(input, top), outcomes)| outcomes.iter().map(move |o| (input, top, o)))
    }
}
