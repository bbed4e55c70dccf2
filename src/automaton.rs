//! This module defines the closed definition of a pushdown automaton: its states, stored
//! in an arena and referenced by [`StateId`], its alphabets, and its initial configuration.
//! Definitions are assembled through [`PdaBuilder`], which validates every reference.

use crate::machine::Machine;
use crate::stack::Stack;
use crate::transitions::TransitionTable;
use crate::types::{Alphabet, PdaError, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of a state inside its automaton. Only a [`PdaBuilder`] hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named state owning its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    transitions: TransitionTable,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: TransitionTable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }
}

/// A pushdown automaton accepting by empty stack.
///
/// The definition is immutable once built and may be shared by any number of runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Pda {
    states: Vec<State>,
    input_alphabet: Alphabet,
    stack_alphabet: Alphabet,
    initial_state: StateId,
    initial_symbol: Symbol,
}

impl Pda {
    pub fn builder() -> PdaBuilder {
        PdaBuilder::new()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state for an id handed out by this automaton.
    ///
    /// # Panics
    ///
    /// Panics if `id` comes from a different automaton with more states. Use
    /// [`Pda::get_state`] for ids of unknown origin.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn get_state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == name)
            .map(StateId)
    }

    pub fn input_alphabet(&self) -> &Alphabet {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &Alphabet {
        &self.stack_alphabet
    }

    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    pub fn initial_symbol(&self) -> Symbol {
        self.initial_symbol
    }

    /// A fresh stack holding only the initial stack symbol.
    pub fn initial_stack(&self) -> Result<Stack<'_>, PdaError> {
        Stack::with_initial(&self.stack_alphabet, self.initial_symbol)
    }

    /// Total number of transition outcomes over all states.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|state| state.transitions.len()).sum()
    }

    /// Runs the input through a default, untraced [`Machine`].
    pub fn accepts(&self, input: &str) -> Result<bool, PdaError> {
        Machine::new(self).accepts(input)
    }
}

/// Incrementally assembles a [`Pda`], rejecting any reference to an undeclared state or
/// symbol as soon as it is added.
#[derive(Debug, Default)]
pub struct PdaBuilder {
    states: Vec<State>,
    index: HashMap<String, StateId>,
    input_alphabet: Alphabet,
    stack_alphabet: Alphabet,
}

impl PdaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a state. Names must be unique.
    pub fn state(&mut self, name: &str) -> Result<StateId, PdaError> {
        if self.index.contains_key(name) {
            return Err(PdaError::DefinitionError(format!(
                "Duplicate state: '{}'",
                name
            )));
        }

        let id = StateId(self.states.len());
        self.states.push(State::new(name));
        self.index.insert(name.to_string(), id);

        Ok(id)
    }

    /// Declares an input symbol. Epsilon is always usable and cannot be declared.
    pub fn input_symbol(&mut self, symbol: Symbol) -> Result<(), PdaError> {
        self.input_alphabet.insert(symbol).map(|_| ())
    }

    /// Declares a stack symbol. Epsilon is rejected.
    pub fn stack_symbol(&mut self, symbol: Symbol) -> Result<(), PdaError> {
        self.stack_alphabet.insert(symbol).map(|_| ())
    }

    pub fn stack_alphabet(&self) -> &Alphabet {
        &self.stack_alphabet
    }

    /// Adds the move `from --input, top / push--> to`.
    ///
    /// `input` may be epsilon; `push` may contain epsilon, which pushes nothing.
    pub fn transition(
        &mut self,
        from: &str,
        input: Symbol,
        top: Symbol,
        to: &str,
        push: Vec<Symbol>,
    ) -> Result<(), PdaError> {
        let from_id = self.lookup("From state", from)?;
        let to_id = self.lookup("To state", to)?;

        if !input.is_epsilon() && !self.input_alphabet.contains(input) {
            return Err(PdaError::DefinitionError(format!(
                "Input symbol: '{}' not found in alphabet ( {} )",
                input, self.input_alphabet
            )));
        }

        if !self.stack_alphabet.contains(top) {
            return Err(PdaError::DefinitionError(format!(
                "Stack symbol: '{}' not found in stack alphabet ( {} )",
                top, self.stack_alphabet
            )));
        }

        if let Some(symbol) = push
            .iter()
            .find(|s| !s.is_epsilon() && !self.stack_alphabet.contains(**s))
        {
            return Err(PdaError::DefinitionError(format!(
                "Push symbol: '{}' not found in stack alphabet ( {} )",
                symbol, self.stack_alphabet
            )));
        }

        self.states[from_id.0]
            .transitions
            .add_transition(input, top, to_id, push);

        Ok(())
    }

    /// Finishes the definition with its initial state and initial stack symbol.
    pub fn build(self, initial_state: &str, initial_symbol: Symbol) -> Result<Pda, PdaError> {
        let initial_state = self.lookup("Initial state", initial_state)?;

        if !self.stack_alphabet.contains(initial_symbol) {
            return Err(PdaError::DefinitionError(format!(
                "Initial stack symbol: '{}' not found in stack alphabet ( {} )",
                initial_symbol, self.stack_alphabet
            )));
        }

        Ok(Pda {
            states: self.states,
            input_alphabet: self.input_alphabet,
            stack_alphabet: self.stack_alphabet,
            initial_state,
            initial_symbol,
        })
    }

    fn lookup(&self, role: &str, name: &str) -> Result<StateId, PdaError> {
        self.index.get(name).copied().ok_or_else(|| {
            PdaError::DefinitionError(format!(
                "{}: '{}' not found in states list ( {} )",
                role,
                name,
                self.state_names()
            ))
        })
    }

    fn state_names(&self) -> String {
        self.states
            .iter()
            .map(State::name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
