//! This crate provides the core logic for a pushdown automaton simulator.
//! It includes modules for parsing automaton definitions, running inputs through a
//! nondeterministic breadth-first execution engine that accepts by empty stack, tracing
//! that search, and a collection of predefined sample automata.

pub mod automaton;
pub mod config;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod stack;
pub mod trace;
pub mod transitions;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the automaton definition types.
pub use automaton::{Pda, PdaBuilder, State, StateId};
/// Re-exports the engine configuration.
pub use config::Config;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the execution engine and its results.
pub use machine::{Configuration, Execution, Machine, Verdict};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the embedded program library.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
pub use stack::Stack;
/// Re-exports the observer hooks used to trace a run.
pub use trace::{Move, NoTrace, Observer, TraceWriter};
pub use transitions::{Outcome, TransitionTable};
/// Re-exports the value and error types from the types module.
pub use types::{Alphabet, PdaError, Symbol, MAX_DEFINITION_SIZE, MAX_TRANSITIONS};
