//! This module defines the `Machine` struct, the execution engine of a pushdown automaton.
//! It performs a breadth-first search over configurations, following both input-consuming
//! and epsilon moves, and accepts when some configuration has consumed the whole input with
//! an empty stack.

use crate::automaton::{Pda, StateId};
use crate::config::Config;
use crate::stack::Stack;
use crate::trace::{Move, NoTrace, Observer};
use crate::types::{PdaError, Symbol};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A snapshot of a run: current state, unconsumed input and stack contents.
///
/// Configurations are never modified once queued; each move builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration<'p, 't> {
    state: StateId,
    input: &'t [Symbol],
    stack: Stack<'p>,
}

impl<'p, 't> Configuration<'p, 't> {
    pub fn state(&self) -> StateId {
        self.state
    }

    /// The remaining input, next symbol first.
    pub fn input(&self) -> &'t [Symbol] {
        self.input
    }

    pub fn stack(&self) -> &Stack<'p> {
        &self.stack
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Some path consumed the whole input and emptied the stack.
    Accepted,
    /// Every path reached a dead end.
    Rejected,
    /// The search was aborted; nothing is known about the input.
    Failed(PdaError),
}

/// The result of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub verdict: Verdict,
    /// Number of configurations taken from the queue, including the one that failed.
    pub transitions: usize,
}

impl Execution {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Collapses the verdict into `Ok(accepted)` or the error that aborted the run.
    pub fn into_result(self) -> Result<bool, PdaError> {
        match self.verdict {
            Verdict::Accepted => Ok(true),
            Verdict::Rejected => Ok(false),
            Verdict::Failed(error) => Err(error),
        }
    }
}

/// Runs inputs against a borrowed [`Pda`].
///
/// The machine holds no per-run state: the work queue and the transition counter live
/// inside [`Machine::run`], so consecutive runs never influence each other.
pub struct Machine<'p, O: Observer = NoTrace> {
    pda: &'p Pda,
    config: Config,
    observer: O,
}

impl<'p> Machine<'p, NoTrace> {
    /// Creates an untraced machine with the default [`Config`].
    pub fn new(pda: &'p Pda) -> Self {
        Self {
            pda,
            config: Config::default(),
            observer: NoTrace,
        }
    }
}

impl<'p, O: Observer> Machine<'p, O> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the observer that receives search events.
    pub fn with_observer<P: Observer>(self, observer: P) -> Machine<'p, P> {
        Machine {
            pda: self.pda,
            config: self.config,
            observer,
        }
    }

    pub fn pda(&self) -> &'p Pda {
        self.pda
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Decides whether the automaton accepts `input` by empty stack.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` for a definitive answer.
    /// * `Err(PdaError::InvalidInput)` if a symbol outside the input alphabet is reached.
    /// * `Err(PdaError::BoundExceeded)` if the search hits the configured bound.
    pub fn accepts(&mut self, input: &str) -> Result<bool, PdaError> {
        self.run(input).into_result()
    }

    /// Runs the search to completion and reports the verdict with the number of
    /// configurations processed.
    pub fn run(&mut self, input: &str) -> Execution {
        let tape = Symbol::to_symbols(input);
        let mut transitions = 0;

        let verdict = match self.search(&tape, &mut transitions) {
            Ok(true) => Verdict::Accepted,
            Ok(false) => Verdict::Rejected,
            Err(error) => Verdict::Failed(error),
        };

        debug!(input, ?verdict, transitions, "run finished");

        Execution {
            verdict,
            transitions,
        }
    }

    fn search(&mut self, tape: &[Symbol], transitions: &mut usize) -> Result<bool, PdaError> {
        let pda = self.pda;
        let mut queue = VecDeque::from([Configuration {
            state: pda.initial_state(),
            input: tape,
            stack: pda.initial_stack()?,
        }]);

        while let Some(configuration) = queue.pop_front() {
            *transitions += 1;
            if *transitions >= self.config.max_transitions {
                return Err(PdaError::BoundExceeded(self.config.max_transitions));
            }

            self.observer.on_configuration(pda, &configuration);
            trace!(
                state = pda.state(configuration.state).name(),
                remaining = configuration.input.len(),
                depth = configuration.stack.len(),
                "expanding configuration"
            );

            let Configuration {
                state,
                input,
                mut stack,
            } = configuration;

            // An empty stack ends the path: accept only if the input is used up as well.
            let Some(top) = stack.pop() else {
                if input.is_empty() {
                    return Ok(true);
                }
                continue;
            };

            // A `.` on the tape is read like any declared symbol, under the epsilon key.
            let (symbol, rest) = match input.split_first() {
                Some((&symbol, rest))
                    if symbol.is_epsilon() || pda.input_alphabet().contains(symbol) =>
                {
                    (symbol, rest)
                }
                Some((&symbol, _)) => {
                    return Err(PdaError::InvalidInput {
                        symbol,
                        alphabet: pda.input_alphabet().clone(),
                    })
                }
                None => (Symbol::EPSILON, input),
            };

            self.expand(&mut queue, state, symbol, top, &stack, rest)?;

            // Spontaneous moves leave the input untouched.
            if !symbol.is_epsilon() {
                self.expand(&mut queue, state, Symbol::EPSILON, top, &stack, input)?;
            }
        }

        Ok(false)
    }

    /// Queues one successor per outcome registered under `(consumed, top)` in `from`.
    fn expand<'t>(
        &mut self,
        queue: &mut VecDeque<Configuration<'p, 't>>,
        from: StateId,
        consumed: Symbol,
        top: Symbol,
        stack: &Stack<'p>,
        input: &'t [Symbol],
    ) -> Result<(), PdaError> {
        let pda = self.pda;

        for outcome in pda.state(from).transitions().transitions(consumed, top) {
            let mut next = stack.clone();
            next.push_all(&outcome.push)?;

            queue.push_back(Configuration {
                state: outcome.target,
                input,
                stack: next,
            });

            self.observer.on_successor(
                pda,
                &Move {
                    from,
                    consumed,
                    top,
                    to: outcome.target,
                    push: &outcome.push,
                },
            );
        }

        Ok(())
    }
}
