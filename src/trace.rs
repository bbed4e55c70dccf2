//! Observation hooks for the execution engine.
//!
//! Observers see every configuration the engine examines and every successor it queues.
//! They are purely diagnostic: nothing an observer does can change the outcome of a run.

use crate::automaton::{Pda, StateId};
use crate::machine::Configuration;
use crate::types::Symbol;
use std::io::Write;

/// A successor generated while expanding a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move<'a> {
    pub from: StateId,
    /// The input symbol consumed, or epsilon for a spontaneous move.
    pub consumed: Symbol,
    pub top: Symbol,
    pub to: StateId,
    pub push: &'a [Symbol],
}

/// Receives engine events. Both hooks default to doing nothing.
pub trait Observer {
    /// Called after a configuration is dequeued, before it is examined.
    fn on_configuration(&mut self, _pda: &Pda, _configuration: &Configuration<'_, '_>) {}

    /// Called for each successor, right after it is queued.
    fn on_successor(&mut self, _pda: &Pda, _step: &Move<'_>) {}
}

/// The default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Observer for NoTrace {}

/// Writes a human-readable trace of the search.
pub struct TraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for TraceWriter<W> {
    fn on_configuration(&mut self, pda: &Pda, configuration: &Configuration<'_, '_>) {
        let input = configuration
            .input()
            .iter()
            .map(|s| s.to_string())
            .collect::<String>();

        // Trace output is best effort.
        let _ = write!(
            self.out,
            "--------------------\nCurrent transition:\n\tState: {}\n\tSymbols: {}\n\tStack: {}\n\tNext transitions:\n",
            pda.state(configuration.state()).name(),
            input,
            configuration.stack()
        );
    }

    fn on_successor(&mut self, pda: &Pda, step: &Move<'_>) {
        let push = step.push.iter().map(|s| s.to_string()).collect::<String>();

        let _ = write!(
            self.out,
            "\t\tFrom state: {}\n\t\tConsume: {}\n\t\tStack top: {}\n\t\tTo state: {}\n\t\tStack replacement: {}\n\n",
            pda.state(step.from).name(),
            step.consumed,
            step.top,
            pda.state(step.to).name(),
            push
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;
    use crate::parser::parse;

    #[test]
    fn test_trace_writer_output() {
        let pda = parse("q\na\nZ\nq\nZ\nq a Z q .\n").unwrap();

        let mut machine = Machine::new(&pda).with_observer(TraceWriter::new(Vec::new()));
        assert!(machine.accepts("a").unwrap());

        let output = String::from_utf8(machine.into_observer().into_inner()).unwrap();
        assert!(output.contains("Current transition:"));
        assert!(output.contains("\tState: q\n\tSymbols: a\n\tStack: Z\n"));
        assert!(output.contains("\t\tConsume: a\n\t\tStack top: Z\n\t\tTo state: q\n"));
        assert!(output.contains("\t\tStack replacement: .\n"));
    }

    #[derive(Default)]
    struct Counter {
        configurations: usize,
        successors: usize,
    }

    impl Observer for Counter {
        fn on_configuration(&mut self, _pda: &Pda, _configuration: &Configuration<'_, '_>) {
            self.configurations += 1;
        }

        fn on_successor(&mut self, _pda: &Pda, _step: &Move<'_>) {
            self.successors += 1;
        }
    }

    #[test]
    fn test_observer_does_not_change_result() {
        let pda = parse("q\na\nZ\nq\nZ\nq a Z q .\nq . Z q Z\n").unwrap();

        let plain = Machine::new(&pda).run("a");
        let mut machine = Machine::new(&pda).with_observer(Counter::default());
        let observed = machine.run("a");

        assert_eq!(plain, observed);
        let counter = machine.into_observer();
        assert_eq!(counter.configurations, observed.transitions);
        assert!(counter.successors >= 2);
    }
}
