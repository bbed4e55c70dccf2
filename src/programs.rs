//! A small library of sample automata compiled into the crate, plus a serializable summary
//! of any loaded definition.

use crate::automaton::Pda;
use crate::parser::parse;
use serde::{Deserialize, Serialize};
use tracing::error;

// Embedded definitions, by name.
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    (
        "balanced-parentheses",
        include_str!("../programs/balanced-parentheses.pda"),
    ),
    ("anbn", include_str!("../programs/anbn.pda")),
    (
        "even-palindrome",
        include_str!("../programs/even-palindrome.pda"),
    ),
    ("epsilon-loop", include_str!("../programs/epsilon-loop.pda")),
];

/// A parsed embedded definition together with its source text.
#[derive(Debug)]
pub struct Program {
    pub name: &'static str,
    pub source: &'static str,
    pub pda: Pda,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = load_embedded();
}

fn load_embedded() -> Vec<Program> {
    PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, source)| match parse(source) {
            Ok(pda) => Some(Program { name, source, pda }),
            Err(e) => {
                error!(name, error = %e, "failed to parse embedded program");
                None
            }
        })
        .collect()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    pub fn get_program_by_index(index: usize) -> Option<&'static Program> {
        PROGRAMS.get(index)
    }

    pub fn get_program_by_name(name: &str) -> Option<&'static Program> {
        PROGRAMS.iter().find(|program| program.name == name)
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    pub fn get_program_info(index: usize) -> Option<ProgramInfo> {
        Self::get_program_by_index(index).map(|program| ProgramInfo::new(program.name, &program.pda))
    }
}

/// A flat, serializable description of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub name: String,
    pub states: Vec<String>,
    pub input_alphabet: String,
    pub stack_alphabet: String,
    pub initial_state: String,
    pub initial_symbol: char,
    pub transitions: Vec<TransitionInfo>,
}

/// One transition line, written back in definition-file notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInfo {
    pub from: String,
    pub input: char,
    pub top: char,
    pub to: String,
    pub push: String,
}

impl ProgramInfo {
    pub fn new(name: impl Into<String>, pda: &Pda) -> Self {
        let transitions = pda
            .states()
            .iter()
            .flat_map(|state| {
                state
                    .transitions()
                    .iter()
                    .map(move |(input, top, outcome)| TransitionInfo {
                        from: state.name().to_string(),
                        input: input.value(),
                        top: top.value(),
                        to: pda.state(outcome.target).name().to_string(),
                        push: outcome.push.iter().map(|s| s.value()).collect(),
                    })
            })
            .collect();

        Self {
            name: name.into(),
            states: pda.states().iter().map(|s| s.name().to_string()).collect(),
            input_alphabet: pda.input_alphabet().to_string(),
            stack_alphabet: pda.stack_alphabet().to_string(),
            initial_state: pda.state(pda.initial_state()).name().to_string(),
            initial_symbol: pda.initial_symbol().value(),
            transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::machine::Machine;
    use crate::types::PdaError;

    #[test]
    fn test_all_programs_are_valid() {
        assert_eq!(ProgramManager::get_program_count(), PROGRAM_TEXTS.len());
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();

        assert_eq!(
            names,
            vec!["balanced-parentheses", "anbn", "even-palindrome", "epsilon-loop"]
        );
    }

    #[test]
    fn test_get_program_by_name() {
        let program = ProgramManager::get_program_by_name("anbn").unwrap();

        assert_eq!(program.pda.accepts("aaabbb"), Ok(true));
        assert_eq!(program.pda.accepts("aabbb"), Ok(false));
        assert!(program.source.contains("q0 q1"));
        assert!(ProgramManager::get_program_by_name("missing").is_none());
    }

    #[test]
    fn test_programs_can_be_executed() {
        let cases = [
            ("balanced-parentheses", "(()())", true),
            ("balanced-parentheses", "(()", false),
            ("anbn", "", true),
            ("anbn", "ba", false),
            ("even-palindrome", "abba", true),
            ("even-palindrome", "abab", false),
            ("even-palindrome", "aba", false),
        ];

        for (name, input, expected) in cases {
            let program = ProgramManager::get_program_by_name(name).unwrap();
            assert_eq!(program.pda.accepts(input), Ok(expected), "{name} on {input:?}");
        }
    }

    #[test]
    fn test_epsilon_loop_hits_bound() {
        let program = ProgramManager::get_program_by_name("epsilon-loop").unwrap();
        let mut machine =
            Machine::new(&program.pda).with_config(Config::new().with_max_transitions(1_000));

        assert_eq!(machine.accepts("aa"), Err(PdaError::BoundExceeded(1_000)));
    }

    #[test]
    fn test_get_program_info() {
        let info = ProgramManager::get_program_info(1).unwrap();

        assert_eq!(info.name, "anbn");
        assert_eq!(info.states, vec!["q0", "q1"]);
        assert_eq!(info.input_alphabet, "a b");
        assert_eq!(info.initial_state, "q0");
        assert_eq!(info.initial_symbol, 'Z');
        assert_eq!(info.transitions.len(), 6);
        assert!(info.transitions.contains(&TransitionInfo {
            from: "q0".to_string(),
            input: '.',
            top: 'Z',
            to: "q1".to_string(),
            push: "Z".to_string(),
        }));
        assert!(ProgramManager::get_program_info(99).is_none());
    }

    #[test]
    fn test_program_info_serialization() {
        let program = ProgramManager::get_program_by_name("balanced-parentheses").unwrap();
        let info = ProgramInfo::new(program.name, &program.pda);

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"initial_symbol\":\"Z\""));

        let deserialized: ProgramInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, info);
    }
}
