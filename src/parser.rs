//! This module provides the parser for pushdown automaton definitions, utilizing the `pest`
//! crate. The grammar in `grammar.pest` fixes the line layout; this module turns the parse
//! tree into a validated [`Pda`], reporting semantic problems with their line number.

use crate::{
    automaton::{Pda, PdaBuilder},
    types::{PdaError, Symbol, MAX_DEFINITION_SIZE},
};
use pest::{
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use tracing::{debug, warn};

/// Derives a `PestParser` for the definition grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct PdaParser;

/// Parses a definition into a [`Pda`].
///
/// # Arguments
///
/// * `input` - The definition text.
///
/// # Returns
///
/// * `Ok(Pda)` if the text follows the line format and every reference is declared.
/// * `Err(PdaError::ParseError)` if the text does not follow the line format.
/// * `Err(PdaError::DefinitionError)` if it references undeclared states or symbols,
///   declares a state twice, or uses epsilon as a stack symbol.
pub fn parse(input: &str) -> Result<Pda, PdaError> {
    if input.len() > MAX_DEFINITION_SIZE {
        return Err(PdaError::DefinitionError(format!(
            "Definition is {} bytes, the limit is {} bytes",
            input.len(),
            MAX_DEFINITION_SIZE
        )));
    }

    let root = PdaParser::parse(Rule::definition, input)
        .map_err(|e| PdaError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| PdaError::DefinitionError("Empty definition".to_string()))?;

    let pda = parse_definition(root)?;

    debug!(
        states = pda.states().len(),
        transitions = pda.transition_count(),
        "definition loaded"
    );

    Ok(pda)
}

/// Walks the header lines and the transition lines of a `Pair<Rule::definition>`.
fn parse_definition(pair: Pair<Rule>) -> Result<Pda, PdaError> {
    let mut builder = Pda::builder();
    let mut initial_state: Option<(String, Span)> = None;
    let mut initial_symbol: Option<(Symbol, Span)> = None;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::states => {
                for name in p.into_inner() {
                    let span = name.as_span();
                    builder.state(name.as_str()).map_err(|e| at_line(e, span))?;
                }
            }
            Rule::input_alphabet => {
                for token in p.into_inner() {
                    let symbol = parse_symbol(&token)?;
                    // Epsilon is always an input key; listing it changes nothing.
                    if symbol.is_epsilon() {
                        warn!(line = line_of(token.as_span()), "epsilon listed in input alphabet");
                        continue;
                    }
                    builder
                        .input_symbol(symbol)
                        .map_err(|e| at_line(e, token.as_span()))?;
                }
            }
            Rule::stack_alphabet => {
                for token in p.into_inner() {
                    let symbol = parse_symbol(&token)?;
                    builder
                        .stack_symbol(symbol)
                        .map_err(|e| at_line(e, token.as_span()))?;
                }
            }
            Rule::initial_state => {
                let span = p.as_span();
                let name = next_pair(&mut p.into_inner(), span)?;
                initial_state = Some((name.as_str().to_string(), span));
            }
            Rule::initial_symbol => {
                let span = p.as_span();
                let token = next_pair(&mut p.into_inner(), span)?;
                initial_symbol = Some((parse_symbol(&token)?, span));
            }
            Rule::transition => parse_transition(p, &mut builder)?,
            _ => {} // EOI
        }
    }

    let (state, state_span) = check_required_line(initial_state, "initial state")?;
    let (symbol, symbol_span) = check_required_line(initial_symbol, "initial stack symbol")?;

    if !builder.stack_alphabet().contains(symbol) {
        return Err(at_line(
            PdaError::DefinitionError(format!(
                "Initial stack symbol: '{}' not found in stack alphabet ( {} )",
                symbol,
                builder.stack_alphabet()
            )),
            symbol_span,
        ));
    }

    builder
        .build(&state, symbol)
        .map_err(|e| at_line(e, state_span))
}

/// Parses a `from input top to push` line and adds it to the builder.
fn parse_transition(pair: Pair<Rule>, builder: &mut PdaBuilder) -> Result<(), PdaError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let from = next_pair(&mut pairs, span)?;
    let input = parse_symbol(&next_pair(&mut pairs, span)?)?;
    let top = parse_symbol(&next_pair(&mut pairs, span)?)?;
    let to = next_pair(&mut pairs, span)?;
    let push = Symbol::to_symbols(next_pair(&mut pairs, span)?.as_str());

    builder
        .transition(from.as_str(), input, top, to.as_str(), push)
        .map_err(|e| at_line(e, span))
}

/// Parses a single-character symbol token.
fn parse_symbol(pair: &Pair<Rule>) -> Result<Symbol, PdaError> {
    let text = pair.as_str();
    let mut chars = text.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Symbol::new(c)),
        _ => Err(at_line(
            PdaError::DefinitionError(format!("Symbol '{}' must be a single character", text)),
            pair.as_span(),
        )),
    }
}

/// Takes the next child of a rule whose shape the grammar guarantees.
fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, span: Span) -> Result<Pair<'i, Rule>, PdaError> {
    pairs.next().ok_or_else(|| {
        at_line(
            PdaError::DefinitionError("Incomplete line".to_string()),
            span,
        )
    })
}

/// Checks that a header line has been read, returning an `Err` if it is missing.
fn check_required_line<T>(value: Option<T>, name: &str) -> Result<T, PdaError> {
    value.ok_or_else(|| PdaError::DefinitionError(format!("Missing {} line", name)))
}

/// Prefixes a definition error with the line it was found on.
fn at_line(error: PdaError, span: Span) -> PdaError {
    match error {
        PdaError::DefinitionError(msg) => {
            PdaError::DefinitionError(format!("line {}: {}", line_of(span), msg))
        }
        other => other,
    }
}

fn line_of(span: Span) -> usize {
    span.start_pos().line_col().0
}
