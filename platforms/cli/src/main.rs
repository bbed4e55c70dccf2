use anyhow::{anyhow, Context};
use clap::Parser;
use pda::{Config, Machine, Observer, Pda, ProgramInfo, ProgramLoader, ProgramManager, TraceWriter};
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{debug, Level};

const SEPARATOR: &str = "*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*";

/// Runs input strings through a pushdown automaton that accepts by empty stack.
///
/// Each line read from stdin is tested; an empty line ends the session.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  pda-cli programs/anbn.pda
  printf '(())\\n(()\\n' | pda-cli --builtin balanced-parentheses")]
struct Cli {
    /// Path to a pushdown automaton definition file (.pda).
    #[clap(required_unless_present_any = ["builtin", "list"])]
    definition: Option<PathBuf>,

    /// Use a built-in sample automaton instead of a file
    #[clap(short, long, conflicts_with = "definition")]
    builtin: Option<String>,

    /// List the built-in sample automata and exit
    #[clap(long)]
    list: bool,

    /// Print every configuration examined and every move queued
    #[clap(short, long)]
    trace: bool,

    /// Maximum number of configurations processed per input
    #[clap(short, long)]
    max_transitions: Option<usize>,

    /// JSON file with engine settings
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print the loaded definition as JSON and exit
    #[clap(long)]
    describe: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let (name, pda) = load_definition(&cli)?;

    if cli.describe {
        let info = ProgramInfo::new(name, &pda);
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    debug!(max_transitions = config.max_transitions, "engine configured");

    if atty::is(atty::Stream::Stdin) {
        println!("PDA loaded from {name}");
        println!("Reading input strings from console (empty string to exit)...");
    }

    let machine = Machine::new(&pda).with_config(config);
    if cli.trace {
        run_inputs(machine.with_observer(TraceWriter::new(io::stdout())))
    } else {
        run_inputs(machine)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads the automaton named on the command line, from a file or the built-in library.
fn load_definition(cli: &Cli) -> anyhow::Result<(String, Pda)> {
    if let Some(name) = &cli.builtin {
        let program = ProgramManager::get_program_by_name(name).ok_or_else(|| {
            anyhow!(
                "Unknown built-in program '{}' (available: {})",
                name,
                ProgramManager::list_program_names().join(", ")
            )
        })?;

        return Ok((program.name.to_string(), program.pda.clone()));
    }

    let path = cli
        .definition
        .as_ref()
        .ok_or_else(|| anyhow!("No definition file given"))?;
    let pda = ProgramLoader::load_program(path)?;

    Ok((path.display().to_string(), pda))
}

/// Builds the engine configuration: defaults, then the config file, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            Config::from_json(&json)
                .with_context(|| format!("Invalid config file '{}'", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_transitions) = cli.max_transitions {
        config.max_transitions = max_transitions;
    }

    Ok(config)
}

/// Tests every stdin line until an empty one. A run that fails aborts the session.
fn run_inputs<O: Observer>(mut machine: Machine<'_, O>) -> anyhow::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let input = line.trim_end_matches('\r');
        if input.is_empty() {
            break;
        }

        let execution = machine.run(input);
        let transitions = execution.transitions;

        if execution.into_result()? {
            println!("--> Accepted");
        } else {
            println!("--> Rejected");
        }
        println!("Transitions processed: {transitions}");
        println!("{SEPARATOR}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_requires_a_source() {
        assert!(Cli::try_parse_from(["pda-cli", "--trace"]).is_err());
        assert!(Cli::try_parse_from(["pda-cli", "--list"]).is_ok());
        assert!(Cli::try_parse_from(["pda-cli", "a.pda", "--builtin", "anbn"]).is_err());
    }

    #[test]
    fn test_load_builtin_definition() {
        let cli = Cli::try_parse_from(["pda-cli", "--builtin", "anbn"]).unwrap();

        let (name, pda) = load_definition(&cli).unwrap();
        assert_eq!(name, "anbn");
        assert_eq!(pda.accepts("ab"), Ok(true));
    }

    #[test]
    fn test_load_unknown_builtin() {
        let cli = Cli::try_parse_from(["pda-cli", "--builtin", "nope"]).unwrap();

        let error = load_definition(&cli).unwrap_err();
        assert!(error.to_string().contains("balanced-parentheses"));
    }

    #[test]
    fn test_max_transitions_flag_overrides_default() {
        let cli = Cli::try_parse_from(["pda-cli", "a.pda", "-m", "25"]).unwrap();

        assert_eq!(load_config(&cli).unwrap().max_transitions, 25);
    }
}
