mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::{Path, PathBuf}, process::ExitCode, sync::Once};

use clap::Parser;
use cli::{print_error, print_parsed, print_parsing, print_running};
use monkey_core::{
    environment::prelude::Environment,
    eval::{Evaluator, DEFAULT_MAX_DEPTH},
    interpreter::prelude::{parse_file, run_program},
    parser::prelude::{print, Program},
    utils::prelude::Error,
};

#[derive(Parser)]
#[command(version, about = "Interpreter for the Monkey programming language")]
enum Command {
    /// Parses and evaluates a source file, printing the resulting value
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parsed program before running it
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Print the parsed program as JSON (implies --print-ast)
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Maximum depth of nested function calls
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Parses a source file and prints its syntax tree
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print the syntax tree as JSON instead of source text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
    /// Runs Read Eval Print Loop
    Repl {
        /// Start every line with an empty environment
        #[arg(long, default_value_t = false)]
        fresh: bool,
        /// Maximum depth of nested function calls
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();

    let result = match Command::parse() {
        Command::Run { path, print_ast, json, max_depth } => run(path, print_ast || json, json, max_depth),
        Command::Parse { path, json } => parse_path(&path).and_then(|program| print_program(&program, json)),
        Command::Rlpl => cli::exit_on_interrupt().and_then(|_| rlpl::start()).map_err(Error::from),
        Command::Rppl => cli::exit_on_interrupt().and_then(|_| rppl::start()).map_err(Error::from),
        Command::Repl { fresh, max_depth } => cli::exit_on_interrupt()
            .and_then(|_| repl::start(fresh, max_depth))
            .map_err(Error::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf, print_ast: bool, json: bool, max_depth: usize) -> Result<(), Error> {
    let program = parse_path(&path)?;

    if print_ast {
        print_program(&program, json)?;
    }

    print_running(&path.display().to_string());

    let env = Environment::new().shared();
    let mut evaluator = Evaluator::with_max_depth(max_depth);
    tracing::debug!(max_depth = evaluator.max_depth(), statements = program.statements.len(), "evaluating program");

    let value = run_program(path, &program, &mut evaluator, &env)?;
    println!("{}", value.inspect());

    Ok(())
}

fn parse_path(path: &Path) -> Result<Program, Error> {
    print_parsing(&path.display().to_string());
    let start = std::time::Instant::now();

    let (_, program) = parse_file(path.to_path_buf())?;

    print_parsed(start.elapsed());

    Ok(program)
}

fn print_program(program: &Program, json: bool) -> Result<(), Error> {
    if json {
        let json = serde_json::to_string_pretty(program).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        println!("{}", print(program));
    }

    Ok(())
}
