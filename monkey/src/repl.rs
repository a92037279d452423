use std::{io::Write, path::PathBuf};

use monkey_core::{
	environment::prelude::Environment,
	eval::Evaluator,
	interpreter::prelude::run_source,
	utils::prelude::Error,
};

use crate::cli::{print_error, print_error_value};

const PROMPT: &str = ">> ";

/// Read eval print loop. Bindings made on one line stay visible on the next
/// unless `fresh` is set.
pub fn start(fresh: bool, max_depth: usize) -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let path = PathBuf::from("repl");

	let mut env = Environment::new().shared();
	let mut evaluator = Evaluator::with_max_depth(max_depth);
	tracing::debug!(max_depth = evaluator.max_depth(), fresh, "starting repl");

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				if fresh {
					env = Environment::new().shared();
				}

				match run_source(path.clone(), &input, &mut evaluator, &env) {
					Ok(value) => println!("{}", value.inspect()),
					Err(Error::Runtime { message, .. }) => print_error_value(&message),
					Err(err) => print_error(&err),
				}
			}
		}
	}
}
