use std::io::Write;

use monkey_core::parser::prelude::{parse, print};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

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
			_ => match parse(&input) {
				Ok(program) => {
					println!("{}", print(&program));
				},
				Err(err) => {
					let (_, messages) = err.details();

					println!("Parse error at {}: {}.", err.span, err);
					if !messages.is_empty() {
						println!("\t{}", messages.join(";\n\t"));
					}
				}
			}
		}
	}
}
