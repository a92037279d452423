use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use monkey_core::utils::prelude::Error;

pub(crate) fn print_parsing(text: &str) {
    print_colourful_prefix("Parsing", Color::Magenta, text)
}

pub(crate) fn print_parsed(duration: Duration) {
    print_colourful_prefix("Parsed", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Cyan, text)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

/// Renders `err` as diagnostics on stderr.
pub fn print_error(err: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    if err.pretty(&mut buffer).is_err() {
        eprintln!("{err}");
        return;
    }

    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}

/// Prints an error value the way the repl shows it, in red on stdout.
pub fn print_error_value(message: &str) {
    let buffer_writer = BufferWriter::stdout(color_choice(std::io::stdout().is_terminal()));
    let mut buffer = buffer_writer.buffer();

    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Red)))
        .expect("print_error_value");
    write!(buffer, "Error: {message}").expect("print_error_value");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_error_value");
    writeln!(buffer).expect("print_error_value");
    buffer_writer.print(&buffer).expect("print_error_value");
}

/// Makes Ctrl-C leave the interactive loops without a panic or a trace.
pub fn exit_on_interrupt() -> std::io::Result<()> {
    ctrlc::set_handler(|| {
        println!();
        std::process::exit(0);
    })
    .map_err(std::io::Error::other)
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice(std::io::stderr().is_terminal()))
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
