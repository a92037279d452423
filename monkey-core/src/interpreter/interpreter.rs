use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Env, Object},
    eval::Evaluator,
    parser::prelude::{parse, parse_from_stream, Program},
    utils::prelude::Error,
};

/// Reads and parses the file at `path`, streaming characters into the parser.
///
/// Returns the source text alongside the program so callers can render
/// diagnostics against it.
pub fn parse_file(path: PathBuf) -> Result<(String, Program), Error> {
    let file = std::fs::File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut io_error = None;
    let mut reader = std::io::BufReader::new(file);

    let mut stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                io_error = Some(err);
                None
            }
        })
        .fuse();

    let parsed = parse_from_stream(stream.by_ref());

    // A failed parse stops reading early; diagnostics still want the whole file.
    stream.for_each(drop);

    if let Some(err) = io_error {
        return Err(err.into());
    }

    match parsed {
        Ok(program) => Ok((src, program)),
        Err(error) => Err(Error::Parse { path, src, error }),
    }
}

/// Evaluates an already parsed program.
///
/// A top level `Object::Error` becomes [`Error::Runtime`], so callers only
/// ever see successful values in `Ok`.
pub fn run_program(
    path: PathBuf,
    program: &Program,
    evaluator: &mut Evaluator,
    env: &Env,
) -> Result<Object, Error> {
    match evaluator.eval_program(program, env) {
        Ok(Object::Error(message)) => Err(Error::Runtime { path, message }),
        Ok(value) => Ok(value),
        Err(error) => Err(Error::Eval { path, error }),
    }
}

pub fn run_source(
    path: PathBuf,
    src: &str,
    evaluator: &mut Evaluator,
    env: &Env,
) -> Result<Object, Error> {
    let program = parse(src).map_err(|error| Error::Parse {
        path: path.clone(),
        src: src.to_string(),
        error,
    })?;

    run_program(path, &program, evaluator, env)
}

pub fn run_file(path: PathBuf, evaluator: &mut Evaluator, env: &Env) -> Result<Object, Error> {
    let (_, program) = parse_file(path.clone())?;

    run_program(path, &program, evaluator, env)
}
