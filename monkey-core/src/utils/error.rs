use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::EvalError,
    parser::prelude::ParseError,
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation aborted")]
    Eval {
        path: PathBuf,
        error: EvalError
    },
    #[error("program finished with an error")]
    Runtime {
        path: PathBuf,
        message: String
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(&nocolor.into_inner()).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = std::iter::once(error.to_string())
                    .chain(extra)
                    .collect::<Vec<String>>()
                    .join("\n");

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text,
                    location: Some(Location {
                        src: src.as_str(),
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.span,
                        },
                    }),
                }]
            },
            Error::Eval { path, error } => vec![Diagnostic {
                title: format!("Evaluation of `{}` aborted", path.display()),
                text: error.to_string(),
                location: None,
            }],
            Error::Runtime { path, message } => vec![Diagnostic {
                title: format!("`{}` finished with an error", path.display()),
                text: message.clone(),
                location: None,
            }],
            Error::StdIo { err } => vec![Diagnostic {
                title: "Standard IO error".into(),
                text: format!("{err}"),
                location: None,
            }],
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}
