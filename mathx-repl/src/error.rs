use ariadne::Fmt;
use mathx_attrs::ErrorKind;
use mathx_error::EXPR;

pub use mathx_error::Error;

/// A `let` binding whose target is not a plain variable name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot bind a value to this",
    labels = ["expected a variable name here"],
    help = format!("bind a variable like this: {}", "let x = 2".fg(EXPR)),
)]
pub struct InvalidBinding;

/// A `let` binding whose target is the name of a builtin function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a builtin function", self.name),
    labels = ["this name"],
    help = "choose another name for the variable",
)]
pub struct ReservedName {
    /// The name of the builtin function.
    pub name: String,
}

/// A command switch that is neither `on` nor `off`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected `on` or `off`",
    labels = ["here"],
    help = format!("for example: {}", ":steps on".fg(EXPR)),
)]
pub struct ExpectedSwitch;

/// A line starting with `:` that names no command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `:{}`", self.name),
    labels = ["this command"],
    help = format!(
        "the commands are {}, {}, {} and {}",
        ":vars".fg(EXPR),
        ":steps on|off".fg(EXPR),
        ":latex <expression>".fg(EXPR),
        ":parallel on|off".fg(EXPR),
    ),
)]
pub struct UnknownCommand {
    /// The name that was typed after the `:`.
    pub name: String,
}

/// Reports the error to stderr. Errors without source locations highlight the whole input.
pub fn report_to_stderr(err: Error, input: &str) {
    let err = err.with_default_span(0..input.len());
    if let Err(io_err) = err.report_to_stderr("input", input) {
        eprintln!("{}", io_err);
    }
}
