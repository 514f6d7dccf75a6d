//! The kinds of errors that can occur while isolating a variable.
//!
//! Like evaluation errors, these are created without spans.

use ariadne::Fmt;
use mathx_attrs::ErrorKind;
use mathx_error::EXPR;

pub use mathx_error::Error;

/// The variable occurs on both sides of an operation that cannot be reduced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot isolate a variable that occurs on both sides of `{}`", self.operation),
    labels = ["this equation"],
    help = format!(
        "only sums of multiples of the variable, such as {}, and products of powers of the same base, such as {}, can be solved",
        "3*x + 5 + x*4".fg(EXPR),
        "(x-2)^3 * (x-2)^5".fg(EXPR),
    ),
)]
pub struct UnsupportedFork {
    /// The operation at which the variable's occurrences meet.
    pub operation: String,
}

/// A term of a sum contains the variable, but is not a multiple of it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the variable occurs in a term that is not a multiple of it",
    labels = ["this equation"],
    help = format!(
        "terms must look like {}, {}, {} or {} for the equation to be solved",
        "x".fg(EXPR),
        "c*x".fg(EXPR),
        "x*c".fg(EXPR),
        "x/c".fg(EXPR),
    ),
)]
pub struct NotLinear;

/// The variable is inside a call to a function that cannot be inverted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function has no inverse", self.name),
    labels = ["this equation"],
)]
pub struct NoInverse {
    /// The name of the function.
    pub name: String,
}

/// The path does not describe the expression it is being used to reduce.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the path does not lead through this expression",
    labels = ["this equation"],
)]
pub struct IncompatiblePath;

/// The variable to isolate does not occur in the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not occur in the equation", self.variable),
    labels = ["this equation"],
)]
pub struct MissingVariable {
    /// The name of the variable.
    pub variable: String,
}
