//! The kinds of errors that can occur while evaluating an expression tree.
//!
//! Evaluation works on trees, which carry no source locations, so these errors are created
//! without spans.

use ariadne::Fmt;
use mathx_attrs::ErrorKind;
use mathx_error::EXPR;

pub use mathx_error::Error;

/// The variable has no value in the context.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", self.name),
    labels = ["this expression"],
    help = if self.suggestions.is_empty() {
        format!("to define it, type: let {} = {}", (&self.name).fg(EXPR), "<expression>".fg(EXPR))
    } else {
        format!(
            "did you mean {}?",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(" or ")
        )
    },
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,

    /// Similarly named variables that are defined, if any.
    pub suggestions: Vec<String>,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this expression"],
    help = if self.suggestions.is_empty() {
        "the available functions are: sqrt, exp, ln, log, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// Similarly named builtin functions, if any.
    pub suggestions: Vec<String>,
}

/// Division by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this expression"],
    help = format!("this includes negative powers of zero, such as {}, and roots of power zero", "0^-1".fg(EXPR)),
)]
pub struct DivisionByZero;

/// The result of an operation is not a real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the result of `{}` is not a real number", self.operation),
    labels = ["this expression"],
    help = format!(
        "only real numbers are supported; for example, {} and {} have no real value",
        "sqrt(-1)".fg(EXPR),
        "(-8)^0.5".fg(EXPR),
    ),
)]
pub struct NonRealResult {
    /// The operation that was applied, such as `sqrt` or `^`.
    pub operation: String,
}

/// The result of an operation on finite numbers is infinite.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the result of `{}` is too large to represent", self.operation),
    labels = ["this expression"],
    help = format!(
        "results must be finite; for example, {} and {} have no finite value",
        "10^400".fg(EXPR),
        "ln(0)".fg(EXPR),
    ),
)]
pub struct Overflow {
    /// The operation that was applied, such as `exp` or `^`.
    pub operation: String,
}
