//! The kinds of errors that can occur while tokenizing and parsing a formula.

use ariadne::Fmt;
use mathx_attrs::ErrorKind;
use mathx_error::EXPR;

pub use mathx_error::Error;

/// A character that cannot start any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", self.found),
    labels = ["this character"],
    help = if self.found == "=" {
        "only equations may contain `=`; solve them instead of evaluating them".to_string()
    } else {
        format!(
            "formulas may contain numbers, names, builtin calls, {} and parentheses",
            "+ - * / ^".fg(EXPR),
        )
    },
)]
pub struct UnexpectedCharacter {
    /// The character that was found.
    pub found: String,
}

/// A number literal that is not well-formed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed number",
    labels = [if self.missing_exponent {
        "the exponent of this number has no digits"
    } else {
        "this dot is not part of a number"
    }],
    help = if self.missing_exponent {
        format!("write the exponent out in full, such as {}", "1e3".fg(EXPR))
    } else {
        format!("a number needs at least one digit, such as {} or {}", ".5".fg(EXPR), "5.".fg(EXPR))
    },
)]
pub struct MalformedNumber {
    /// The number has an exponent marker without digits. (Otherwise, a plain dot was found.)
    pub missing_exponent: bool,
}

/// A number literal too large to be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "number is too large",
    labels = ["this number"],
    help = format!("numbers must be less than about {}", "1.8e308".fg(EXPR)),
)]
pub struct NumberOutOfRange;

/// A builtin function name that is not followed by an opening parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing parenthesis after the `{}` function", self.name),
    labels = ["this function"],
    help = format!("call it like this: {}", format!("{}(x)", self.name).fg(EXPR)),
)]
pub struct MissingCallParen {
    /// The name of the builtin function.
    pub name: &'static str,
}

/// A variable that has no value in the bindings given to an immediate evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown variable `{}`", self.name),
    labels = ["this variable"],
    help = if self.suggestions.is_empty() {
        format!("give `{}` a value before evaluating", (&self.name).fg(EXPR))
    } else if self.suggestions.len() == 1 {
        format!("did you mean `{}`?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these variables? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownVariable {
    /// The name of the variable.
    pub name: String,

    /// Similarly named variables that do have a value, if any.
    pub suggestions: Vec<String>,
}

/// The formula ended right after a unary minus sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of formula after minus sign",
    labels = [format!("I expected an {} after this", "operand".fg(EXPR))],
)]
pub struct UnexpectedEofAfterMinus;

/// Two unary minus signs directly follow each other.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "superfluous minus sign",
    labels = ["these minus signs"],
    help = format!("remove both signs, or group the negated operand: {}", "-(-x)".fg(EXPR)),
)]
pub struct SuperfluousMinus;

/// A one-argument builtin was called with several arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to the `{}` function", self.name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes 1 argument; there are {} arguments provided here",
        self.name.fg(EXPR),
        self.given,
    ),
)]
pub struct TooManyArguments {
    /// The name of the builtin function.
    pub name: &'static str,

    /// The number of arguments that were given.
    pub given: usize,
}

/// `root` was called with a number of arguments other than two.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the `root` function takes exactly two arguments",
    labels = [format!("this call has {} argument(s)", self.given)],
    help = format!("call it like this: {}", "root(power, value)".fg(EXPR)),
)]
pub struct RootArity {
    /// The number of arguments that were given.
    pub given: usize,
}

/// A comma-separated argument list appeared outside of a builtin call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "arguments outside of a function call",
    labels = ["these arguments"],
    help = format!("only builtin calls such as {} accept several arguments", "root(3, x)".fg(EXPR)),
)]
pub struct ArgumentsOutsideCall;

/// An opening parenthesis was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is never closed"],
    help = format!("add a {} at the end of the group", ")".fg(EXPR)),
)]
pub struct UnclosedParenthesis;

/// A closing parenthesis has no matching opening parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unmatched closing parenthesis",
    labels = ["this parenthesis closes nothing"],
)]
pub struct UnmatchedParenthesis;

/// The tokens could not be folded into a single expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot reduce formula",
    labels = ["I could not combine these parts into one expression"],
    help = if self.after_comma {
        format!(
            "a minus sign after `,` is read as subtraction; group the argument instead: {}",
            "root(3, (-27))".fg(EXPR),
        )
    } else {
        "check for missing operators between operands".to_string()
    },
)]
pub struct CannotReduce {
    /// A minus sign directly follows a comma, which is the likely cause.
    pub after_comma: bool,
}

/// There was nothing to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an expression",
    labels = ["there is nothing here"],
)]
pub struct EmptyExpression;

/// The expression tree nests deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this expression"],
    help = format!("the expression tree may be at most {} levels deep", self.max_depth),
)]
pub struct ExpressionTooDeep {
    /// The maximum depth allowed.
    pub max_depth: usize,
}

/// An equation without an `=` sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `=` in equation",
    labels = ["this is not an equation"],
    help = format!("write both sides of the equation: {}", "3*x + 5 = 0".fg(EXPR)),
)]
pub struct MissingEquals;

/// An equation with more than one `=` sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "chained equality in equation",
    labels = vec!["only one `=` is allowed; this one is extra"; self.extra],
    help = "split the chain into separate equations",
)]
pub struct ChainedEquality {
    /// The number of `=` signs after the first one.
    pub extra: usize,
}
