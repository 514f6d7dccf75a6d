use std::fmt::{Display, Formatter, Result};
use super::{
    ast::expr::Expr,
    token::op::BinOpKind,
    Associativity,
};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Which operand of a binary operation is being formatted.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

/// Returns true if `child` must be parenthesized to be read back as the `side` operand of `op`.
fn needs_parens(child: &Expr, op: BinOpKind, side: Side) -> bool {
    match child {
        Expr::Negation(_) => true,
        Expr::Binary { op: child_op, .. } => {
            child_op.precedence() < op.precedence()
                || (child_op.precedence() == op.precedence() && match side {
                    Side::Left => op.associativity() == Associativity::Right,
                    Side::Right => op.associativity() == Associativity::Left,
                })
        },
        _ => false,
    }
}

/// Returns true if the target of a negation must be parenthesized.
fn negation_needs_parens(target: &Expr) -> bool {
    !matches!(target, Expr::Variable(_) | Expr::Call { .. } | Expr::Root { .. })
}

/// Formats `expr`, surrounded by `open` and `close` if `parens` is true.
fn fmt_maybe_paren(
    f: &mut Formatter,
    expr: &Expr,
    parens: bool,
    (open, close): (&str, &str),
    latex: bool,
) -> Result {
    if parens {
        write!(f, "{}", open)?;
    }
    if latex {
        expr.fmt_latex(f)?;
    } else {
        write!(f, "{}", expr)?;
    }
    if parens {
        write!(f, "{}", close)?;
    }
    Ok(())
}

/// Formats the expression so that parsing the output yields the same tree.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Binary { lhs, op, rhs } => {
                fmt_maybe_paren(f, lhs, needs_parens(lhs, *op, Side::Left), ("(", ")"), false)?;
                write!(f, "{}", op)?;
                fmt_maybe_paren(f, rhs, needs_parens(rhs, *op, Side::Right), ("(", ")"), false)
            },
            Self::Negation(target) => {
                write!(f, "-")?;
                fmt_maybe_paren(f, target, negation_needs_parens(target), ("(", ")"), false)
            },
            Self::Call { name, target } => write!(f, "{}({})", name, target),
            Self::Root { target, power } => write!(f, "root({},{})", power, target),
        }
    }
}

/// Returns the LaTeX command for the given function name.
fn latex_function(name: &str) -> Option<&'static str> {
    Some(match name {
        "exp" => "\\exp",
        "ln" => "\\ln",
        "log" => "\\log",
        "sin" => "\\sin",
        "cos" => "\\cos",
        "tan" => "\\tan",
        "asin" => "\\arcsin",
        "acos" => "\\arccos",
        "atan" => "\\arctan",
        "sinh" => "\\sinh",
        "cosh" => "\\cosh",
        "tanh" => "\\tanh",
        _ => return None,
    })
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        const PARENS: (&str, &str) = ("\\left(", "\\right)");

        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Binary { lhs, op: BinOpKind::Div, rhs } => {
                write!(f, "\\frac{{")?;
                lhs.fmt_latex(f)?;
                write!(f, "}}{{")?;
                rhs.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Binary { lhs, op: BinOpKind::Exp, rhs } => {
                let parens = match &**lhs {
                    Expr::Constant(value) => *value < 0.0,
                    Expr::Binary { .. } | Expr::Negation(_) | Expr::Root { .. } => true,
                    _ => false,
                };
                fmt_maybe_paren(f, lhs, parens, PARENS, true)?;
                write!(f, "^{{")?;
                rhs.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Binary { lhs, op, rhs } => {
                // `\frac` already groups its operands
                let grouped = |expr: &Expr, side| {
                    !matches!(expr, Expr::Binary { op: BinOpKind::Div, .. })
                        && needs_parens(expr, *op, side)
                };
                fmt_maybe_paren(f, lhs, grouped(lhs, Side::Left), PARENS, true)?;
                match op {
                    BinOpKind::Mul => write!(f, " \\cdot ")?,
                    op => write!(f, "{}", op)?,
                }
                fmt_maybe_paren(f, rhs, grouped(rhs, Side::Right), PARENS, true)
            },
            Self::Negation(target) => {
                write!(f, "-")?;
                let parens = match &**target {
                    Expr::Constant(value) => *value < 0.0,
                    Expr::Binary { op, .. } => op.precedence() <= BinOpKind::Add.precedence(),
                    Expr::Negation(_) => true,
                    _ => false,
                };
                fmt_maybe_paren(f, target, parens, PARENS, true)
            },
            Self::Call { name, target } if name == "sqrt" => {
                write!(f, "\\sqrt{{")?;
                target.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Call { name, target } => {
                match latex_function(name) {
                    Some(command) => write!(f, "{}", command)?,
                    None => write!(f, "\\operatorname{{{}}}", name)?,
                }
                fmt_maybe_paren(f, target, true, PARENS, true)
            },
            Self::Root { target, power } => {
                write!(f, "\\sqrt[")?;
                power.fmt_latex(f)?;
                write!(f, "]{{")?;
                target.fmt_latex(f)?;
                write!(f, "}}")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::Parser;
    use super::*;

    /// Parses the source, formats the tree, and checks that the output parses to the same tree.
    fn round_trip(source: &str) -> String {
        let expr = Parser::new(source).parse_expr().unwrap();
        let fmt = expr.to_string();
        assert_eq!(Parser::new(&fmt).parse_expr().unwrap(), expr, "{} formatted as {}", source, fmt);
        fmt
    }

    fn latex(source: &str) -> String {
        Parser::new(source).parse_expr().unwrap().as_display().to_string()
    }

    #[test]
    fn fmt_display() {
        assert_eq!(round_trip("2+3*4"), "2+3*4");
        assert_eq!(round_trip("(2+3)*4"), "(2+3)*4");
        assert_eq!(round_trip("2 ^ 3 ^ 2"), "2^3^2");
        assert_eq!(round_trip("(2^3)^2"), "(2^3)^2");
    }

    #[test]
    fn fmt_display_right_operand() {
        assert_eq!(round_trip("a-(b-c)"), "a-(b-c)");
        assert_eq!(round_trip("a-b-c"), "a-b-c");
        assert_eq!(round_trip("a/(b*c)"), "a/(b*c)");
    }

    #[test]
    fn fmt_display_negation() {
        assert_eq!(round_trip("-x"), "-x");
        assert_eq!(round_trip("-(a+b)"), "-(a+b)");
        assert_eq!(round_trip("y*-x"), "y*(-x)");
        assert_eq!(round_trip("-x^2"), "(-x)^2");
        assert_eq!(round_trip("-sin(x)"), "-sin(x)");
        assert_eq!(round_trip("2*-3"), "2*-3");
    }

    #[test]
    fn fmt_display_negated_constant() {
        let expr = Expr::negation(Expr::Constant(3.0));
        assert_eq!(expr.to_string(), "-(3)");
        assert_eq!(Parser::new("-(3)").parse_expr().unwrap(), expr);
    }

    #[test]
    fn fmt_display_extreme_constants() {
        for value in [f64::MAX, f64::MIN_POSITIVE, 1e300, 5e-324] {
            let expr = Expr::Constant(value);
            assert_eq!(Parser::new(&expr.to_string()).parse_expr().unwrap(), expr);
        }
        assert_eq!(round_trip("10^400 + x"), "10^400+x");
    }

    #[test]
    fn fmt_display_calls() {
        assert_eq!(round_trip("root(3, x+1)"), "root(3,x+1)");
        assert_eq!(round_trip("ln(x) / log(y)"), "ln(x)/log(y)");
        assert_eq!(round_trip("1.5e3*α"), "1500*α");
    }

    #[test]
    fn fmt_latex() {
        assert_eq!(latex("(x+1)/2"), "\\frac{x+1}{2}");
        assert_eq!(latex("2*(a+b)"), "2 \\cdot \\left(a+b\\right)");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("root(3, x)"), "\\sqrt[3]{x}");
        assert_eq!(latex("(x-1)^2"), "\\left(x-1\\right)^{2}");
        assert_eq!(latex("sin(x)^2"), "\\sin\\left(x\\right)^{2}");
        assert_eq!(latex("asinh(t)"), "\\operatorname{asinh}\\left(t\\right)");
        assert_eq!(latex("-(a-b)"), "-\\left(a-b\\right)");
    }
}
