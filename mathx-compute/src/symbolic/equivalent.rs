use mathx_parser::Expr;
use crate::numerical::eval::Eval;
use super::simplify::simplify;

/// Relative tolerance used when comparing the values of two closed expressions.
const TOLERANCE: f64 = 1e-12;

/// Returns true if the two numbers are equal, up to a small relative error.
fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= TOLERANCE * a.abs().max(b.abs())
}

/// Returns true if `expr` and `other` are known to be equivalent.
///
/// They are equivalent if `other` simplifies to `expr` or to the simplified form of `expr`, or,
/// when neither contains a variable, if both evaluate to the same number. This is a heuristic: a
/// `false` result does not mean that the two expressions differ for some values.
pub fn is_equivalent(expr: &Expr, other: &Expr) -> bool {
    let other = simplify(other);
    if &other == expr || other == simplify(expr) {
        return true;
    }

    if !expr.is_closed() || !other.is_closed() {
        return false;
    }

    match (expr.eval_default(), other.eval_default()) {
        (Ok(a), Ok(b)) => approx_eq(a, b),
        _ => false,
    }
}
