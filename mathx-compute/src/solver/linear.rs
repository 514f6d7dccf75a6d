//! Isolation of a variable that occurs in several terms of a sum.
//!
//! The terms of a chain of `+` and `-` nodes are collected into two sums: the coefficients of the
//! variable, and the terms without the variable. The equation `factor*x + remainder = other` is
//! then solved in one step as `x = (other - remainder) / factor`.

use mathx_parser::{
    parser::{ast::Path, token::op::BinOpKind},
    Expr,
};
use super::error::{Error, NotLinear};

/// Adds a term to a running sum, subtracting it if `negative` is true.
fn combine(acc: &mut Option<Expr>, term: Expr, negative: bool) {
    *acc = Some(match acc.take() {
        None if negative => Expr::negation(term),
        None => term,
        Some(acc) if negative => Expr::binary(acc, BinOpKind::Sub, term),
        Some(acc) => Expr::binary(acc, BinOpKind::Add, term),
    });
}

/// Returns `coefficient * factor`, dropping a coefficient of `1`.
fn scale(coefficient: Expr, factor: &Expr) -> Expr {
    if coefficient.is_constant(1.0) {
        factor.clone()
    } else {
        Expr::binary(coefficient, BinOpKind::Mul, factor.clone())
    }
}

/// Returns the coefficient of the target in a term, along with the target node itself.
///
/// `x` has coefficient `1`, `-t` has the negated coefficient of `t`, `c*t` and `t*c` have `c`
/// times the coefficient of `t`, and `t/c` has the coefficient of `t` divided by `c`. Any other
/// term is not a multiple of the target.
fn coefficient<'a>(term: &'a Expr, path: &Path) -> Result<(Expr, &'a Expr), Error> {
    match (term, path) {
        (_, Path::Found) => Ok((Expr::Constant(1.0), term)),
        (Expr::Negation(inner), Path::Through(path)) => {
            let (coefficient, target) = coefficient(inner, path)?;
            Ok((Expr::negation(coefficient), target))
        },
        (Expr::Binary { lhs, op: BinOpKind::Mul, rhs }, Path::Branch { left: Some(path), right: None }) => {
            let (coefficient, target) = coefficient(lhs, path)?;
            Ok((scale(coefficient, rhs), target))
        },
        (Expr::Binary { lhs, op: BinOpKind::Mul, rhs }, Path::Branch { left: None, right: Some(path) }) => {
            let (coefficient, target) = coefficient(rhs, path)?;
            Ok((scale(coefficient, lhs), target))
        },
        (Expr::Binary { lhs, op: BinOpKind::Div, rhs }, Path::Branch { left: Some(path), right: None }) => {
            let (coefficient, target) = coefficient(lhs, path)?;
            Ok((Expr::binary(coefficient, BinOpKind::Div, (**rhs).clone()), target))
        },
        _ => Err(Error::unspanned(NotLinear)),
    }
}

/// Returns true if the expression is a sum or difference.
fn is_sum(expr: &Expr) -> bool {
    matches!(expr, Expr::Binary { op: BinOpKind::Add | BinOpKind::Sub, .. })
}

/// Isolates the target in the equation `sum = other`, where `path` leads from `sum` to every
/// occurrence of the target.
///
/// Returns the target itself as the new subject, so the returned path is [`Path::Found`].
pub fn isolate(sum: &Expr, path: &Path, other: Expr) -> Result<(Expr, Path, Expr), Error> {
    let mut factor = None;
    let mut remainder = None;
    let mut target = None;

    // terms are visited right to left
    let mut stack = vec![(sum, Some(path), false)];
    while let Some((term, path, negative)) = stack.pop() {
        match (term, path) {
            (Expr::Binary { lhs, op, rhs }, Some(Path::Branch { left, right })) if is_sum(term) => {
                stack.push((&**lhs, left.as_deref(), negative));
                stack.push((&**rhs, right.as_deref(), negative != (*op == BinOpKind::Sub)));
            },
            (Expr::Negation(inner), Some(Path::Through(path))) if is_sum(inner) => {
                stack.push((&**inner, Some(&**path), !negative));
            },
            (term, None) => combine(&mut remainder, term.clone(), negative),
            (term, Some(path)) => {
                let (coefficient, found) = coefficient(term, path)?;
                target = Some(found);
                combine(&mut factor, coefficient, negative);
            },
        }
    }

    let (Some(factor), Some(target)) = (factor, target) else {
        return Err(Error::unspanned(NotLinear));
    };
    let numerator = match remainder {
        Some(remainder) => Expr::binary(other, BinOpKind::Sub, remainder),
        None => other,
    };

    Ok((target.clone(), Path::Found, Expr::binary(numerator, BinOpKind::Div, factor)))
}
