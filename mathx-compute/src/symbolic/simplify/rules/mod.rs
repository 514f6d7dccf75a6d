//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given and its direct children.

pub mod add;
pub mod constant;
pub mod multiply;
pub mod negate;
pub mod power;

use mathx_parser::{parser::token::op::BinOpKind, Expr};
use crate::symbolic::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a binary expression with the given operator, calls the given
/// transformation function with the left and right-hand-side.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOpKind,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Binary { lhs, op: expr_op, rhs } if *expr_op == op => f(lhs, rhs),
        _ => None,
    }
}

/// If the expression is a negation, calls the given transformation function with its target.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_negation(expr: &Expr, f: impl Fn(&Expr) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Negation(target) => f(target),
        _ => None,
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    constant::all(expr, step_collector)
        .or_else(|| negate::all(expr, step_collector))
        .or_else(|| add::all(expr, step_collector))
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
}
