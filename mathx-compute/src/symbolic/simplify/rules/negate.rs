//! Simplification rules for negations.

use mathx_parser::{parser::token::op::BinOpKind, Expr};
use crate::symbolic::{
    simplify::{rules::do_negation, step::Step},
    step_collector::StepCollector,
};

/// `--a = a`
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negation(expr, |target| match target {
        Expr::Negation(inner) => Some((**inner).clone()),
        _ => None,
    })?;

    step_collector.push(Step::DoubleNegation);
    Some(opt)
}

/// Moves the negation into a constant factor of a product.
///
/// `-(c*a) = (-c)*a`
/// `-(a*c) = a*(-c)`
pub fn negate_factor(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negation(expr, |target| match target {
        Expr::Binary { lhs, op: BinOpKind::Mul, rhs } => {
            if let Some(c) = lhs.as_constant() {
                Some(Expr::binary(Expr::Constant(-c), BinOpKind::Mul, (**rhs).clone()))
            } else {
                rhs.as_constant()
                    .map(|c| Expr::binary((**lhs).clone(), BinOpKind::Mul, Expr::Constant(-c)))
            }
        },
        _ => None,
    })?;

    step_collector.push(Step::NegateFactor);
    Some(opt)
}

/// `-(a-b) = b-a`
pub fn negate_difference(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negation(expr, |target| match target {
        Expr::Binary { lhs, op: BinOpKind::Sub, rhs } => {
            Some(Expr::binary((**rhs).clone(), BinOpKind::Sub, (**lhs).clone()))
        },
        _ => None,
    })?;

    step_collector.push(Step::NegateDifference);
    Some(opt)
}

/// Applies all negation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_negation(expr, step_collector)
        .or_else(|| negate_factor(expr, step_collector))
        .or_else(|| negate_difference(expr, step_collector))
}
