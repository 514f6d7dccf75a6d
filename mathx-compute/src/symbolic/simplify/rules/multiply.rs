//! Simplification rules for multiplication and division.

use mathx_parser::{parser::token::op::BinOpKind, Expr};
use crate::symbolic::{
    simplify::{rules::do_binary, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        (lhs.is_constant(0.0) || rhs.is_constant(0.0)).then_some(Expr::Constant(0.0))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        if lhs.is_constant(1.0) {
            Some(rhs.clone())
        } else if rhs.is_constant(1.0) {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `-1*a = -a`
/// `a*-1 = -a`
pub fn multiply_negative_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        if lhs.is_constant(-1.0) {
            Some(Expr::negation(rhs.clone()))
        } else if rhs.is_constant(-1.0) {
            Some(Expr::negation(lhs.clone()))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyNegativeOne);
    Some(opt)
}

/// `0/a = 0`, unless `a` is also zero.
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Div, |lhs, rhs| {
        (lhs.is_constant(0.0) && !rhs.is_constant(0.0)).then_some(Expr::Constant(0.0))
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Div, |lhs, rhs| {
        rhs.is_constant(1.0).then(|| lhs.clone())
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `a/-1 = -a`
pub fn divide_negative_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Div, |lhs, rhs| {
        rhs.is_constant(-1.0).then(|| Expr::negation(lhs.clone()))
    })?;

    step_collector.push(Step::DivideNegativeOne);
    Some(opt)
}

/// Applies all multiplication and division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_negative_one(expr, step_collector))
        .or_else(|| divide_zero(expr, step_collector))
        .or_else(|| divide_one(expr, step_collector))
        .or_else(|| divide_negative_one(expr, step_collector))
}
