//! Simplification rules for powers.

use mathx_parser::{parser::token::op::BinOpKind, Expr};
use crate::symbolic::{
    simplify::{rules::do_binary, step::Step},
    step_collector::StepCollector,
};

/// `0^a = 0`
pub fn power_zero_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Exp, |lhs, _| {
        lhs.is_constant(0.0).then_some(Expr::Constant(0.0))
    })?;

    step_collector.push(Step::PowerZeroBase);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Exp, |lhs, _| {
        lhs.is_constant(1.0).then_some(Expr::Constant(1.0))
    })?;

    step_collector.push(Step::PowerOneBase);
    Some(opt)
}

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Exp, |_, rhs| {
        rhs.is_constant(0.0).then_some(Expr::Constant(1.0))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOpKind::Exp, |lhs, rhs| {
        rhs.is_constant(1.0).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero_base(expr, step_collector)
        .or_else(|| power_one_base(expr, step_collector))
        .or_else(|| power_zero(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
}
