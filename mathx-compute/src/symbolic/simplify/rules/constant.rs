//! Folding of operations whose operands are all constants.

use mathx_parser::Expr;
use crate::{
    numerical::builtin::{apply_binary, apply_call, apply_root},
    symbolic::{simplify::step::Step, step_collector::StepCollector},
};

/// Replaces an operation on constants with its value, if it can be evaluated.
///
/// `2+3 = 5`
/// `-(4) = -4`
/// `sqrt(16) = 4`
/// `root(3, 8) = 2`
///
/// Operations that fail to evaluate, such as `1/0`, are left alone.
pub fn fold_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = match expr {
        Expr::Constant(_) | Expr::Variable(_) => return None,
        Expr::Binary { lhs, op, rhs } => apply_binary(*op, lhs.as_constant()?, rhs.as_constant()?).ok()?,
        Expr::Negation(target) => -target.as_constant()?,
        Expr::Call { name, target } => apply_call(name, target.as_constant()?).ok()?,
        Expr::Root { target, power } => apply_root(power.as_constant()?, target.as_constant()?).ok()?,
    };

    step_collector.push(Step::FoldConstants);
    Some(Expr::Constant(value))
}

/// Applies all constant rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_constants(expr, step_collector)
}
