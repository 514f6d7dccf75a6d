//! Bottom-up simplification of expression trees.

pub mod rules;
pub mod step;

use mathx_parser::Expr;
use super::step_collector::StepCollector;
use step::Step;

/// Applies the rules to the node until none of them applies. The children of the node must
/// already be simplified.
fn apply_rules(mut expr: Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    // every rule shrinks the tree, so this terminates
    while let Some(simplified) = rules::all(&expr, step_collector) {
        expr = simplified;
    }
    expr
}

/// Simplifies the expression, reporting every rewrite to the given step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = match expr {
        Expr::Constant(_) | Expr::Variable(_) => return expr.clone(),
        Expr::Binary { lhs, op, rhs } => Expr::binary(
            simplify_with(lhs, step_collector),
            *op,
            simplify_with(rhs, step_collector),
        ),
        Expr::Negation(target) => Expr::negation(simplify_with(target, step_collector)),
        Expr::Call { name, target } => Expr::call(name.clone(), simplify_with(target, step_collector)),
        Expr::Root { target, power } => Expr::root(
            simplify_with(target, step_collector),
            simplify_with(power, step_collector),
        ),
    };

    apply_rules(expr, step_collector)
}

/// Simplifies the expression.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &mut ())
}

/// Simplifies the expression, returning the rewrites that were applied in the order they were
/// applied.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}
