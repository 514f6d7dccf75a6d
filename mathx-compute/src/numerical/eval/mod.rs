mod immediate;

use mathx_parser::{parser::Parser, Expr};
use super::{
    builtin::{apply_binary, apply_call, apply_root},
    ctxt::Ctxt,
    error::{Error, UndefinedVariable},
};

pub use immediate::Immediate;

/// Any type that can be evaluated to produce a real number.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error>;

    /// Evaluate the expression to produce a value, using an empty context.
    fn eval_default(&self) -> Result<f64, Error> {
        self.eval(&Ctxt::new())
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        // children are visited before their parent, so their values are on top of the stack, the
        // last child's value topmost
        let mut values = Vec::new();
        for expr in self.post_order_iter() {
            let value = match expr {
                Expr::Constant(value) => *value,
                Expr::Variable(name) => ctxt.get_var(name).ok_or_else(|| {
                    Error::unspanned(UndefinedVariable {
                        name: name.clone(),
                        suggestions: ctxt.get_similar_vars(name),
                    })
                })?,
                Expr::Binary { op, .. } => {
                    let (lhs, rhs) = pop_two(&mut values);
                    apply_binary(*op, lhs, rhs)?
                },
                Expr::Negation(_) => -pop_one(&mut values),
                Expr::Call { name, .. } => apply_call(name, pop_one(&mut values))?,
                Expr::Root { .. } => {
                    let (target, power) = pop_two(&mut values);
                    apply_root(power, target)?
                },
            };
            values.push(value);
        }

        Ok(pop_one(&mut values))
    }
}

/// Pops the value of a node's only child.
fn pop_one(values: &mut Vec<f64>) -> f64 {
    values.pop().unwrap_or(f64::NAN)
}

/// Pops the values of a node's two children, in left-to-right order.
fn pop_two(values: &mut Vec<f64>) -> (f64, f64) {
    let second = pop_one(values);
    let first = pop_one(values);
    (first, second)
}

/// Evaluates a formula without building an expression tree.
///
/// Unlike [`Eval::eval`], a variable missing from the context is reported as a parse error,
/// pointing at the variable in the formula.
pub fn evaluate_formula(source: &str, ctxt: &Ctxt) -> Result<f64, Error> {
    Parser::new(source).parse_with(&Immediate::new(ctxt))
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use mathx_parser::parser::error::UnknownVariable;
    use crate::numerical::error::{DivisionByZero, UndefinedFunction};
    use super::*;

    fn eval(source: &str, ctxt: &Ctxt) -> Result<f64, Error> {
        Parser::new(source).parse_expr().unwrap().eval(ctxt)
    }

    /// Evaluates the formula in both modes, checking that they agree.
    fn eval_both(source: &str, ctxt: &Ctxt) -> f64 {
        let tree = eval(source, ctxt).unwrap();
        let immediate = evaluate_formula(source, ctxt).unwrap();
        assert_eq!(tree, immediate, "{}", source);
        tree
    }

    #[test]
    fn precedence() {
        let ctxt = Ctxt::new();
        assert_eq!(eval_both("2+3*4", &ctxt), 14.0);
        assert_eq!(eval_both("(2+3)*4", &ctxt), 20.0);
        assert_eq!(eval_both("2*3+4", &ctxt), 10.0);
        assert_eq!(eval_both("1+1+1", &ctxt), 3.0);
        assert_eq!(eval_both("10-4-3", &ctxt), 3.0);
        assert_eq!(eval_both("64/4/2", &ctxt), 8.0);
    }

    #[test]
    fn exponent() {
        let ctxt = Ctxt::new();
        assert_eq!(eval_both("2^3^2", &ctxt), 512.0);
        assert_eq!(eval_both("(2^3)^2", &ctxt), 64.0);
        assert_eq!(eval_both("-2^2", &ctxt), 4.0);
        assert_eq!(eval_both("-(2^2)", &ctxt), -4.0);
    }

    #[test]
    fn builtins() {
        let ctxt = Ctxt::new();
        assert_float_absolute_eq!(eval_both("root(3,27)", &ctxt), 3.0);
        assert_float_absolute_eq!(eval_both("log(100)", &ctxt), 2.0);
        assert_float_absolute_eq!(eval_both("-sqrt(16) + exp(0)", &ctxt), -3.0);
        assert_float_absolute_eq!(eval_both("sin(0.5)^2 + cos(0.5)^2", &ctxt), 1.0);
    }

    #[test]
    fn variables() {
        let ctxt = Ctxt::new().with_var("x", 4.0).with_var("y", 0.5);
        assert_eq!(eval_both("3+x", &ctxt), 7.0);
        assert_eq!(eval_both("-x*y", &ctxt), -2.0);
        assert_eq!(eval_both("x^-y", &ctxt), 0.5);
    }

    #[test]
    fn unbound_variable() {
        let ctxt = Ctxt::new().with_var("y", 1.0);
        let err = eval("3+x", &ctxt).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UndefinedVariable {
            name: "x".to_string(),
            suggestions: vec!["y".to_string()],
        }));
        assert!(err.spans.is_empty());

        // immediate mode reports it while parsing, with a span
        let err = evaluate_formula("3+x", &ctxt).unwrap_err();
        assert!(err.is::<UnknownVariable>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn unknown_function() {
        let expr = Expr::call("sine", Expr::Constant(1.0));
        assert!(expr.eval_default().unwrap_err().is::<UndefinedFunction>());
    }

    #[test]
    fn division_by_zero() {
        assert!(eval("1/(2-2)", &Ctxt::new()).unwrap_err().is::<DivisionByZero>());

        let err = evaluate_formula("1 + 1/0", &Ctxt::new()).unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![4..7]);
    }
}
