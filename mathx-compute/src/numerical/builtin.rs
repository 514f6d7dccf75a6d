//! Numeric implementations of the operators and builtin functions.
//!
//! Every function here checks the domain of its result: operations that would produce an
//! infinity or a NaN from finite inputs fail instead.

use mathx_parser::parser::{builtin::Builtin, token::op::BinOpKind};
use super::{
    ctxt::similar_names,
    error::{DivisionByZero, Error, NonRealResult, Overflow, UndefinedFunction},
};

/// Returns the numeric implementation of a one-argument builtin, or [`None`] for
/// [`Builtin::Root`].
pub fn unary_fn(builtin: Builtin) -> Option<fn(f64) -> f64> {
    Some(match builtin {
        Builtin::Sqrt => f64::sqrt,
        Builtin::Exp => f64::exp,
        Builtin::Ln => f64::ln,
        Builtin::Log => f64::log10,
        Builtin::Sin => f64::sin,
        Builtin::Cos => f64::cos,
        Builtin::Tan => f64::tan,
        Builtin::Asin => f64::asin,
        Builtin::Acos => f64::acos,
        Builtin::Atan => f64::atan,
        Builtin::Sinh => f64::sinh,
        Builtin::Cosh => f64::cosh,
        Builtin::Tanh => f64::tanh,
        Builtin::Asinh => f64::asinh,
        Builtin::Acosh => f64::acosh,
        Builtin::Atanh => f64::atanh,
        Builtin::Root => return None,
    })
}

/// Fails with [`NonRealResult`] if `result` is NaN although none of the inputs were, and with
/// [`Overflow`] if `result` is infinite although every input was finite.
fn check_real(result: f64, inputs: &[f64], operation: impl ToString) -> Result<f64, Error> {
    if result.is_nan() && !inputs.iter().any(|input| input.is_nan()) {
        return Err(Error::unspanned(NonRealResult { operation: operation.to_string() }));
    }
    if result.is_infinite() && inputs.iter().all(|input| input.is_finite()) {
        return Err(Error::unspanned(Overflow { operation: operation.to_string() }));
    }
    Ok(result)
}

/// Applies a binary operator.
pub fn apply_binary(op: BinOpKind, lhs: f64, rhs: f64) -> Result<f64, Error> {
    let divides_by_zero = match op {
        BinOpKind::Div => rhs == 0.0,
        BinOpKind::Exp => lhs == 0.0 && rhs < 0.0,
        _ => false,
    };
    if divides_by_zero {
        return Err(Error::unspanned(DivisionByZero));
    }

    check_real(op.apply(lhs, rhs), &[lhs, rhs], op)
}

/// Applies the builtin function with the given name to an argument.
pub fn apply_call(name: &str, arg: f64) -> Result<f64, Error> {
    let Some(builtin) = Builtin::from_name(name) else {
        return Err(undefined_function(name));
    };
    apply_builtin(builtin, arg)
}

/// Applies a one-argument builtin to an argument.
pub fn apply_builtin(builtin: Builtin, arg: f64) -> Result<f64, Error> {
    let f = unary_fn(builtin).ok_or_else(|| undefined_function(builtin.name()))?;
    check_real(f(arg), &[arg], builtin)
}

/// Computes `root(power, target)`, the `power`-th root of `target`.
pub fn apply_root(power: f64, target: f64) -> Result<f64, Error> {
    if power == 0.0 {
        return Err(Error::unspanned(DivisionByZero));
    }
    check_real(target.powf(power.recip()), &[power, target], Builtin::Root)
}

/// Creates the error for a call to a function that is not a one-argument builtin.
fn undefined_function(name: &str) -> Error {
    let known = Builtin::ALL.into_iter()
        .filter(|builtin| unary_fn(*builtin).is_some())
        .map(Builtin::name);
    Error::unspanned(UndefinedFunction {
        name: name.to_string(),
        suggestions: similar_names(name, known),
    })
}
