use mathx_parser::parser::{
    builtin::Builtin,
    error::UnknownVariable,
    fold::Fold,
    token::op::BinOpKind,
};
use crate::numerical::{
    builtin::{apply_binary, apply_builtin, apply_root},
    ctxt::Ctxt,
    error::Error,
};

/// Folds a formula straight into a number, looking variables up in a context as soon as they are
/// read.
#[derive(Debug, Clone, Copy)]
pub struct Immediate<'c> {
    ctxt: &'c Ctxt,
}

impl<'c> Immediate<'c> {
    /// Creates a folder that evaluates with the given context.
    pub fn new(ctxt: &'c Ctxt) -> Self {
        Self { ctxt }
    }
}

impl Fold for Immediate<'_> {
    type Value = f64;

    fn number(&self, value: f64) -> Result<f64, Error> {
        Ok(value)
    }

    fn variable(&self, name: &str) -> Result<f64, Error> {
        self.ctxt.get_var(name).ok_or_else(|| Error::unspanned(UnknownVariable {
            name: name.to_string(),
            suggestions: self.ctxt.get_similar_vars(name),
        }))
    }

    fn negate(&self, value: f64) -> Result<f64, Error> {
        Ok(-value)
    }

    fn binary(&self, lhs: f64, op: BinOpKind, rhs: f64) -> Result<f64, Error> {
        apply_binary(op, lhs, rhs)
    }

    fn call(&self, builtin: Builtin, arg: f64) -> Result<f64, Error> {
        apply_builtin(builtin, arg)
    }

    fn root(&self, power: f64, target: f64) -> Result<f64, Error> {
        apply_root(power, target)
    }
}
