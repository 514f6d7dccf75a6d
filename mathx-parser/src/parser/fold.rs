//! The operations the shift-reduce engine uses to combine operands.
//!
//! The engine itself only decides *when* operands are combined; a [`Fold`] implementation decides
//! *what* combining them produces. [`Construct`] builds an [`Expr`] tree; an implementation that
//! computes numbers directly lives in the `mathx-compute` crate.

use crate::parser::{
    ast::Expr,
    builtin::Builtin,
    error::{Error, ExpressionTooDeep},
    token::op::BinOpKind,
    MAX_DEPTH,
};
use std::fmt::Debug;

/// A way to combine the operands of a formula into a value.
///
/// Errors returned from these methods may leave their spans empty; the engine points them at the
/// part of the formula being folded.
pub trait Fold {
    /// The value an operand folds into.
    type Value: Debug;

    /// Folds a number literal. A unary minus directly before the literal is already applied.
    fn number(&self, value: f64) -> Result<Self::Value, Error>;

    /// Folds a reference to a variable.
    fn variable(&self, name: &str) -> Result<Self::Value, Error>;

    /// Folds a negation, as in `-x`, `-(a+b)` or `-sin(x)`.
    fn negate(&self, value: Self::Value) -> Result<Self::Value, Error>;

    /// Folds a binary operation.
    fn binary(
        &self,
        lhs: Self::Value,
        op: BinOpKind,
        rhs: Self::Value,
    ) -> Result<Self::Value, Error>;

    /// Folds a call to a one-argument builtin.
    fn call(&self, builtin: Builtin, arg: Self::Value) -> Result<Self::Value, Error>;

    /// Folds `root(power, target)`.
    fn root(&self, power: Self::Value, target: Self::Value) -> Result<Self::Value, Error>;
}

/// An expression tree under construction, along with its depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// The tree built so far.
    pub expr: Expr,

    /// The depth of the tree, as returned by [`Expr::depth`].
    pub depth: usize,
}

/// Fails if a node at the given depth would be deeper than [`MAX_DEPTH`].
fn check_depth(depth: usize) -> Result<(), Error> {
    if depth > MAX_DEPTH {
        return Err(Error::unspanned(ExpressionTooDeep { max_depth: MAX_DEPTH }));
    }
    Ok(())
}

/// Folds a formula into an [`Expr`] tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Construct;

impl Fold for Construct {
    type Value = Fragment;

    fn number(&self, value: f64) -> Result<Fragment, Error> {
        Ok(Fragment { expr: Expr::Constant(value), depth: 1 })
    }

    fn variable(&self, name: &str) -> Result<Fragment, Error> {
        Ok(Fragment { expr: Expr::variable(name), depth: 1 })
    }

    fn negate(&self, value: Fragment) -> Result<Fragment, Error> {
        let depth = value.depth + 1;
        check_depth(depth)?;
        Ok(Fragment { expr: Expr::negation(value.expr), depth })
    }

    fn binary(&self, lhs: Fragment, op: BinOpKind, rhs: Fragment) -> Result<Fragment, Error> {
        let depth = lhs.depth.max(rhs.depth) + 1;
        check_depth(depth)?;
        Ok(Fragment { expr: Expr::binary(lhs.expr, op, rhs.expr), depth })
    }

    fn call(&self, builtin: Builtin, arg: Fragment) -> Result<Fragment, Error> {
        let depth = arg.depth + 1;
        check_depth(depth)?;
        Ok(Fragment { expr: Expr::builtin(builtin, arg.expr), depth })
    }

    fn root(&self, power: Fragment, target: Fragment) -> Result<Fragment, Error> {
        let depth = power.depth.max(target.depth) + 1;
        check_depth(depth)?;
        Ok(Fragment { expr: Expr::root(target.expr, power.expr), depth })
    }
}
