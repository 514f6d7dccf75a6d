//! Numerical evaluation of formulas and expression trees.
//!
//! There are two ways to evaluate a formula:
//!
//! - Parse it into an [`Expr`](mathx_parser::Expr) first, then evaluate the tree any number of
//!   times with [`Eval::eval`].
//! - Fold it straight into a number with [`evaluate_formula`], which never builds a tree. Unbound
//!   variables are then reported as parse errors, pointing at the variable in the formula.
//!
//! Both agree on every formula and binding table.

pub mod builtin;
pub mod ctxt;
pub mod error;
pub mod eval;

pub use ctxt::Ctxt;
pub use eval::{evaluate_formula, Eval, Immediate};
