//! Algebraic manipulation of expression trees.
//!
//! # Simplification
//!
//! [`simplify()`] makes one bottom-up pass over a tree: the children of a node are simplified
//! first, then a set of node-local rewrite rules is applied to the node until none applies. Each
//! rule is simply a function that accepts an expression and returns [`Option<Expr>`]; if the rule
//! is applicable to the expression, the rule is applied and the result is returned.
//!
//! The rules fold constant subtrees and apply the identity laws of the operators (`0+x = x`,
//! `x*1 = x`, `x^0 = 1`, and so on), cancel double negations, and push negations into products
//! and differences. They do not combine like terms or otherwise bring the tree into a canonical
//! form, so two equivalent trees may simplify to different results.
//!
//! ```
//! use mathx_compute::symbolic::simplify;
//! use mathx_parser::Expr;
//!
//! let expr = "0 + 1*x - -(2*y)".parse::<Expr>().unwrap();
//! assert_eq!(simplify(&expr).to_string(), "x--2*y");
//! ```
//!
//! Simplification never mutates its input; it returns a new tree.

pub mod equivalent;
pub mod simplify;
pub mod step_collector;

pub use equivalent::is_equivalent;
pub use simplify::{simplify, simplify_with, simplify_with_steps, step::Step};
pub use step_collector::StepCollector;
