//! Evaluation, simplification and equation solving for the expression trees produced by
//! [`mathx_parser`].
//!
//! - [`numerical`] evaluates trees (or formulas directly, without building a tree) to real
//!   numbers.
//! - [`symbolic`] rewrites trees into simpler, equivalent ones.
//! - [`solver`] isolates each free variable of an equation by inverting the operations on the path
//!   from the root of the equation to the variable.
//!
//! ```
//! use mathx_compute::solver::{solve_str, SolveOptions};
//!
//! let solutions = solve_str("3*x + 5 = 2*y", &SolveOptions::default()).unwrap();
//! let x = solutions.get("x").unwrap().as_ref().unwrap();
//! assert_eq!(x.value.to_string(), "(2*y-5)/3");
//! ```
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for the binding table and solver results.

pub mod numerical;
pub mod solver;
pub mod symbolic;
