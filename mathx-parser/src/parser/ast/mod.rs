//! The expression tree produced by the parser.

pub mod expr;
pub mod iter;
pub mod path;

pub use expr::{Expr, ExprKind};
pub use path::Path;
