//! Lexer, shift-reduce parser and expression tree for mathematical formulas.
//!
//! A formula such as `3*x + sin(y)^2` is split into tokens by the [`tokenizer`], then folded by
//! the shift-reduce engine in [`parser`]. The engine is generic over a [`parser::fold::Fold`]
//! implementation, so the same grammar can either build an [`Expr`] tree or compute a number
//! directly.
//!
//! ```
//! use mathx_parser::parser::{ast::Expr, token::op::BinOpKind, Parser};
//!
//! let expr = Parser::new("2 + x").parse_expr().unwrap();
//! assert_eq!(expr, Expr::binary(Expr::Constant(2.0), BinOpKind::Add, Expr::variable("x")));
//! assert_eq!(expr.to_string(), "2+x");
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{ast::Expr, equation::Equation, Parser};
