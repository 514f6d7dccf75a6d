pub mod ast;
pub mod builtin;
pub mod engine;
pub mod equation;
pub mod error;
pub mod fmt;
pub mod fold;
pub mod token;

use ast::Expr;
use engine::ShiftReduce;
use error::Error;
use fold::{Construct, Fold};
use super::tokenizer::{tokenize_complete, Token};
use std::ops::Range;

/// The maximum depth of an expression tree built by the parser.
///
/// Operations on expression trees are free to recurse; limiting the depth of parsed trees keeps
/// that recursion bounded.
pub const MAX_DEPTH: usize = 1 << 11;

/// A high-level parser for formulas. This is the type to use to parse a formula into an
/// expression tree, or to fold it into some other value with a [`Fold`] implementation.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The offset of the end of the source code.
    end: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self::from_tokens(tokenize_complete(source), source.len())
    }

    /// Create a parser for a run of tokens taken from a larger source. `end` is the offset at
    /// which the run ends, used to point at the end of the formula in errors.
    pub fn from_tokens(tokens: impl Into<Box<[Token<'source>]>>, end: usize) -> Self {
        Self {
            tokens: tokens.into(),
            cursor: 0,
            end,
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.end..self.end
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns [`None`] if there are no more tokens.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Some(token.clone());
            }
        }

        None
    }

    /// Folds the whole formula with the given [`Fold`] implementation.
    pub fn parse_with<F: Fold>(self, folder: &F) -> Result<F::Value, Error> {
        ShiftReduce::new(self, folder).run()
    }

    /// Parses the whole formula into an expression tree.
    pub fn parse_expr(self) -> Result<Expr, Error> {
        self.parse_with(&Construct).map(|fragment| fragment.expr)
    }
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an entry on the parser's stack, in order from lowest precedence to highest
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Operands, which never force a reduction.
    Operand,

    /// `)`, `,` and the end of the formula, which let every pending operation reduce.
    Terminator,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// `(` and builtin calls, which keep everything before them on the stack until they are
    /// closed.
    Barrier,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}
