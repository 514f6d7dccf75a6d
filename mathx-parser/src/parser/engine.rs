//! The shift-reduce machine that folds a stream of tokens into a single value.
//!
//! Tokens are shifted onto a stack one at a time. After every shift, the machine looks at the
//! last four entries of the stack and reduces them for as long as a reduction applies:
//!
//! - `[opener, operand, ")", lookahead]` closes a group or builtin call.
//! - `[operand, op, operand, lookahead]` folds a binary operation (or appends to an argument
//!   list for `,`), unless `op` binds less tightly than `lookahead`, or both are `^`.
//!
//! Once the input is exhausted, an end-of-stream entry is shifted and the stack is drained. The
//! formula is valid if exactly one operand is left in front of the end-of-stream entry.

use crate::{
    parser::{
        builtin::Builtin,
        error::{
            ArgumentsOutsideCall,
            CannotReduce,
            EmptyExpression,
            Error,
            MalformedNumber,
            MissingCallParen,
            NumberOutOfRange,
            RootArity,
            SuperfluousMinus,
            TooManyArguments,
            UnclosedParenthesis,
            UnexpectedCharacter,
            UnexpectedEofAfterMinus,
            UnmatchedParenthesis,
        },
        fold::Fold,
        token::op::{BinOpKind, StackOp},
        Parser,
        Precedence,
    },
    tokenizer::{Token, TokenKind},
};
use std::ops::Range;
use tracing::trace;

/// A value on the stack: either a single operand, or the arguments of a builtin call collected
/// by `,`.
#[derive(Debug)]
pub enum Operand<V> {
    Single(V),
    Tuple(Vec<V>),
}

impl<V> Operand<V> {
    /// Returns the number of values in this operand.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Tuple(values) => values.len(),
        }
    }
}

/// What an opening entry opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opener {
    /// A parenthesized group.
    Group,

    /// The argument list of a builtin call. The `(` is part of the entry.
    Call(Builtin),
}

/// An entry on the parser's stack.
#[derive(Debug)]
pub enum Entry<V> {
    Operand {
        value: Operand<V>,
        span: Range<usize>,
    },
    Op {
        op: StackOp,
        span: Range<usize>,
    },
    Open {
        opener: Opener,

        /// Whether a unary minus directly precedes the opener, as in `-(a+b)` or `-sin(x)`.
        negated: bool,
        span: Range<usize>,
    },
    Close {
        span: Range<usize>,
    },
    Eos {
        span: Range<usize>,
    },
}

impl<V> Entry<V> {
    /// Returns the precedence of the entry.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Operand { .. } => Precedence::Operand,
            Self::Op { op, .. } => op.precedence(),
            Self::Open { .. } => Precedence::Barrier,
            Self::Close { .. } | Self::Eos { .. } => Precedence::Terminator,
        }
    }

    /// Returns the region of the source code this entry was built from.
    pub fn span(&self) -> &Range<usize> {
        match self {
            Self::Operand { span, .. }
                | Self::Op { span, .. }
                | Self::Open { span, .. }
                | Self::Close { span }
                | Self::Eos { span } => span,
        }
    }
}

/// The reduction to apply to the top of the stack.
#[derive(Debug, Clone, Copy)]
enum Reduction {
    Close,
    Binary,
}

/// Creates an error pointing at an unexpected token.
fn unexpected_character(token: &Token) -> Error {
    Error::new(vec![token.span.clone()], UnexpectedCharacter {
        found: token.lexeme.to_string(),
    })
}

/// Parses a number literal.
fn parse_number(token: &Token) -> Result<f64, Error> {
    let lexeme = token.lexeme;
    if let Some(marker) = lexeme.find(['e', 'E']) {
        if lexeme[marker + 1..].trim_start_matches(['+', '-']).is_empty() {
            return Err(Error::new(vec![token.span.clone()], MalformedNumber { missing_exponent: true }));
        }
    }

    let value = lexeme
        .parse::<f64>()
        .map_err(|_| Error::new(vec![token.span.clone()], MalformedNumber { missing_exponent: false }))?;
    if value.is_infinite() {
        return Err(Error::new(vec![token.span.clone()], NumberOutOfRange));
    }
    Ok(value)
}

/// The shift-reduce machine, folding the tokens of a [`Parser`] with a [`Fold`] implementation.
pub struct ShiftReduce<'source, 'f, F: Fold> {
    parser: Parser<'source>,
    folder: &'f F,
    stack: Vec<Entry<F::Value>>,
}

impl<'source, 'f, F: Fold> ShiftReduce<'source, 'f, F> {
    /// Creates a machine that folds the remaining tokens of the given parser.
    pub fn new(parser: Parser<'source>, folder: &'f F) -> Self {
        Self {
            parser,
            folder,
            stack: Vec::new(),
        }
    }

    /// Runs the machine to completion, returning the folded value.
    pub fn run(mut self) -> Result<F::Value, Error> {
        while self.shift()? {
            while self.reduce()? {}
        }
        while self.reduce()? {}
        self.finish()
    }

    /// Returns true if a `-` at this point is a unary minus: the stack is empty, or its top entry
    /// is an operator or opener.
    fn expects_operand(&self) -> bool {
        self.stack
            .last()
            .map_or(true, |entry| entry.precedence() > Precedence::Terminator)
    }

    /// Shifts the next token onto the stack. Returns false once the end-of-stream entry has been
    /// shifted.
    fn shift(&mut self) -> Result<bool, Error> {
        let Some(token) = self.parser.next_token() else {
            let span = self.parser.eof_span();
            self.stack.push(Entry::Eos { span });
            trace!(target: "mathx::parser", stack = ?self.stack, "shifted end of stream");
            return Ok(false);
        };

        let binary = |op, span| Entry::Op { op: StackOp::Binary(op), span };
        let entry = match token.kind {
            TokenKind::OpenParen => Entry::Open {
                opener: Opener::Group,
                negated: false,
                span: token.span,
            },
            TokenKind::CloseParen => Entry::Close { span: token.span },
            TokenKind::Comma => Entry::Op { op: StackOp::Comma, span: token.span },
            TokenKind::Exp => binary(BinOpKind::Exp, token.span),
            TokenKind::Mul => binary(BinOpKind::Mul, token.span),
            TokenKind::Div => binary(BinOpKind::Div, token.span),
            TokenKind::Add => binary(BinOpKind::Add, token.span),
            TokenKind::Sub if self.expects_operand() => self.negated(token)?,
            TokenKind::Sub => binary(BinOpKind::Sub, token.span),
            TokenKind::Name | TokenKind::Number | TokenKind::Dot => self.operand(token, None)?,
            TokenKind::Assign | TokenKind::Symbol | TokenKind::Whitespace => {
                return Err(unexpected_character(&token));
            },
        };

        self.stack.push(entry);
        trace!(target: "mathx::parser", stack = ?self.stack, "shifted");
        Ok(true)
    }

    /// Builds the entry that follows a unary minus.
    fn negated(&mut self, minus: Token) -> Result<Entry<F::Value>, Error> {
        let Some(token) = self.parser.next_token() else {
            return Err(Error::new(vec![minus.span], UnexpectedEofAfterMinus));
        };

        match token.kind {
            TokenKind::Sub => Err(Error::new(vec![minus.span.start..token.span.end], SuperfluousMinus)),
            TokenKind::OpenParen => Ok(Entry::Open {
                opener: Opener::Group,
                negated: true,
                span: minus.span.start..token.span.end,
            }),
            TokenKind::Name | TokenKind::Number | TokenKind::Dot => {
                self.operand(token, Some(minus.span.start))
            },
            _ => Err(unexpected_character(&token)),
        }
    }

    /// Builds the entry for a number, variable or builtin call. `minus` is the start of a unary
    /// minus directly in front of the token, if any.
    fn operand(&mut self, token: Token, minus: Option<usize>) -> Result<Entry<F::Value>, Error> {
        let negated = minus.is_some();
        let span = minus.unwrap_or(token.span.start)..token.span.end;

        match token.kind {
            TokenKind::Number => {
                let value = parse_number(&token)?;
                let value = self.folder
                    .number(if negated { -value } else { value })
                    .map_err(|err| err.with_default_span(span.clone()))?;
                Ok(Entry::Operand { value: Operand::Single(value), span })
            },
            TokenKind::Name => match Builtin::from_name(token.lexeme) {
                Some(builtin) => match self.parser.next_token() {
                    Some(paren) if paren.kind == TokenKind::OpenParen => Ok(Entry::Open {
                        opener: Opener::Call(builtin),
                        negated,
                        span: span.start..paren.span.end,
                    }),
                    _ => Err(Error::new(vec![token.span], MissingCallParen { name: builtin.name() })),
                },
                None => {
                    let mut value = self.folder
                        .variable(token.lexeme)
                        .map_err(|err| err.with_default_span(token.span.clone()))?;
                    if negated {
                        value = self.folder
                            .negate(value)
                            .map_err(|err| err.with_default_span(span.clone()))?;
                    }
                    Ok(Entry::Operand { value: Operand::Single(value), span })
                },
            },
            TokenKind::Dot => Err(Error::new(vec![token.span], MalformedNumber { missing_exponent: false })),
            _ => Err(unexpected_character(&token)),
        }
    }

    /// Applies one reduction to the top of the stack, if any applies. Returns true if the stack
    /// was reduced.
    fn reduce(&mut self) -> Result<bool, Error> {
        let Some(start) = self.stack.len().checked_sub(4) else {
            return Ok(false);
        };

        let reduction = match &self.stack[start..] {
            [Entry::Open { .. }, Entry::Operand { .. }, Entry::Close { .. }, _] => Reduction::Close,
            [Entry::Operand { .. }, Entry::Op { op, .. }, Entry::Operand { .. }, lookahead] => {
                // the pending operator binds more tightly
                if op.precedence() < lookahead.precedence() {
                    return Ok(false);
                }

                // exponentiation is right-associative
                if *op == StackOp::Binary(BinOpKind::Exp)
                    && matches!(lookahead, Entry::Op { op: StackOp::Binary(BinOpKind::Exp), .. }) {
                    return Ok(false);
                }

                Reduction::Binary
            },
            _ => return Ok(false),
        };

        let window = self.stack.split_off(start);
        let (value, span, lookahead) = match (reduction, <[_; 4]>::try_from(window)) {
            (
                Reduction::Close,
                Ok([
                    Entry::Open { opener, negated, span: open_span },
                    Entry::Operand { value, .. },
                    Entry::Close { span: close_span },
                    lookahead,
                ]),
            ) => {
                let span = open_span.start..close_span.end;
                let value = self.close(opener, negated, value)
                    .map_err(|err| err.with_default_span(span.clone()))?;
                (Operand::Single(value), span, lookahead)
            },
            (
                Reduction::Binary,
                Ok([
                    Entry::Operand { value: lhs, span: lhs_span },
                    Entry::Op { op, .. },
                    Entry::Operand { value: rhs, span: rhs_span },
                    lookahead,
                ]),
            ) => {
                let span = lhs_span.start..rhs_span.end;
                let value = self.fold_binary(lhs, op, rhs)
                    .map_err(|err| err.with_default_span(span.clone()))?;
                (value, span, lookahead)
            },
            _ => unreachable!("the reduction window changed shape"),
        };

        self.stack.push(Entry::Operand { value, span });
        self.stack.push(lookahead);
        trace!(target: "mathx::parser", stack = ?self.stack, "reduced");
        Ok(true)
    }

    /// Closes a group or builtin call around the given operand.
    fn close(
        &self,
        opener: Opener,
        negated: bool,
        operand: Operand<F::Value>,
    ) -> Result<F::Value, Error> {
        let value = match (opener, operand) {
            (Opener::Group, Operand::Single(value)) => value,
            (Opener::Group, Operand::Tuple(_)) => return Err(Error::unspanned(ArgumentsOutsideCall)),
            (Opener::Call(Builtin::Root), Operand::Tuple(args)) => {
                let given = args.len();
                match <[_; 2]>::try_from(args) {
                    Ok([power, target]) => self.folder.root(power, target)?,
                    Err(_) => return Err(Error::unspanned(RootArity { given })),
                }
            },
            (Opener::Call(Builtin::Root), Operand::Single(_)) => {
                return Err(Error::unspanned(RootArity { given: 1 }));
            },
            (Opener::Call(builtin), Operand::Single(arg)) => self.folder.call(builtin, arg)?,
            (Opener::Call(builtin), Operand::Tuple(args)) => {
                return Err(Error::unspanned(TooManyArguments {
                    name: builtin.name(),
                    given: args.len(),
                }));
            },
        };

        if negated {
            self.folder.negate(value)
        } else {
            Ok(value)
        }
    }

    /// Folds a binary operation, or appends to an argument list.
    fn fold_binary(
        &self,
        lhs: Operand<F::Value>,
        op: StackOp,
        rhs: Operand<F::Value>,
    ) -> Result<Operand<F::Value>, Error> {
        match (op, lhs, rhs) {
            (StackOp::Comma, Operand::Single(lhs), Operand::Single(rhs)) => {
                Ok(Operand::Tuple(vec![lhs, rhs]))
            },
            (StackOp::Comma, Operand::Tuple(mut args), Operand::Single(rhs)) => {
                args.push(rhs);
                Ok(Operand::Tuple(args))
            },
            (StackOp::Binary(op), Operand::Single(lhs), Operand::Single(rhs)) => {
                self.folder.binary(lhs, op, rhs).map(Operand::Single)
            },
            _ => Err(Error::unspanned(ArgumentsOutsideCall)),
        }
    }

    /// Extracts the result from the drained stack, or explains why the formula could not be
    /// reduced.
    fn finish(self) -> Result<F::Value, Error> {
        let stack = self.stack;
        let reduced = matches!(
            stack.as_slice(),
            [Entry::Operand { value: Operand::Single(_), .. }, Entry::Eos { .. }]
        );
        if !reduced {
            return Err(diagnose(&stack));
        }

        match stack.into_iter().next() {
            Some(Entry::Operand { value: Operand::Single(value), .. }) => Ok(value),
            _ => unreachable!("the final operand disappeared"),
        }
    }
}

/// Explains why the given stack could not be reduced to a single operand.
fn diagnose<V>(stack: &[Entry<V>]) -> Error {
    let leftover = stack
        .iter()
        .filter(|entry| !matches!(entry, Entry::Eos { .. }))
        .collect::<Vec<_>>();

    let (Some(first), Some(last)) = (leftover.first(), leftover.last()) else {
        let span = stack.last().map_or(0..0, |entry| entry.span().clone());
        return Error::new(vec![span], EmptyExpression);
    };

    let mut unclosed = Vec::new();
    for entry in &leftover {
        match entry {
            Entry::Open { span, .. } => unclosed.push(span.clone()),
            Entry::Close { span } => {
                if unclosed.pop().is_none() {
                    return Error::new(vec![span.clone()], UnmatchedParenthesis);
                }
            },
            _ => (),
        }
    }
    if let Some(span) = unclosed.into_iter().next() {
        return Error::new(vec![span], UnclosedParenthesis);
    }

    if let [Entry::Operand { value: Operand::Tuple(_), span }] = leftover.as_slice() {
        return Error::new(vec![span.clone()], ArgumentsOutsideCall);
    }

    let after_comma = leftover.windows(2).any(|pair| matches!(
        pair,
        [
            Entry::Op { op: StackOp::Comma, .. },
            Entry::Op { op: StackOp::Binary(BinOpKind::Sub), .. },
        ]
    ));
    Error::new(vec![first.span().start..last.span().end], CannotReduce { after_comma })
}
