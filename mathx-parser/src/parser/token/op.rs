//! Binary operators and the operators that can sit on the parser's stack.

use crate::parser::{Associativity, Precedence};
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            Self::Mul | Self::Div | Self::Add | Self::Sub => Associativity::Left,
        }
    }

    /// Returns the symbol used to write this operation.
    pub fn symbol(&self) -> char {
        match self {
            Self::Exp => '^',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Add => '+',
            Self::Sub => '-',
        }
    }

    /// Applies the operation to two numbers, without any domain checks.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Exp => lhs.powf(rhs),
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An operator waiting on the parser's stack for its right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StackOp {
    /// A binary arithmetic operator.
    Binary(BinOpKind),

    /// The `,` separating the arguments of a builtin call.
    Comma,
}

impl StackOp {
    /// Returns the precedence of the operator.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Binary(op) => op.precedence(),
            Self::Comma => Precedence::Terminator,
        }
    }
}

impl Display for StackOp {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Binary(op) => write!(f, "{}", op),
            Self::Comma => write!(f, ","),
        }
    }
}
