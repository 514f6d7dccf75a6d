use crate::parser::{
    builtin::Builtin,
    error::Error,
    token::op::BinOpKind,
    Parser,
};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of an expression tree.
///
/// Every node owns its children, so a tree never shares subtrees. Equality ([`PartialEq`]) is
/// structural: two trees are equal when they have the same shape, operators, names and constant
/// values, not when they are mathematically equivalent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A real number.
    Constant(f64),

    /// A named variable, such as `x` or `α`.
    Variable(String),

    /// A binary operation, such as `a + b`.
    Binary {
        lhs: Box<Expr>,
        op: BinOpKind,
        rhs: Box<Expr>,
    },

    /// The negation of an expression, such as `-x` or `-(a + b)`.
    Negation(Box<Expr>),

    /// A call to a one-argument function, such as `sin(x)`.
    ///
    /// The function is stored by name; evaluating a call to a name that is not a one-argument
    /// builtin is an error.
    Call {
        name: String,
        target: Box<Expr>,
    },

    /// The `power`-th root of `target`, that is, `target^(1/power)`. Written `root(power,
    /// target)`.
    Root {
        target: Box<Expr>,
        power: Box<Expr>,
    },
}

/// The variant of an [`Expr`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Constant,
    Variable,
    Binary,
    Negation,
    Call,
    Root,
}

impl Expr {
    /// Creates a variable node.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a binary operation node.
    pub fn binary(lhs: Expr, op: BinOpKind, rhs: Expr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Creates a negation node.
    pub fn negation(target: Expr) -> Self {
        Self::Negation(Box::new(target))
    }

    /// Creates a call to the given function.
    pub fn call(name: impl Into<String>, target: Expr) -> Self {
        Self::Call {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Creates a call to the given builtin.
    pub fn builtin(builtin: Builtin, target: Expr) -> Self {
        Self::call(builtin.name(), target)
    }

    /// Creates a root node, `target^(1/power)`.
    pub fn root(target: Expr, power: Expr) -> Self {
        Self::Root {
            target: Box::new(target),
            power: Box::new(power),
        }
    }

    /// Returns the variant of this node.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Constant(_) => ExprKind::Constant,
            Self::Variable(_) => ExprKind::Variable,
            Self::Binary { .. } => ExprKind::Binary,
            Self::Negation(_) => ExprKind::Negation,
            Self::Call { .. } => ExprKind::Call,
            Self::Root { .. } => ExprKind::Root,
        }
    }

    /// Returns the value of this node if it is a constant.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if this node is the constant `value`.
    pub fn is_constant(&self, value: f64) -> bool {
        self.as_constant() == Some(value)
    }

    /// Returns the direct children of this node, in left-to-right order. For [`Expr::Root`], the
    /// target comes before the power.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Constant(_) | Self::Variable(_) => Vec::new(),
            Self::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Self::Negation(target) | Self::Call { target, .. } => vec![target],
            Self::Root { target, power } => vec![target, power],
        }
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s).parse_expr()
    }
}
