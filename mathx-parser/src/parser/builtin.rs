//! The builtin functions that formulas can call.

use std::fmt::{Display, Formatter};

/// A builtin function that can be called from a formula.
///
/// Every builtin takes a single argument except [`Builtin::Root`], which is called as
/// `root(power, value)` and computes `value^(1/power)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sqrt,
    Exp,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Root,
}

impl Builtin {
    /// Every builtin function.
    pub const ALL: [Builtin; 17] = [
        Self::Sqrt, Self::Exp, Self::Ln, Self::Log,
        Self::Sin, Self::Cos, Self::Tan,
        Self::Asin, Self::Acos, Self::Atan,
        Self::Sinh, Self::Cosh, Self::Tanh,
        Self::Asinh, Self::Acosh, Self::Atanh,
        Self::Root,
    ];

    /// Returns the builtin with the given name, if there is one.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Returns the name used to call the builtin.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Root => "root",
        }
    }

    /// Returns the number of arguments the builtin takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Root => 2,
            _ => 1,
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("sine"), None);
    }

    #[test]
    fn only_root_is_binary() {
        assert_eq!(Builtin::Root.arity(), 2);
        assert!(Builtin::ALL.iter().filter(|b| **b != Builtin::Root).all(|b| b.arity() == 1));
    }
}
