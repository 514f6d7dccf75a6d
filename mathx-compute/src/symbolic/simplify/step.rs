#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// An operation on constants was replaced by its value.
    ///
    /// `2+3 = 5`
    /// `sqrt(16) = 4`
    FoldConstants,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `0-a = -a`
    SubtractFromZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `-1*a = -a`
    /// `a*-1 = -a`
    MultiplyNegativeOne,

    /// `0/a = 0`
    DivideZero,

    /// `a/1 = a`
    DivideOne,

    /// `a/-1 = -a`
    DivideNegativeOne,

    /// `0^a = 0`
    PowerZeroBase,

    /// `1^a = 1`
    PowerOneBase,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `--a = a`
    DoubleNegation,

    /// `-(c*a) = (-c)*a`
    /// `-(a*c) = a*(-c)`
    NegateFactor,

    /// `-(a-b) = b-a`
    NegateDifference,
}
