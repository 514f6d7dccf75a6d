use crate::{
    parser::{
        ast::Expr,
        error::{ChainedEquality, Error, MissingEquals},
        token::op::BinOpKind,
        Parser,
    },
    tokenizer::{tokenize_complete, TokenKind},
};
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation of the form `lhs = rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,
}

impl Equation {
    /// Parses an equation. The source must contain exactly one `=` sign; spans in errors from
    /// either side point into the whole source.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let tokens = tokenize_complete(source);
        let equals = tokens.iter()
            .enumerate()
            .filter(|(_, token)| token.kind == TokenKind::Assign)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        let split = match equals.as_slice() {
            [] => return Err(Error::new(vec![0..source.len()], MissingEquals)),
            [split] => *split,
            [_, extra @ ..] => return Err(Error::new(
                extra.iter().map(|&i| tokens[i].span.clone()).collect(),
                ChainedEquality { extra: extra.len() },
            )),
        };

        let lhs = Parser::from_tokens(tokens[..split].to_vec(), tokens[split].span.start)
            .parse_expr()?;
        let rhs = Parser::from_tokens(tokens[split + 1..].to_vec(), source.len())
            .parse_expr()?;

        Ok(Self { lhs, rhs })
    }

    /// Returns the expression `lhs - rhs`, which is zero exactly where the equation holds.
    pub fn difference(&self) -> Expr {
        Expr::binary(self.lhs.clone(), BinOpKind::Sub, self.rhs.clone())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.lhs, self.rhs)
    }
}

impl FromStr for Equation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::error::{EmptyExpression, UnexpectedCharacter};
    use super::*;

    #[test]
    fn both_sides() {
        let eq = Equation::parse("3*x + 5 = y").unwrap();
        assert_eq!(eq.lhs, "3*x+5".parse().unwrap());
        assert_eq!(eq.rhs, Expr::variable("y"));
        assert_eq!(eq.to_string(), "3*x+5=y");
        assert_eq!(eq.difference().to_string(), "3*x+5-y");
    }

    #[test]
    fn difference_groups_right_side() {
        let eq = Equation::parse("x = a - b").unwrap();
        assert_eq!(eq.difference().to_string(), "x-(a-b)");
    }

    #[test]
    fn missing_equals() {
        let err = Equation::parse("x + 1").unwrap_err();
        assert!(err.is::<MissingEquals>());
        assert_eq!(err.spans, vec![0..5]);
    }

    #[test]
    fn chained_equality() {
        let err = Equation::parse("a = b = c = d").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&ChainedEquality { extra: 2 }));
        assert_eq!(err.spans, vec![6..7, 10..11]);
    }

    #[test]
    fn empty_side() {
        let err = Equation::parse("x + 1 = ").unwrap_err();
        assert!(err.is::<EmptyExpression>());
        assert_eq!(err.spans, vec![8..8]);

        let err = Equation::parse(" = 2").unwrap_err();
        assert!(err.is::<EmptyExpression>());
        assert_eq!(err.spans, vec![1..1]);
    }

    #[test]
    fn spans_point_into_whole_source() {
        let err = Equation::parse("x = 2 $ 3").unwrap_err();
        assert!(err.is::<UnexpectedCharacter>());
        assert_eq!(err.spans, vec![6..7]);
    }
}
