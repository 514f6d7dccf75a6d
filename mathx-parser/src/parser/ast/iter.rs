//! Iterative traversals of expression trees.
//!
//! The walks here use an explicit stack, so they work on trees of any depth.

use std::collections::HashSet;
use super::expr::{Expr, ExprKind};

/// An iterator that traverses the tree of expressions in left-to-right pre-order: every node is
/// visited before its children.
///
/// This iterator is created by [`Expr::pre_order_iter`].
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        self.stack.extend(expr.children().into_iter().rev());
        Some(expr)
    }
}

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first): every node is visited after its children.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct PostOrderIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> PostOrderIter<'a> {
    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let children = expr.children();
            match children.last().copied() {
                Some(last) if !self.is_last_visited(last) => {
                    self.stack.extend(children.into_iter().rev());
                },
                _ => return self.visit(),
            }
        }
    }
}

impl Expr {
    /// Returns an iterator over this node and all of its descendants, parents first.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }

    /// Returns an iterator over this node and all of its descendants, children first.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter {
            stack: vec![self],
            last_visited: None,
        }
    }

    /// Returns the number of nodes of the given kind in this tree, including this node.
    pub fn count(&self, kind: ExprKind) -> usize {
        self.pre_order_iter()
            .filter(|expr| expr.kind() == kind)
            .count()
    }

    /// Adds the names of the variables in this tree to `acc`, in the order they first appear
    /// (left to right, outer to inner). Names already in `acc` are not added again.
    pub fn find_free_variables<'a>(&self, acc: &'a mut Vec<String>) -> &'a mut Vec<String> {
        let mut seen = acc.iter().cloned().collect::<HashSet<_>>();
        for expr in self.pre_order_iter() {
            if let Expr::Variable(name) = expr {
                if seen.insert(name.clone()) {
                    acc.push(name.clone());
                }
            }
        }
        acc
    }

    /// Returns the names of the variables in this tree, in the order they first appear.
    pub fn free_variables(&self) -> Vec<String> {
        let mut acc = Vec::new();
        self.find_free_variables(&mut acc);
        acc
    }

    /// Returns true if this tree contains no variables.
    pub fn is_closed(&self) -> bool {
        self.count(ExprKind::Variable) == 0
    }

    /// Returns the number of nodes on the longest path from this node to a leaf, including both.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(expr.children().into_iter().map(|child| (child, depth + 1)));
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::{token::op::BinOpKind, Parser};
    use super::*;

    #[test]
    fn post_order() {
        let expr = Parser::new("a*b+sin(c)").parse_expr().unwrap();
        let names = expr.post_order_iter()
            .map(|expr| match expr {
                Expr::Variable(name) => name.clone(),
                Expr::Binary { op, .. } => op.to_string(),
                Expr::Call { name, .. } => name.clone(),
                other => format!("{:?}", other.kind()),
            })
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a", "b", "*", "c", "sin", "+"]);
    }

    #[test]
    fn pre_order() {
        let expr = Parser::new("-(x^2)").parse_expr().unwrap();
        let kinds = expr.pre_order_iter().map(Expr::kind).collect::<Vec<_>>();

        assert_eq!(kinds, vec![
            ExprKind::Negation,
            ExprKind::Binary,
            ExprKind::Variable,
            ExprKind::Constant,
        ]);
    }

    #[test]
    fn count_kinds() {
        let expr = Parser::new("x*y + 4*x - root(2, x)").parse_expr().unwrap();

        assert_eq!(expr.count(ExprKind::Variable), 4);
        assert_eq!(expr.count(ExprKind::Binary), 4);
        assert_eq!(expr.count(ExprKind::Constant), 2);
        assert_eq!(expr.count(ExprKind::Root), 1);
        assert_eq!(expr.count(ExprKind::Negation), 0);
    }

    #[test]
    fn free_variables_first_occurrence() {
        let expr = Parser::new("y*root(b, a) + x - y").parse_expr().unwrap();
        assert_eq!(expr.free_variables(), vec!["y", "a", "b", "x"]);
    }

    #[test]
    fn free_variables_into_existing_accumulator() {
        let expr = Parser::new("a + q").parse_expr().unwrap();
        let mut acc = vec!["q".to_string()];
        expr.find_free_variables(&mut acc);

        assert_eq!(acc, vec!["q", "a"]);
    }

    #[test]
    fn free_variables_many_repeats() {
        let names = (0..1000).map(|i| format!("v{}", i % 250)).collect::<Vec<_>>();
        let expr = names.iter()
            .map(|name| Expr::variable(name))
            .reduce(|acc, var| Expr::binary(acc, BinOpKind::Add, var))
            .unwrap();

        assert_eq!(expr.free_variables(), names[..250].to_vec());
    }

    #[test]
    fn depth() {
        assert_eq!(Expr::Constant(1.0).depth(), 1);
        assert_eq!(Parser::new("1+2*3").parse_expr().unwrap().depth(), 3);
        assert_eq!(Parser::new("-sin(x)").parse_expr().unwrap().depth(), 3);
    }
}
