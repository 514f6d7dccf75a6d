//! Paths from the root of an expression tree to the occurrences of a target node.

use super::expr::Expr;

/// Describes where a target node occurs in an expression tree.
///
/// A path is computed by [`Expr::search_path`] and mirrors the shape of the tree it was computed
/// from. A missing path (a subtree that does not contain the target) is represented by [`None`].
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// The node itself is the target.
    Found,

    /// The target is inside the only child of a [`Expr::Negation`] or [`Expr::Call`].
    Through(Box<Path>),

    /// The target is inside one or both children of a [`Expr::Binary`] (`left` is the left-hand
    /// side) or [`Expr::Root`] (`left` is the target, `right` is the power).
    Branch {
        left: Option<Box<Path>>,
        right: Option<Box<Path>>,
    },
}

impl Path {
    /// Creates a branch from the paths of both children, or [`None`] if neither child contains
    /// the target.
    fn branch(left: Option<Path>, right: Option<Path>) -> Option<Self> {
        if left.is_none() && right.is_none() {
            return None;
        }

        Some(Self::Branch {
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }

    /// Returns true if the path splits here, with the target on both sides.
    pub fn is_fork(&self) -> bool {
        matches!(self, Self::Branch { left: Some(_), right: Some(_) })
    }

    /// Returns the number of occurrences of the target along this path.
    pub fn occurrences(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(path) = stack.pop() {
            match path {
                Self::Found => count += 1,
                Self::Through(inner) => stack.push(inner),
                Self::Branch { left, right } => {
                    stack.extend(left.as_deref());
                    stack.extend(right.as_deref());
                },
            }
        }
        count
    }
}

impl Expr {
    /// Returns the path from this node to every occurrence of `target`, or [`None`] if `target`
    /// does not occur in this tree. Occurrences are found by structural equality.
    pub fn search_path(&self, target: &Expr) -> Option<Path> {
        if self == target {
            return Some(Path::Found);
        }

        match self {
            Self::Constant(_) | Self::Variable(_) => None,
            Self::Binary { lhs, rhs, .. } => Path::branch(
                lhs.search_path(target),
                rhs.search_path(target),
            ),
            Self::Negation(inner) | Self::Call { target: inner, .. } => inner
                .search_path(target)
                .map(|path| Path::Through(Box::new(path))),
            Self::Root { target: root_target, power } => Path::branch(
                root_target.search_path(target),
                power.search_path(target),
            ),
        }
    }
}
