use mathx_parser::{
    parser::{ast::Path, builtin::Builtin, token::op::BinOpKind},
    Expr,
};
use super::{
    error::{Error, IncompatiblePath, NoInverse, UnsupportedFork},
    inverse::invert_call,
    linear,
};

/// `ln(numerator)/ln(denominator)`, the solution of `denominator^x = numerator`.
fn log_ratio(numerator: Expr, denominator: Expr) -> Expr {
    Expr::binary(
        Expr::builtin(Builtin::Ln, numerator),
        BinOpKind::Div,
        Expr::builtin(Builtin::Ln, denominator),
    )
}

/// Solves `base^a * base^b = other` for `base`, where both exponents are free of the target.
fn power_product(lhs: Expr, left: Path, rhs: Expr, right: Path, other: Expr) -> Result<(Expr, Path, Expr), Error> {
    match (lhs, left, rhs, right) {
        (
            Expr::Binary { lhs: base, op: BinOpKind::Exp, rhs: a },
            Path::Branch { left: Some(base_path), right: None },
            Expr::Binary { lhs: rhs_base, op: BinOpKind::Exp, rhs: b },
            Path::Branch { left: Some(_), right: None },
        ) if base == rhs_base => {
            let power = Expr::binary(*a, BinOpKind::Add, *b);
            Ok((*base, *base_path, Expr::root(other, power)))
        },
        _ => Err(Error::unspanned(UnsupportedFork { operation: BinOpKind::Mul.to_string() })),
    }
}

/// Reduces an equation whose target occurs on both sides of the root node.
fn reduce_fork(expr: Expr, path: Path, other: Expr) -> Result<(Expr, Path, Expr), Error> {
    match (expr, path) {
        (sum @ Expr::Binary { op: BinOpKind::Add | BinOpKind::Sub, .. }, path) => {
            linear::isolate(&sum, &path, other)
        },
        (Expr::Binary { lhs, op: BinOpKind::Mul, rhs }, Path::Branch { left: Some(left), right: Some(right) }) => {
            power_product(*lhs, *left, *rhs, *right, other)
        },
        (Expr::Binary { op, .. }, _) => Err(Error::unspanned(UnsupportedFork { operation: op.to_string() })),
        (expr, _) => Err(Error::unspanned(UnsupportedFork { operation: format!("{:?}", expr.kind()).to_lowercase() })),
    }
}

/// Peels one operation off the root of the equation `expr = other`, where `path` leads from
/// `expr` to the target being isolated.
///
/// Returns the equation `subject = other'`, equivalent to the given one, along with the path from
/// `subject` to the target. Once the returned path is [`Path::Found`], `subject` is the target and
/// `other'` is its value.
///
/// | root       | target in | subject  | other'                 |
/// |------------|-----------|----------|------------------------|
/// | `a+b`      | `a`       | `a`      | `other-b`              |
/// | `a+b`      | `b`       | `b`      | `other-a`              |
/// | `a-b`      | `a`       | `a`      | `other+b`              |
/// | `a-b`      | `b`       | `b`      | `a-other`              |
/// | `a*b`      | `a`       | `a`      | `other/b`              |
/// | `a*b`      | `b`       | `b`      | `other/a`              |
/// | `a/b`      | `a`       | `a`      | `other*b`              |
/// | `a/b`      | `b`       | `b`      | `a/other`              |
/// | `a^b`      | `a`       | `a`      | `root(b, other)`       |
/// | `a^b`      | `b`       | `b`      | `ln(other)/ln(a)`      |
/// | `-a`       | `a`       | `a`      | `-other`               |
/// | `f(a)`     | `a`       | `a`      | `f⁻¹(other)`           |
/// | `root(p, a)` | `a`     | `a`      | `other^p`              |
/// | `root(p, a)` | `p`     | `p`      | `ln(a)/ln(other)`      |
///
/// If the target occurs on both sides of a sum, every term is collected at once (see
/// [`linear::isolate`]); if it occurs in both factors of `base^a * base^b`, the subject becomes
/// `base` with `other' = root(a+b, other)`. Other shapes are an error.
pub fn reduce_path(expr: Expr, path: Path, other: Expr) -> Result<(Expr, Path, Expr), Error> {
    if path.is_fork() {
        return reduce_fork(expr, path, other);
    }

    match (expr, path) {
        (expr, Path::Found) => Ok((expr, Path::Found, other)),
        (Expr::Negation(target), Path::Through(path)) => {
            Ok((*target, *path, Expr::negation(other)))
        },
        (Expr::Call { name, target }, Path::Through(path)) => match invert_call(&name, other) {
            Some(other) => Ok((*target, *path, other)),
            None => Err(Error::unspanned(NoInverse { name })),
        },
        (Expr::Binary { lhs, op, rhs }, Path::Branch { left: Some(path), right: None }) => {
            let rhs = *rhs;
            let other = match op {
                BinOpKind::Add => Expr::binary(other, BinOpKind::Sub, rhs),
                BinOpKind::Sub => Expr::binary(other, BinOpKind::Add, rhs),
                BinOpKind::Mul => Expr::binary(other, BinOpKind::Div, rhs),
                BinOpKind::Div => Expr::binary(other, BinOpKind::Mul, rhs),
                BinOpKind::Exp => Expr::root(other, rhs),
            };
            Ok((*lhs, *path, other))
        },
        (Expr::Binary { lhs, op, rhs }, Path::Branch { left: None, right: Some(path) }) => {
            let lhs = *lhs;
            let other = match op {
                BinOpKind::Add => Expr::binary(other, BinOpKind::Sub, lhs),
                BinOpKind::Sub => Expr::binary(lhs, BinOpKind::Sub, other),
                BinOpKind::Mul => Expr::binary(other, BinOpKind::Div, lhs),
                BinOpKind::Div => Expr::binary(lhs, BinOpKind::Div, other),
                BinOpKind::Exp => log_ratio(other, lhs),
            };
            Ok((*rhs, *path, other))
        },
        (Expr::Root { target, power }, Path::Branch { left: Some(path), right: None }) => {
            Ok((*target, *path, Expr::binary(other, BinOpKind::Exp, *power)))
        },
        (Expr::Root { target, power }, Path::Branch { left: None, right: Some(path) }) => {
            Ok((*power, *path, log_ratio(*target, other)))
        },
        _ => Err(Error::unspanned(IncompatiblePath)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Reduces `expr = other` once, isolating `x`.
    fn reduce(expr: &str, other: &str) -> Result<(String, String), Error> {
        let expr = expr.parse::<Expr>().unwrap();
        let path = expr.search_path(&Expr::variable("x")).unwrap();
        let (subject, new_path, other) = reduce_path(expr, path, other.parse().unwrap())?;
        assert_eq!(subject.search_path(&Expr::variable("x")), Some(new_path));
        Ok((subject.to_string(), other.to_string()))
    }

    fn pair(subject: &str, other: &str) -> (String, String) {
        (subject.to_string(), other.to_string())
    }

    #[test]
    fn binary_lhs() {
        assert_eq!(reduce("x+a", "c").unwrap(), pair("x", "c-a"));
        assert_eq!(reduce("x-a", "c").unwrap(), pair("x", "c+a"));
        assert_eq!(reduce("x*a", "c").unwrap(), pair("x", "c/a"));
        assert_eq!(reduce("x/a", "c").unwrap(), pair("x", "c*a"));
        assert_eq!(reduce("x^a", "c").unwrap(), pair("x", "root(a,c)"));
    }

    #[test]
    fn binary_rhs() {
        assert_eq!(reduce("a+x", "c").unwrap(), pair("x", "c-a"));
        assert_eq!(reduce("a-x", "c").unwrap(), pair("x", "a-c"));
        assert_eq!(reduce("a*x", "c").unwrap(), pair("x", "c/a"));
        assert_eq!(reduce("a/x", "c").unwrap(), pair("x", "a/c"));
        assert_eq!(reduce("a^x", "c").unwrap(), pair("x", "ln(c)/ln(a)"));
    }

    #[test]
    fn partial_reduction_keeps_the_path() {
        assert_eq!(reduce("2*(x+1)", "c").unwrap(), pair("x+1", "c/2"));
        assert_eq!(reduce("(x+1)^2 - y", "0").unwrap(), pair("(x+1)^2", "0+y"));
    }

    #[test]
    fn unary() {
        assert_eq!(reduce("-x", "c").unwrap(), pair("x", "-c"));
        assert_eq!(reduce("sqrt(x)", "c").unwrap(), pair("x", "c^2"));
        assert_eq!(reduce("log(x)", "c").unwrap(), pair("x", "10^c"));
        assert_eq!(reduce("sin(x)", "c").unwrap(), pair("x", "asin(c)"));
    }

    #[test]
    fn root() {
        assert_eq!(reduce("root(3, x)", "c").unwrap(), pair("x", "c^3"));
        assert_eq!(reduce("root(x, 8)", "c").unwrap(), pair("x", "ln(8)/ln(c)"));
    }

    #[test]
    fn sum_fork() {
        assert_eq!(reduce("x+x", "c").unwrap(), pair("x", "c/(1+1)"));
    }

    #[test]
    fn power_product_fork() {
        assert_eq!(reduce("(x-2)^3*(x-2)^5", "c").unwrap(), pair("x-2", "root(3+5,c)"));
    }

    #[test]
    fn unsupported_forks() {
        let err = reduce("x^x", "c").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnsupportedFork { operation: "^".to_string() }));

        let err = reduce("(x-2)^3*(x-1)^5", "c").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnsupportedFork { operation: "*".to_string() }));

        let err = reduce("x^2*x^x", "c").unwrap_err();
        assert!(err.is::<UnsupportedFork>());

        let err = reduce("root(x, x)", "c").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnsupportedFork { operation: "root".to_string() }));
    }

    #[test]
    fn no_inverse() {
        let expr = Expr::call("floor", Expr::variable("x"));
        let path = expr.search_path(&Expr::variable("x")).unwrap();
        let err = reduce_path(expr, path, Expr::Constant(1.0)).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&NoInverse { name: "floor".to_string() }));
    }

    #[test]
    fn incompatible_path() {
        let err = reduce_path(Expr::variable("x"), Path::Through(Box::new(Path::Found)), Expr::Constant(1.0))
            .unwrap_err();
        assert!(err.is::<IncompatiblePath>());
    }
}
