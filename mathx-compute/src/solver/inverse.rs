use mathx_parser::{
    parser::{builtin::Builtin, token::op::BinOpKind},
    Expr,
};

/// Applies the inverse of the named function to `value`, or returns [`None`] if the function has
/// no inverse.
///
/// The inverses only hold on the principal branch: `sin(x) = v` is solved as `x = asin(v)`, not as
/// every `x` whose sine is `v`.
pub fn invert_call(name: &str, value: Expr) -> Option<Expr> {
    let inverse = match Builtin::from_name(name)? {
        Builtin::Sqrt => return Some(Expr::binary(value, BinOpKind::Exp, Expr::Constant(2.0))),
        Builtin::Log => return Some(Expr::binary(Expr::Constant(10.0), BinOpKind::Exp, value)),
        Builtin::Exp => Builtin::Ln,
        Builtin::Ln => Builtin::Exp,
        Builtin::Sin => Builtin::Asin,
        Builtin::Cos => Builtin::Acos,
        Builtin::Tan => Builtin::Atan,
        Builtin::Asin => Builtin::Sin,
        Builtin::Acos => Builtin::Cos,
        Builtin::Atan => Builtin::Tan,
        Builtin::Sinh => Builtin::Asinh,
        Builtin::Cosh => Builtin::Acosh,
        Builtin::Tanh => Builtin::Atanh,
        Builtin::Asinh => Builtin::Sinh,
        Builtin::Acosh => Builtin::Cosh,
        Builtin::Atanh => Builtin::Tanh,
        Builtin::Root => return None,
    };
    Some(Expr::builtin(inverse, value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn invert(name: &str) -> Option<String> {
        invert_call(name, Expr::variable("v")).map(|expr| expr.to_string())
    }

    #[test]
    fn inverses() {
        assert_eq!(invert("sqrt").as_deref(), Some("v^2"));
        assert_eq!(invert("log").as_deref(), Some("10^v"));
        assert_eq!(invert("exp").as_deref(), Some("ln(v)"));
        assert_eq!(invert("ln").as_deref(), Some("exp(v)"));
        assert_eq!(invert("cosh").as_deref(), Some("acosh(v)"));
        assert_eq!(invert("atan").as_deref(), Some("tan(v)"));
    }

    #[test]
    fn no_inverse() {
        assert_eq!(invert("root"), None);
        assert_eq!(invert("floor"), None);
    }

    #[test]
    fn every_inverse_is_a_builtin() {
        for builtin in Builtin::ALL {
            if let Some(Expr::Call { name, .. }) = invert_call(builtin.name(), Expr::Constant(0.0)) {
                assert!(Builtin::from_name(&name).is_some(), "{}", name);
            }
        }
    }
}
