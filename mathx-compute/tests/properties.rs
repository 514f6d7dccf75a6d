use assert_float_eq::assert_float_absolute_eq;
use mathx_compute::{
    numerical::{evaluate_formula, Ctxt, Eval},
    solver::{solve_str, SolveOptions},
    symbolic::{is_equivalent, simplify},
};
use mathx_parser::{
    parser::error::{CannotReduce, MissingCallParen, SuperfluousMinus},
    Expr,
    Parser,
};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Expr {
    Parser::new(source).parse_expr().unwrap()
}

/// Solves the equation and returns the numeric value of `x`.
fn solve_x(source: &str) -> f64 {
    let solutions = solve_str(source, &SolveOptions::default()).unwrap();
    let solution = solutions.get("x").unwrap().as_ref().unwrap();
    solution.evaluate(&Ctxt::new()).unwrap()
}

#[test]
fn both_modes_agree() {
    let ctxt = Ctxt::new().with_var("x", 1.5).with_var("y", -0.25).with_var("α", 3.0);
    let formulas = [
        "x + y*α",
        "-x^2 - -(y)",
        "root(α, x + 2) / sqrt(x)",
        "exp(y) * ln(x) - log(α) + sin(x)^2 + cos(x)^2",
        "atan(y) + asinh(x) + tanh(α) - cosh(y)",
        "(x - y)^(α - 1) / -(2)",
    ];

    for formula in formulas {
        let tree = parse(formula).eval(&ctxt).unwrap();
        let immediate = evaluate_formula(formula, &ctxt).unwrap();
        assert_eq!(tree, immediate, "{}", formula);
    }
}

#[test]
fn arithmetic() {
    let ctxt = Ctxt::new();
    assert_eq!(evaluate_formula("2+3*4", &ctxt).unwrap(), 14.0);
    assert_eq!(evaluate_formula("(2+3)*4", &ctxt).unwrap(), 20.0);
    assert_eq!(evaluate_formula("2*3+4", &ctxt).unwrap(), 10.0);
    assert_eq!(evaluate_formula("1+1+1", &ctxt).unwrap(), 3.0);
    assert_eq!(evaluate_formula("2^3^2", &ctxt).unwrap(), 512.0);
    assert_eq!(evaluate_formula("(2^3)^2", &ctxt).unwrap(), 64.0);
    assert_float_absolute_eq!(evaluate_formula("root(3,27)", &ctxt).unwrap(), 3.0);
    assert_float_absolute_eq!(evaluate_formula("log(100)", &ctxt).unwrap(), 2.0);
}

#[test]
fn binding() {
    let expr = parse("3+x");
    assert_eq!(expr.eval(&Ctxt::new().with_var("x", 4.0)).unwrap(), 7.0);
    assert!(expr.eval(&Ctxt::new()).is_err());
}

#[test]
fn simplify_is_idempotent() {
    for source in ["0+x", "1*x", "x^0", "x*0", "-(-x)", "-(2*x - y) + 0*z", "root(2, 0*x + 16)"] {
        let once = simplify(&parse(source));
        assert_eq!(simplify(&once), once, "{}", source);
        assert!(is_equivalent(&once, &parse(source)), "{}", source);
    }
}

#[test]
fn rendering_round_trip() {
    assert_eq!(parse("2+3*4").to_string(), "2+3*4");
    assert_eq!(parse("(2+3)*4").to_string(), "(2+3)*4");
}

#[test]
fn linear_combination() {
    assert_float_absolute_eq!(solve_x("3*x+5+x*4=0"), -0.714285714285714);
    assert_eq!(solve_x("x+5+x=0"), -2.5);
}

#[test]
fn power_product() {
    assert_eq!(solve_x("(x-2)^3*(x-2)^5=0"), 2.0);
}

#[test]
fn solutions_satisfy_their_equation() {
    let equations = [
        "3*x - 7 = 2",
        "2^(x+1) = 32",
        "sqrt(x) + 1 = 4",
        "10 / (x - 1) = 4",
        "root(3, x) = 2",
        "x/2 - 3 = x/4",
    ];

    for equation in equations {
        let x = solve_x(equation);
        let (lhs, rhs) = equation.split_once('=').unwrap();
        let ctxt = Ctxt::new().with_var("x", x);
        assert_float_absolute_eq!(
            evaluate_formula(lhs, &ctxt).unwrap(),
            evaluate_formula(rhs, &ctxt).unwrap(),
            1e-9
        );
    }
}

#[test]
fn malformed_input() {
    let parse_err = |source| Parser::new(source).parse_expr().unwrap_err();
    assert!(parse_err("1..2").is::<CannotReduce>());
    assert!(parse_err("sin 3").is::<MissingCallParen>());
    assert!(parse_err("--x").is::<SuperfluousMinus>());
}
