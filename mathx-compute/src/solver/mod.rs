//! Solving single equations by isolating each free variable.
//!
//! An equation `lhs = rhs` is first turned into the equivalent `lhs - rhs = 0`. To isolate a
//! variable, the solver finds the [`Path`] from the root of `lhs - rhs` to the variable, then
//! repeatedly peels the root operation off the left side and applies its inverse to the right
//! side (see [`reduce_path`]), simplifying the right side after every step, until only the
//! variable is left.
//!
//! Each variable is isolated independently, on its own copy of the equation; failing to isolate
//! one variable does not prevent the others from being solved.
//!
//! ```
//! use mathx_compute::solver::{solve_str, SolveOptions};
//!
//! let solutions = solve_str("x + 5 + x = 0", &SolveOptions::default()).unwrap();
//! let x = solutions.get("x").unwrap().as_ref().unwrap();
//! assert_eq!(x.value.to_string(), "-2.5");
//! ```

pub mod error;
mod inverse;
mod linear;
mod reduce;

use mathx_parser::{
    parser::{ast::Path, equation::Equation},
    Expr,
};
use crate::{
    numerical::{ctxt::Ctxt, eval::Eval},
    symbolic::simplify,
};
use error::{Error, MissingVariable};
use rayon::prelude::*;
use tracing::{debug, warn};

pub use inverse::invert_call;
pub use reduce::reduce_path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Solve for the variables in parallel.
    pub parallel: bool,

    /// Record the equation after every reduction in [`Solution::steps`].
    pub record_steps: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            record_steps: false,
        }
    }
}

/// The equation `subject = other` after one reduction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveStep {
    /// The side of the equation that contains the variable.
    pub subject: Expr,

    /// The other side of the equation, simplified.
    pub other: Expr,
}

/// The value of a variable that makes an equation hold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The name of the variable.
    pub variable: String,

    /// The value of the variable, in terms of the other variables of the equation, if any.
    pub value: Expr,

    /// The steps taken to isolate the variable, if they were recorded.
    pub steps: Vec<SolveStep>,
}

impl Solution {
    /// Evaluates the value of the variable, using the given values for the other variables.
    pub fn evaluate(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        self.value.eval(ctxt)
    }
}

/// The results of solving an equation for each of its free variables.
#[derive(Debug)]
pub struct Solutions {
    /// The equation that was solved.
    pub equation: Equation,

    /// The result for each free variable, in the order the variables first appear in the
    /// equation.
    pub results: Vec<(String, Result<Solution, Error>)>,
}

impl Solutions {
    /// Returns the result for the given variable, if it occurs in the equation.
    pub fn get(&self, variable: &str) -> Option<&Result<Solution, Error>> {
        self.results.iter()
            .find(|(name, _)| name == variable)
            .map(|(_, result)| result)
    }
}

/// Isolates `variable` in the equation `diff = 0`.
pub fn solve_for(diff: &Expr, variable: &str, record_steps: bool) -> Result<Solution, Error> {
    let target = Expr::variable(variable);
    let mut path = diff.search_path(&target).ok_or_else(|| {
        Error::unspanned(MissingVariable { variable: variable.to_string() })
    })?;
    let mut subject = diff.clone();
    let mut other = Expr::Constant(0.0);
    let mut steps = Vec::new();

    while !matches!(path, Path::Found) {
        let (new_subject, new_path, new_other) = reduce_path(subject, path, other)?;
        subject = new_subject;
        path = new_path;
        other = simplify(&new_other);

        debug!(target: "mathx::solver", %variable, %subject, %other, "reduced");
        if record_steps {
            steps.push(SolveStep { subject: subject.clone(), other: other.clone() });
        }
    }

    Ok(Solution {
        variable: variable.to_string(),
        value: other,
        steps,
    })
}

/// Solves the equation for each of its free variables.
pub fn solve(equation: &Equation, options: &SolveOptions) -> Solutions {
    let diff = equation.difference();
    let variables = diff.free_variables();

    let solve_one = |variable: &String| {
        let result = solve_for(&diff, variable, options.record_steps);
        if let Err(err) = &result {
            warn!(target: "mathx::solver", %variable, error = ?err.kind, "cannot isolate variable");
        }
        (variable.clone(), result)
    };

    let results: Vec<_> = if options.parallel {
        variables.par_iter().map(solve_one).collect()
    } else {
        variables.iter().map(solve_one).collect()
    };

    Solutions {
        equation: equation.clone(),
        results,
    }
}

/// Parses and solves the equation.
pub fn solve_str(source: &str, options: &SolveOptions) -> Result<Solutions, Error> {
    let equation = Equation::parse(source)?;
    Ok(solve(&equation, options))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use crate::numerical::error::Overflow;
    use super::*;

    fn solve_x(source: &str) -> Result<Solution, Error> {
        let equation = Equation::parse(source).unwrap();
        solve_for(&equation.difference(), "x", true)
    }

    #[test]
    fn single_occurrence() {
        let solution = solve_x("2*x + 1 = 7").unwrap();
        assert_eq!(solution.value, Expr::Constant(3.0));
        assert_eq!(solution.steps.last().map(|step| &step.subject), Some(&Expr::variable("x")));
    }

    #[test]
    fn steps() {
        let solution = solve_x("sqrt(x) = 3").unwrap();
        let steps = solution.steps.iter()
            .map(|step| format!("{} = {}", step.subject, step.other))
            .collect::<Vec<_>>();
        assert_eq!(steps, vec!["sqrt(x) = 3", "x = 9"]);
    }

    #[test]
    fn symbolic_value() {
        let solution = solve_x("a*x = b").unwrap();
        assert_eq!(solution.value.to_string(), "b/a");
        assert_eq!(solution.evaluate(&Ctxt::new().with_var("a", 4.0).with_var("b", 2.0)).unwrap(), 0.5);
    }

    #[test]
    fn transcendental() {
        let solution = solve_x("2^x = 8").unwrap();
        assert_float_absolute_eq!(solution.evaluate(&Ctxt::new()).unwrap(), 3.0);

        let solution = solve_x("ln(x + 1) = 0").unwrap();
        assert_eq!(solution.value, Expr::Constant(0.0));
    }

    #[test]
    fn missing_variable() {
        let err = solve_x("y = 2").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&MissingVariable { variable: "x".to_string() }));
    }

    #[test]
    fn overflowing_value_stays_symbolic() {
        let solution = solve_x("x = 10^400").unwrap();
        assert_eq!(solution.value.to_string(), "10^400");
        assert_eq!(solution.value.free_variables(), Vec::<String>::new());
        assert!(solution.evaluate(&Ctxt::new()).unwrap_err().is::<Overflow>());
    }

    #[test]
    fn each_variable_independently() {
        for parallel in [false, true] {
            let options = SolveOptions { parallel, record_steps: false };
            let solutions = solve_str("x*x + y = 4", &options).unwrap();

            let names = solutions.results.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
            assert_eq!(names, vec!["x", "y"]);
            assert!(solutions.get("x").unwrap().is_err());
            assert_eq!(solutions.get("y").unwrap().as_ref().unwrap().value.to_string(), "4-x*x");
            assert!(solutions.get("z").is_none());
        }
    }
}
