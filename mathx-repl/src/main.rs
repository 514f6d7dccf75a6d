mod error;

use error::{report_to_stderr, Error, ExpectedSwitch, InvalidBinding, ReservedName, UnknownCommand};
use mathx_compute::{
    numerical::{Ctxt, Immediate},
    solver::{solve, Solution, SolveOptions},
    symbolic::simplify,
};
use mathx_parser::{
    parser::{builtin::Builtin, error::UnknownVariable, fmt::Latex},
    tokenizer::{tokenize_complete, Token, TokenKind},
    Equation,
    Parser,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// What a line of input asks the REPL to do.
#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    /// Nothing but whitespace.
    Empty,

    /// `:name arg...`
    Command {
        name: Token<'a>,
        arg: Vec<Token<'a>>,
    },

    /// `let target = value`
    Bind {
        target: Token<'a>,
        value: Vec<Token<'a>>,
    },

    /// An equation, to be solved for each of its variables.
    Solve,

    /// A formula, to be evaluated.
    Evaluate,
}

/// Returns true if the token can start an operand, meaning a `let` before it is a keyword and not
/// a variable.
fn starts_operand(token: &Token) -> bool {
    !matches!(
        token.kind,
        TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Mul
            | TokenKind::Div
            | TokenKind::Exp
            | TokenKind::Assign
            | TokenKind::Comma
            | TokenKind::CloseParen
    )
}

/// Splits the tokens after `let` into the target and the value of the binding.
fn classify_binding<'a>(rest: &[Token<'a>]) -> Result<Line<'a>, Error> {
    let target = &rest[0];
    let followed_by_assign = rest.get(1).is_some_and(|token| token.kind == TokenKind::Assign);

    if target.kind != TokenKind::Name || !followed_by_assign {
        let end = rest.iter()
            .take_while(|token| token.kind != TokenKind::Assign)
            .last()
            .map_or(target.span.end, |token| token.span.end);
        return Err(Error::new(vec![target.span.start..end], InvalidBinding));
    }

    if Builtin::from_name(target.lexeme).is_some() {
        return Err(Error::new(vec![target.span.clone()], ReservedName {
            name: target.lexeme.to_string(),
        }));
    }

    Ok(Line::Bind {
        target: target.clone(),
        value: rest[2..].to_vec(),
    })
}

/// Determines what the line of input asks for.
fn classify(input: &str) -> Result<Line<'_>, Error> {
    let tokens = tokenize_complete(input)
        .into_vec()
        .into_iter()
        .filter(|token| !token.is_whitespace())
        .collect::<Vec<_>>();
    let Some(first) = tokens.first() else {
        return Ok(Line::Empty);
    };

    match first.kind {
        TokenKind::Symbol if first.lexeme == ":" => {
            let Some(name) = tokens.get(1).filter(|token| token.kind == TokenKind::Name) else {
                return Err(Error::new(vec![first.span.clone()], UnknownCommand {
                    name: String::new(),
                }));
            };
            Ok(Line::Command {
                name: name.clone(),
                arg: tokens[2..].to_vec(),
            })
        },
        TokenKind::Name if first.lexeme == "let" && tokens.get(1).is_some_and(starts_operand) => {
            classify_binding(&tokens[1..])
        },
        _ if tokens.iter().any(|token| token.kind == TokenKind::Assign) => Ok(Line::Solve),
        _ => Ok(Line::Evaluate),
    }
}

/// Parses the argument of an `on` / `off` command.
fn switch(name: &Token, arg: &[Token]) -> Result<bool, Error> {
    match arg {
        [token] if token.lexeme == "on" => Ok(true),
        [token] if token.lexeme == "off" => Ok(false),
        [first, .., last] => Err(Error::new(vec![first.span.start..last.span.end], ExpectedSwitch)),
        [token] => Err(Error::new(vec![token.span.clone()], ExpectedSwitch)),
        [] => Err(Error::new(vec![name.span.clone()], ExpectedSwitch)),
    }
}

/// Something a line of input produced.
#[derive(Debug)]
enum Output {
    /// A line of text for stdout.
    Text(String),

    /// The equation could not be solved for this variable.
    Failure(String, Error),
}

impl Output {
    /// Prints the output, returning false if it is a failure.
    fn print(self, input: &str) -> bool {
        match self {
            Self::Text(text) => {
                println!("{}", text);
                true
            },
            Self::Failure(variable, err) => {
                eprintln!("cannot solve for `{}`:", variable);
                report_to_stderr(err, input);
                false
            },
        }
    }
}

/// The state kept between lines of input.
#[derive(Debug, Default)]
struct Repl {
    /// Variables bound with `let`.
    ctxt: Ctxt,

    /// Options used to solve equations.
    options: SolveOptions,
}

impl Repl {
    /// Runs one line of input, printing its output and reporting errors. Returns false if
    /// anything failed.
    fn run_line(&mut self, input: &str) -> bool {
        match self.execute(input) {
            Ok(outputs) => outputs.into_iter()
                .fold(true, |ok, output| output.print(input) && ok),
            Err(err) => {
                report_to_stderr(err, input);
                false
            },
        }
    }

    /// Runs one line of input, returning what it produced.
    fn execute(&mut self, input: &str) -> Result<Vec<Output>, Error> {
        match classify(input)? {
            Line::Empty => Ok(Vec::new()),
            Line::Command { name, arg } => self.command(&name, arg, input.len()),
            Line::Bind { target, value } => {
                let value = Parser::from_tokens(value, input.len())
                    .parse_with(&Immediate::new(&self.ctxt))?;
                debug!(target: "mathx::repl", variable = target.lexeme, value, "bound variable");
                self.ctxt.add_var(target.lexeme, value);
                Ok(Vec::new())
            },
            Line::Solve => self.solve_equation(input),
            Line::Evaluate => self.evaluate(input).map(|text| vec![Output::Text(text)]),
        }
    }

    /// Evaluates the formula, or simplifies it if it uses variables that are not bound.
    fn evaluate(&self, input: &str) -> Result<String, Error> {
        match Parser::new(input).parse_with(&Immediate::new(&self.ctxt)) {
            Ok(value) => Ok(value.to_string()),
            Err(err) if err.is::<UnknownVariable>() => {
                let expr = Parser::new(input).parse_expr()?;
                let simplified = simplify(&expr);
                debug!(target: "mathx::repl", %expr, %simplified, "formula has unbound variables");
                Ok(simplified.to_string())
            },
            Err(err) => Err(err),
        }
    }

    /// Solves the equation for each of its variables.
    fn solve_equation(&self, input: &str) -> Result<Vec<Output>, Error> {
        let equation = Equation::parse(input)?;
        let solutions = solve(&equation, &self.options);

        let mut outputs = Vec::new();
        for (variable, result) in solutions.results {
            match result {
                Ok(solution) => {
                    outputs.extend(solution.steps.iter()
                        .map(|step| Output::Text(format!("  {} = {}", step.subject, step.other))));
                    outputs.push(self.describe(solution));
                },
                Err(err) => outputs.push(Output::Failure(variable, err)),
            }
        }
        Ok(outputs)
    }

    /// Formats the solution, followed by its numeric value if every variable it uses is bound.
    fn describe(&self, solution: Solution) -> Output {
        let text = format!("{} = {}", solution.variable, solution.value);
        let computable = solution.value.as_constant().is_none()
            && solution.value.free_variables()
                .iter()
                .all(|name| self.ctxt.get_var(name).is_some());
        if !computable {
            return Output::Text(text);
        }

        match solution.evaluate(&self.ctxt) {
            Ok(value) => Output::Text(format!("{} = {}", text, value)),
            Err(err) => Output::Failure(solution.variable, err),
        }
    }

    /// Runs a `:name arg` command.
    fn command(&mut self, name: &Token, arg: Vec<Token>, end: usize) -> Result<Vec<Output>, Error> {
        match name.lexeme {
            "vars" => {
                let mut vars = self.ctxt.get_vars().iter().collect::<Vec<_>>();
                vars.sort_by(|(a, _), (b, _)| a.cmp(b));
                Ok(vars.into_iter()
                    .map(|(name, value)| Output::Text(format!("{} = {}", name, value)))
                    .collect())
            },
            "steps" => {
                self.options.record_steps = switch(name, &arg)?;
                Ok(Vec::new())
            },
            "parallel" => {
                self.options.parallel = switch(name, &arg)?;
                Ok(Vec::new())
            },
            "latex" => {
                let expr = Parser::from_tokens(arg, end).parse_expr()?;
                Ok(vec![Output::Text(expr.as_display().to_string())])
            },
            other => Err(Error::new(vec![name.span.clone()], UnknownCommand {
                name: other.to_string(),
            })),
        }
    }
}

/// Installs the `tracing` subscriber, filtered by the `MATHX_LOG` environment variable.
fn init_logging() {
    let filter = EnvFilter::try_from_env("MATHX_LOG")
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs every line of the source, returning a failure if any line failed.
fn run_source(source: &str, repl: &mut Repl) -> ExitCode {
    let ok = source.lines().fold(true, |ok, line| repl.run_line(line) && ok);
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs the interactive session until end of input.
fn run_interactive(repl: &mut Repl) -> ExitCode {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, repl: &mut Repl) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        repl.run_line(&input);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, repl) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => ExitCode::SUCCESS,
                err => {
                    eprintln!("{}", err);
                    ExitCode::FAILURE
                },
            };
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let mut repl = Repl::default();
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        match fs::read_to_string(&filename) {
            Ok(source) => run_source(&source, &mut repl),
            Err(err) => {
                eprintln!("cannot read `{}`: {}", filename, err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut source = String::new();
        match io::stdin().read_to_string(&mut source) {
            Ok(_) => run_source(&source, &mut repl),
            Err(err) => {
                eprintln!("cannot read stdin: {}", err);
                ExitCode::FAILURE
            },
        }
    } else {
        run_interactive(&mut repl)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use mathx_compute::numerical::error::{DivisionByZero, Overflow};
    use mathx_compute::solver::error::UnsupportedFork;
    use mathx_parser::parser::error::{ChainedEquality, EmptyExpression};
    use super::*;

    /// Runs the line, expecting every output to be text.
    fn run(repl: &mut Repl, input: &str) -> Vec<String> {
        repl.execute(input)
            .unwrap()
            .into_iter()
            .map(|output| match output {
                Output::Text(text) => text,
                Output::Failure(variable, err) => panic!("cannot solve for {}: {:?}", variable, err),
            })
            .collect()
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify("   ").unwrap(), Line::Empty);
        assert_eq!(classify("1 + 2").unwrap(), Line::Evaluate);
        assert_eq!(classify("x = 2*y").unwrap(), Line::Solve);
        assert_eq!(classify("let + 1 = 3").unwrap(), Line::Solve);
        assert!(matches!(classify("let x = 2").unwrap(), Line::Bind { target, .. } if target.lexeme == "x"));
        assert!(matches!(classify(":vars").unwrap(), Line::Command { name, .. } if name.lexeme == "vars"));
    }

    #[test]
    fn invalid_bindings() {
        let err = classify("let 2*x = 4").unwrap_err();
        assert!(err.is::<InvalidBinding>());
        assert_eq!(err.spans, vec![4..7]);

        let err = classify("let sin = 4").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&ReservedName { name: "sin".to_string() }));
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn evaluate() {
        let mut repl = Repl::default();
        assert_eq!(run(&mut repl, "1 + 2*3"), vec!["7"]);
        assert_eq!(run(&mut repl, "2^-1"), vec!["0.5"]);
    }

    #[test]
    fn evaluate_error_has_span() {
        let mut repl = Repl::default();
        let err = repl.execute("1 + 1/0").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![4..7]);
    }

    #[test]
    fn unbound_variables_simplify() {
        let mut repl = Repl::default();
        assert_eq!(run(&mut repl, "0 + 1*x"), vec!["x"]);
        assert_eq!(run(&mut repl, "2*y^1 - 0"), vec!["2*y"]);
    }

    #[test]
    fn bind_then_evaluate() {
        let mut repl = Repl::default();
        assert_eq!(run(&mut repl, "let x = 2"), Vec::<String>::new());
        assert_eq!(run(&mut repl, "let y = x + 1"), Vec::<String>::new());
        assert_eq!(run(&mut repl, "x*y"), vec!["6"]);
        assert_eq!(run(&mut repl, ":vars"), vec!["x = 2", "y = 3"]);
    }

    #[test]
    fn bind_errors() {
        let mut repl = Repl::default();
        let err = repl.execute("let z = w").unwrap_err();
        assert!(err.is::<UnknownVariable>());
        assert_eq!(err.spans, vec![8..9]);

        let err = repl.execute("let z =").unwrap_err();
        assert!(err.is::<EmptyExpression>());
        assert!(repl.ctxt.get_var("z").is_none());
    }

    #[test]
    fn overflow_is_reported() {
        let mut repl = Repl::default();
        let err = repl.execute("let big = 10^400").unwrap_err();
        assert!(err.is::<Overflow>());
        assert_eq!(err.spans, vec![10..16]);
        assert!(repl.ctxt.get_var("big").is_none());

        assert_eq!(run(&mut repl, "10^400 + x"), vec!["10^400+x"]);
    }

    #[test]
    fn solve_each_variable() {
        let mut repl = Repl::default();
        assert_eq!(run(&mut repl, "3*x + 5 = 2*y"), vec!["x = (2*y-5)/3", "y = (3*x+5)/2"]);
    }

    #[test]
    fn solve_with_bound_variables() {
        let mut repl = Repl::default();
        run(&mut repl, "let y = 4");
        assert_eq!(run(&mut repl, "3*x + 5 = 2*y"), vec!["x = (2*y-5)/3 = 1", "y = (3*x+5)/2"]);
    }

    #[test]
    fn solve_reports_each_failure() {
        let mut repl = Repl::default();
        let outputs = repl.execute("x*x + y = 4").unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(matches!(&outputs[0], Output::Failure(variable, err) if variable == "x" && err.is::<UnsupportedFork>()));
        assert!(matches!(&outputs[1], Output::Text(text) if text == "y = 4-x*x"));
    }

    #[test]
    fn solve_steps() {
        let mut repl = Repl::default();
        run(&mut repl, ":steps on");
        assert_eq!(run(&mut repl, "sqrt(x) = 3"), vec!["  sqrt(x) = 3", "  x = 9", "x = 9"]);
    }

    #[test]
    fn latex_command() {
        let mut repl = Repl::default();
        assert_eq!(run(&mut repl, ":latex (x+1)/2"), vec!["\\frac{x+1}{2}"]);
    }

    #[test]
    fn command_errors() {
        let mut repl = Repl::default();
        let err = repl.execute(":frobnicate").unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnknownCommand { name: "frobnicate".to_string() }));
        assert_eq!(err.spans, vec![1..11]);

        let err = repl.execute(":steps maybe").unwrap_err();
        assert!(err.is::<ExpectedSwitch>());
        assert_eq!(err.spans, vec![7..12]);
    }

    #[test]
    fn chained_equation() {
        let mut repl = Repl::default();
        let err = repl.execute("x = 1 = 2").unwrap_err();
        assert!(err.is::<ChainedEquality>());
        assert_eq!(err.spans, vec![6..7]);
    }
}
