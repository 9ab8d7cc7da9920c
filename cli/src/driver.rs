use anyhow::{anyhow, Context, Result};
use ariadne::{Color, Label, Report, ReportKind, Source};
use kernel::ast::Term;
use kernel::env::Env;
use kernel::parser::{self, ParseError};
use kernel::state::EvalState;
use std::fs;
use std::rc::Rc;
use tactics::induct::{induct_on_call, CaseSplit, Goal};
use tactics::Step;

/// A case-split engine that reports the request instead of producing
/// subgoals; goal management stays with the host.
pub struct PrintingCaseSplit;

impl CaseSplit for PrintingCaseSplit {
    fn induct(
        &mut self,
        _goal: &Goal,
        st: EvalState,
        scrutinee: &Rc<Term>,
        generalize_deps: bool,
    ) -> Step<()> {
        if generalize_deps {
            println!("induction on {} (generalizing dependent hypotheses)", scrutinee);
        } else {
            println!("induction on {}", scrutinee);
        }
        Ok((st, ()))
    }
}

/// Render a parse error as a source-anchored report.
pub fn report_parse_error(filename: &str, source: &str, err: &ParseError) {
    let span = err.span(source.len());
    let _ = Report::build(ReportKind::Error, filename, span.start)
        .with_message(err.to_string())
        .with_label(
            Label::new((filename, span.start..span.end))
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .print((filename, Source::from(source)));
}

/// Run the tactic over a script source: definitions plus a goal. Returns
/// the argument the induction was requested on.
pub fn run_source(
    filename: &str,
    source: &str,
    target: &str,
    args: &[String],
    engine: &mut dyn CaseSplit,
) -> Result<Rc<Term>> {
    let script = match parser::script(source) {
        Ok(script) => script,
        Err(err) => {
            report_parse_error(filename, source, &err);
            return Err(anyhow!("failed to parse {}", filename));
        }
    };
    let concl = script
        .goal
        .ok_or_else(|| anyhow!("{} declares no (goal ...)", filename))?;
    let target_fn = parser::term(target)
        .map_err(|err| anyhow!("failed to parse --target '{}': {}", target, err))?;
    let target_args = args
        .iter()
        .map(|arg| {
            parser::term(arg).map_err(|err| anyhow!("failed to parse --arg '{}': {}", arg, err))
        })
        .collect::<Result<Vec<_>>>()?;

    let goal = Goal::new(Env::new(Rc::new(script.globals)), concl);
    let (_, scrutinee) = induct_on_call(
        EvalState::new(),
        &goal,
        &target_fn,
        &target_args,
        engine,
    )
    .map_err(|err| anyhow!("{}", err))?;
    Ok(scrutinee)
}

pub fn run_file(path: &str, target: &str, args: &[String]) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    run_source(path, &source, target, args, &mut PrintingCaseSplit)?;
    Ok(())
}
