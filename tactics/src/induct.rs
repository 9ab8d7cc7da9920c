//! The tactic driver: search the goal, then hand off to the induction
//! engine.

use crate::error::{Fail, Outcome, Step, TacticError};
use crate::search::search;
use kernel::ast::Term;
use kernel::env::Env;
use kernel::state::EvalState;
use std::rc::Rc;
use thiserror::Error;

/// The ambient goal context the tactic runs against.
#[derive(Debug, Clone)]
pub struct Goal {
    pub env: Env,
    pub concl: Rc<Term>,
}

impl Goal {
    pub fn new(env: Env, concl: Rc<Term>) -> Self {
        Goal { env, concl }
    }
}

/// The generalized induction/case-split primitive. How subgoals are
/// produced is the engine's business; the tactic only picks the scrutinee
/// and asks for dependent hypotheses to be generalized along with it.
pub trait CaseSplit {
    fn induct(
        &mut self,
        goal: &Goal,
        st: EvalState,
        scrutinee: &Rc<Term>,
        generalize_deps: bool,
    ) -> Step<()>;
}

/// The single user-visible failure of the tactic: either a fatal
/// resolution error or the search's final soft failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InductError {
    #[error(transparent)]
    Fatal(#[from] TacticError),
    #[error("{0}")]
    NoMatch(Fail),
}

/// Find an occurrence of `target_fn` applied to `target_args` in the
/// goal's conclusion and run a generalized induction on the argument its
/// fixpoint decreases on. No retry and no fallback: the search's own
/// backtracking is the only exploration performed.
pub fn induct_on_call(
    st: EvalState,
    goal: &Goal,
    target_fn: &Rc<Term>,
    target_args: &[Rc<Term>],
    engine: &mut dyn CaseSplit,
) -> Result<(EvalState, Rc<Term>), InductError> {
    let (st, outcome) = search(st, &goal.env, &goal.concl, target_fn, target_args)?;
    match outcome {
        Outcome::Found(scrutinee) => {
            let (st, ()) = engine.induct(goal, st, &scrutinee, true)?;
            Ok((st, scrutinee))
        }
        Outcome::NotFound(fail) => Err(InductError::NoMatch(fail)),
    }
}
