//! Backtracking occurrence search.
//!
//! Walks the conclusion's application tree looking for the target function
//! applied to exactly the given argument pattern. Candidate argument
//! comparisons run under branch-with-rollback, so a rejected candidate
//! leaves no trace in the evaluation state when its siblings are tried.

use crate::error::{Fail, Outcome, Step, TacticError};
use crate::resolve::recursive_argument;
use crate::thread::{branch, fold_left, forall2};
use kernel::ast::Term;
use kernel::env::Env;
use kernel::state::{eq_term, EvalState};
use std::rc::Rc;

/// Search `concl` for an occurrence of `target_fn` applied to
/// `target_args` and pick out the argument its fixpoint decreases on.
///
/// Subterms are tried strictly left to right and the first success wins;
/// later alternatives are not explored. Soft failures combine across
/// siblings; resolution errors abort the search outright.
pub fn search(
    st: EvalState,
    env: &Env,
    concl: &Rc<Term>,
    target_fn: &Rc<Term>,
    target_args: &[Rc<Term>],
) -> Step<Outcome> {
    let Term::App(head, args) = &**concl else {
        return Ok((st, Outcome::NotFound(Fail::NoApplicationHere)));
    };
    let (st, candidate) = match_candidate(st, env, head, args, target_fn, target_args)?;
    match candidate {
        Outcome::Found(_) => Ok((st, candidate)),
        // head or argument mismatch at this node: try the subterms
        Outcome::NotFound(_) => search_args(st, env, args, target_fn, target_args),
    }
}

/// Match a single application node against the target pattern, without
/// descending into subterms.
///
/// The head is compared by plain structural equality (no state, no
/// unfolding). On a full match the target's recursive-argument index `k`
/// is computed and the result is the occurrence's `k`-th argument.
pub fn match_candidate(
    st: EvalState,
    env: &Env,
    head: &Rc<Term>,
    args: &[Rc<Term>],
    target_fn: &Rc<Term>,
    target_args: &[Rc<Term>],
) -> Step<Outcome> {
    if **head != **target_fn {
        return Ok((st, Outcome::NotFound(Fail::NoOccurrence)));
    }
    if args.len() != target_args.len() {
        return Ok((st, Outcome::NotFound(Fail::ArityMismatch)));
    }
    branch(
        st,
        (),
        |st, _| forall2(st, target_args, args, |st, want, got| Ok(eq_term(st, want, got))),
        |st, _| {
            let k = recursive_argument(env, target_fn)?;
            let scrutinee = args.get(k).cloned().ok_or(TacticError::LengthMismatch)?;
            Ok((st, Outcome::Found(scrutinee)))
        },
        |st, _| Ok((st, Outcome::NotFound(Fail::NoOccurrence))),
    )
}

/// Try each argument subtree in order, keeping the first success. With no
/// alternatives at all the distinguished empty failure is returned; once
/// anything was tried and failed, the aggregate is `NoOccurrence`.
fn search_args(
    st: EvalState,
    env: &Env,
    args: &[Rc<Term>],
    target_fn: &Rc<Term>,
    target_args: &[Rc<Term>],
) -> Step<Outcome> {
    fold_left(
        st,
        Outcome::NotFound(Fail::NothingToSearch),
        args,
        |st, acc, arg| {
            if acc.is_found() {
                // first success wins; later siblings are not explored
                return Ok((st, acc));
            }
            let (st, sub) = search(st, env, arg, target_fn, target_args)?;
            match sub {
                Outcome::Found(_) => Ok((st, sub)),
                Outcome::NotFound(_) => Ok((st, Outcome::NotFound(Fail::NoOccurrence))),
            }
        },
    )
}
