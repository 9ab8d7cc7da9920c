//! Definition resolution and recursive-argument extraction.

use crate::error::TacticError;
use kernel::ast::Term;
use kernel::env::{Binding, Env, UnfoldResult};
use std::rc::Rc;

/// Upper bound on delta-unfoldings during one recursive-argument walk.
/// Well-formed globals never come close; the bound turns an unfolding
/// cycle into a `NotAFixedPoint` failure instead of a hang.
const MAX_UNFOLD_DEPTH: usize = 64;

/// Unfold a reference to a global definition to its defining value.
pub fn resolve(env: &Env, term: &Rc<Term>) -> Result<Rc<Term>, TacticError> {
    match &**term {
        Term::Const(name) => match env.globals().unfold(name) {
            UnfoldResult::Value(value) => Ok(value),
            UnfoldResult::Opaque | UnfoldResult::Unknown => {
                Err(TacticError::OpaqueConstant(name.clone()))
            }
        },
        _ => Err(TacticError::NotAReference),
    }
}

/// Which argument position does this function's fixpoint decrease on?
///
/// Walks the defining expression: a fixpoint answers directly from its
/// decreasing indices; each explicit outer lambda consumes one argument
/// position before the fixpoint is reached; references are unfolded in
/// place. Anything else cannot be the definition of a structurally
/// recursive function.
pub fn recursive_argument(env: &Env, term: &Rc<Term>) -> Result<usize, TacticError> {
    rec_arg_walk(env, term, MAX_UNFOLD_DEPTH)
}

fn rec_arg_walk(env: &Env, term: &Rc<Term>, fuel: usize) -> Result<usize, TacticError> {
    match &**term {
        Term::Fix(rec_args, component, _) => rec_args
            .get(*component)
            .copied()
            .ok_or(TacticError::NotAFixedPoint),
        Term::Lam(binder, ty, body) => {
            let inner = env.push_local(Binding::new(binder.clone(), ty.clone()));
            Ok(rec_arg_walk(&inner, body, fuel)? + 1)
        }
        Term::Const(_) => {
            if fuel == 0 {
                return Err(TacticError::NotAFixedPoint);
            }
            let value = resolve(env, term)?;
            rec_arg_walk(env, &value, fuel - 1)
        }
        _ => Err(TacticError::NotAFixedPoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::ast::Level;
    use kernel::env::{Definition, Globals};
    use kernel::parser;

    fn env_with(defs: Vec<Definition>) -> Env {
        let mut globals = Globals::new();
        for def in defs {
            globals.add_definition(def);
        }
        Env::new(Rc::new(globals))
    }

    fn nat() -> Rc<Term> {
        Term::constant("Nat")
    }

    #[test]
    fn fixpoint_answers_its_own_decreasing_index() {
        let fix = Term::fix1(2, "f", nat(), Term::var(0));
        assert_eq!(recursive_argument(&Env::empty(), &fix), Ok(2));
    }

    #[test]
    fn each_outer_lambda_shifts_the_index_by_one() {
        let fix = Term::fix1(0, "f", nat(), Term::var(0));
        let wrapped = Term::lam("a", nat(), Term::lam("b", nat(), fix));
        assert_eq!(recursive_argument(&Env::empty(), &wrapped), Ok(2));
    }

    #[test]
    fn references_unfold_to_the_same_answer_as_inlining() {
        let fix = Term::lam("a", nat(), Term::fix1(1, "f", nat(), Term::var(0)));
        let env = env_with(vec![Definition::transparent("g", nat(), fix.clone())]);
        let by_reference = recursive_argument(&env, &Term::constant("g"));
        let by_inlining = recursive_argument(&env, &fix);
        assert_eq!(by_reference, Ok(2));
        assert_eq!(by_reference, by_inlining);
    }

    #[test]
    fn mutual_fix_answers_for_the_selected_component() {
        let t = parser::term("(mfix 1 (0 even Nat zero) (3 odd Nat one))").expect("parse failed");
        assert_eq!(recursive_argument(&Env::empty(), &t), Ok(3));
    }

    #[test]
    fn opaque_constants_are_a_hard_error() {
        let env = env_with(vec![Definition::opaque("g", nat(), Term::var(0))]);
        assert_eq!(
            resolve(&env, &Term::constant("g")),
            Err(TacticError::OpaqueConstant("g".to_string()))
        );
        // axioms and unknown names refuse to unfold the same way
        let env = env_with(vec![Definition::axiom("ax", nat())]);
        assert!(matches!(
            resolve(&env, &Term::constant("ax")),
            Err(TacticError::OpaqueConstant(_))
        ));
        assert!(matches!(
            resolve(&env, &Term::constant("missing")),
            Err(TacticError::OpaqueConstant(_))
        ));
    }

    #[test]
    fn non_references_are_a_hard_error() {
        let env = Env::empty();
        assert_eq!(
            resolve(&env, &Term::sort(Level::Zero)),
            Err(TacticError::NotAReference)
        );
    }

    #[test]
    fn non_fixpoints_are_a_hard_error() {
        let env = env_with(vec![Definition::transparent("g", nat(), Term::var(3))]);
        assert_eq!(
            recursive_argument(&env, &Term::constant("g")),
            Err(TacticError::NotAFixedPoint)
        );
    }

    #[test]
    fn unfolding_cycles_fail_instead_of_looping() {
        let env = env_with(vec![
            Definition::transparent("a", nat(), Term::constant("b")),
            Definition::transparent("b", nat(), Term::constant("a")),
        ]);
        assert_eq!(
            recursive_argument(&env, &Term::constant("a")),
            Err(TacticError::NotAFixedPoint)
        );
    }

    #[test]
    fn the_walk_extends_the_environment_under_binders() {
        // the lambda's binder is visible while the body is examined: a
        // body that is just the bound variable is still not a fixpoint,
        // but the walk must get that far without touching the globals
        let lam = Term::lam("x", nat(), Term::var(0));
        assert_eq!(
            recursive_argument(&Env::empty(), &lam),
            Err(TacticError::NotAFixedPoint)
        );
    }
}
