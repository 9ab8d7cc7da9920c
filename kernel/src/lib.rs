pub mod ast;
pub mod env;
pub mod parser;
pub mod state;

pub use ast::*;

#[cfg(test)]
mod tests {
    use crate::ast::Term;
    use crate::env::{Binding, Env, UnfoldResult};
    use crate::parser;
    use crate::state::{eq_term, EvalState};

    #[test]
    fn script_globals_feed_the_unfold_service() {
        let script = parser::script(
            "(axiom Nat (sort 1))
             (def pred (app arrow Nat Nat)
               (fix 0 pred (app arrow Nat Nat) (lam n Nat n)))",
        )
        .expect("parse failed");

        match script.globals.unfold("pred") {
            UnfoldResult::Value(value) => assert!(matches!(&*value, Term::Fix(_, _, _))),
            other => panic!("expected a transparent value, got {:?}", other),
        }
    }

    #[test]
    fn parsed_terms_compare_with_state_aware_equality() {
        let lhs = parser::term("(app f _0 b)").expect("parse failed");
        let rhs = parser::term("(app f a b)").expect("parse failed");
        let mut st = EvalState::new();
        let _hole = st.fresh_meta();
        let (st, equal) = eq_term(st, &lhs, &rhs);
        assert!(equal);
        assert_eq!(st.solution(0), Some(&Term::constant("a")));
    }

    #[test]
    fn environments_grow_under_parsed_lambdas() {
        let lam = parser::term("(lam x Nat (app f x))").expect("parse failed");
        let env = Env::empty();
        if let Term::Lam(binder, ty, _) = &*lam {
            let inner = env.push_local(Binding::new(binder.clone(), ty.clone()));
            assert_eq!(inner.depth(), 1);
            assert_eq!(env.depth(), 0);
        } else {
            panic!("expected a lambda");
        }
    }
}
