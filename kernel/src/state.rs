use crate::ast::Term;
use std::collections::HashMap;
use std::rc::Rc;

/// The mutable evaluation/proof context threaded through tactic execution.
///
/// Concretely a metavariable store: holes created during elaboration may be
/// resolved as a side effect of comparing terms. There is a single active
/// holder at any instant; callers either pass the state by value and take
/// the updated one back, or clone it as a snapshot and restore by dropping
/// the speculative copy. `PartialEq` is derived so a restored state can be
/// checked for exact equality with its snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalState {
    solutions: HashMap<usize, Rc<Term>>,
    next_meta: usize,
}

impl EvalState {
    pub fn new() -> Self {
        EvalState::default()
    }

    /// Allocate a fresh unsolved metavariable.
    pub fn fresh_meta(&mut self) -> Rc<Term> {
        let id = self.next_meta;
        self.next_meta += 1;
        Term::meta(id)
    }

    pub fn solution(&self, id: usize) -> Option<&Rc<Term>> {
        self.solutions.get(&id)
    }

    /// Record a solution for a hole. Solutions are meta-free by
    /// construction (`eq_term` only instantiates against meta-free terms),
    /// which keeps `resolve` loop-free.
    pub fn solve(&mut self, id: usize, value: Rc<Term>) {
        debug_assert!(!value.has_meta(), "meta solution must be meta-free");
        debug_assert!(!self.solutions.contains_key(&id), "meta solved twice");
        self.solutions.insert(id, value);
        if id >= self.next_meta {
            self.next_meta = id + 1;
        }
    }

    /// Chase solved metavariables at the root of a term.
    pub fn resolve(&self, term: &Rc<Term>) -> Rc<Term> {
        let mut current = term.clone();
        while let Term::Meta(id) = &*current {
            match self.solutions.get(id) {
                Some(solution) => current = solution.clone(),
                None => break,
            }
        }
        current
    }
}

/// State-aware strict structural equality.
///
/// Syntactic tree identity, not equality up to unfolding or reduction. The
/// single deviation from plain `==` is metavariable handling: a solved hole
/// compares as its solution, and an unsolved hole compared against a
/// meta-free term is instantiated to it as a side effect on the state. A
/// failed comparison does NOT undo instantiations made before the point of
/// failure; undoing a rejected speculative comparison wholesale is the
/// rollback combinator's job.
pub fn eq_term(st: EvalState, lhs: &Rc<Term>, rhs: &Rc<Term>) -> (EvalState, bool) {
    let lhs = st.resolve(lhs);
    let rhs = st.resolve(rhs);
    match (&*lhs, &*rhs) {
        (Term::Meta(i), Term::Meta(j)) if i == j => (st, true),
        (Term::Meta(i), _) if !rhs.has_meta() => {
            let mut st = st;
            st.solve(*i, rhs.clone());
            (st, true)
        }
        (_, Term::Meta(j)) if !lhs.has_meta() => {
            let mut st = st;
            st.solve(*j, lhs.clone());
            (st, true)
        }
        (Term::Var(i), Term::Var(j)) => (st, i == j),
        (Term::Sort(a), Term::Sort(b)) => (st, a == b),
        (Term::Const(a), Term::Const(b)) => (st, a == b),
        (Term::App(f, xs), Term::App(g, ys)) => {
            if xs.len() != ys.len() {
                return (st, false);
            }
            let (st, heads_eq) = eq_term(st, f, g);
            if !heads_eq {
                return (st, false);
            }
            eq_terms(st, xs, ys)
        }
        (Term::Lam(n1, ty1, b1), Term::Lam(n2, ty2, b2)) => {
            if n1 != n2 {
                return (st, false);
            }
            let (st, tys_eq) = eq_term(st, ty1, ty2);
            if !tys_eq {
                return (st, false);
            }
            eq_term(st, b1, b2)
        }
        (Term::Fix(ks1, j1, cs1), Term::Fix(ks2, j2, cs2)) => {
            if ks1 != ks2 || j1 != j2 || cs1.len() != cs2.len() {
                return (st, false);
            }
            let mut st = st;
            for (c1, c2) in cs1.iter().zip(cs2) {
                if c1.name != c2.name {
                    return (st, false);
                }
                let (next, tys_eq) = eq_term(st, &c1.ty, &c2.ty);
                st = next;
                if !tys_eq {
                    return (st, false);
                }
                let (next, bodies_eq) = eq_term(st, &c1.body, &c2.body);
                st = next;
                if !bodies_eq {
                    return (st, false);
                }
            }
            (st, true)
        }
        _ => (st, false),
    }
}

fn eq_terms(st: EvalState, xs: &[Rc<Term>], ys: &[Rc<Term>]) -> (EvalState, bool) {
    let mut st = st;
    for (x, y) in xs.iter().zip(ys) {
        let (next, equal) = eq_term(st, x, y);
        st = next;
        if !equal {
            return (st, false);
        }
    }
    (st, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_compare_structurally() {
        let st = EvalState::new();
        let (st, equal) = eq_term(st, &Term::constant("n"), &Term::constant("n"));
        assert!(equal);
        let (_, equal) = eq_term(st, &Term::constant("n"), &Term::constant("m"));
        assert!(!equal);
    }

    #[test]
    fn no_unfolding_during_comparison() {
        // eq_term is syntactic: distinct constants stay distinct even when
        // a definition would equate them.
        let st = EvalState::new();
        let (_, equal) = eq_term(st, &Term::constant("two"), &Term::constant("succ_one"));
        assert!(!equal);
    }

    #[test]
    fn unsolved_meta_is_instantiated() {
        let mut st = EvalState::new();
        let hole = st.fresh_meta();
        let n = Term::constant("n");
        let (st, equal) = eq_term(st, &hole, &n);
        assert!(equal);
        assert_eq!(st.solution(0), Some(&n));
        // and the solution now participates in comparisons
        let (_, equal) = eq_term(st, &hole, &Term::constant("m"));
        assert!(!equal);
    }

    #[test]
    fn failed_comparison_can_leave_instantiations_behind() {
        // (f _0 a) vs (f n b): the hole is solved before the mismatch on
        // the second argument is discovered. This leak is exactly what the
        // tactic layer's rollback combinator exists to contain.
        let mut st = EvalState::new();
        let hole = st.fresh_meta();
        let lhs = Term::app(Term::constant("f"), vec![hole, Term::constant("a")]);
        let rhs = Term::app(
            Term::constant("f"),
            vec![Term::constant("n"), Term::constant("b")],
        );
        let (st, equal) = eq_term(st, &lhs, &rhs);
        assert!(!equal);
        assert_eq!(st.solution(0), Some(&Term::constant("n")));
    }

    #[test]
    fn snapshot_restore_is_exact() {
        let mut st = EvalState::new();
        let hole = st.fresh_meta();
        let snapshot = st.clone();
        let (mutated, _) = eq_term(st, &hole, &Term::constant("n"));
        assert_ne!(mutated, snapshot);
        // restoring = dropping the mutated copy and resuming from the snapshot
        assert_eq!(snapshot.solution(0), None);
    }
}
