use std::fmt;
use std::rc::Rc;

// =============================================================================
// Universe Levels
// =============================================================================

/// Universe levels. Identity is plain structural equality; nothing in the
/// tactic layer normalizes levels, so no reduction helpers live here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Zero,
    Succ(Box<Level>),
    Param(String),
}

impl Level {
    /// Build a concrete level from a numeral.
    pub fn of(n: usize) -> Level {
        let mut level = Level::Zero;
        for _ in 0..n {
            level = Level::Succ(Box::new(level));
        }
        level
    }

    /// Render a concrete level back as a numeral, if it has no parameters.
    pub fn as_numeral(&self) -> Option<usize> {
        let mut current = self;
        let mut n = 0;
        loop {
            match current {
                Level::Zero => return Some(n),
                Level::Succ(inner) => {
                    n += 1;
                    current = inner;
                }
                Level::Param(_) => return None,
            }
        }
    }
}

// =============================================================================
// Terms
// =============================================================================

/// One component of a (possibly mutual) fixpoint block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixComponent {
    pub name: String,
    pub ty: Rc<Term>,
    pub body: Rc<Term>,
}

/// The core terms of the calculus, using de Bruijn indices.
///
/// Terms are immutable values shared through `Rc`; every operation that
/// "changes" a term builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Bound variable (de Bruijn index, 0 = innermost)
    Var(usize),
    /// Universe
    Sort(Level),
    /// Constant (named global definition, possibly unfoldable)
    Const(String),
    /// n-ary application: (f a b c). The argument list is never empty and
    /// the head is never itself an application; `Term::app` maintains both.
    App(Rc<Term>, Vec<Rc<Term>>),
    /// Lambda abstraction: \x:A. b. The binder name is carried for
    /// environment extension and printing.
    Lam(String, Rc<Term>, Rc<Term>),
    /// Fixpoint block: rec_args[i] is the argument position the i-th
    /// component structurally decreases on; `component` selects which
    /// mutual definition this term denotes.
    Fix(Vec<usize>, usize, Vec<FixComponent>),
    /// Metavariable (hole) owned by the evaluation state
    Meta(usize),
}

// Helper constructors for convenience
impl Term {
    pub fn var(n: usize) -> Rc<Self> {
        Rc::new(Term::Var(n))
    }

    pub fn sort(l: Level) -> Rc<Self> {
        Rc::new(Term::Sort(l))
    }

    pub fn constant(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Term::Const(name.into()))
    }

    /// Apply `head` to `args`, keeping applications in spine form: an empty
    /// argument list is the head itself, and applying an application merges
    /// the argument lists instead of nesting.
    pub fn app(head: Rc<Term>, args: Vec<Rc<Term>>) -> Rc<Self> {
        if args.is_empty() {
            return head;
        }
        match &*head {
            Term::App(inner, first) => {
                let mut merged = first.clone();
                merged.extend(args);
                Rc::new(Term::App(inner.clone(), merged))
            }
            _ => Rc::new(Term::App(head, args)),
        }
    }

    pub fn lam(binder: impl Into<String>, ty: Rc<Term>, body: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Lam(binder.into(), ty, body))
    }

    /// Single (non-mutual) fixpoint decreasing on argument `rec_arg`.
    pub fn fix1(rec_arg: usize, name: impl Into<String>, ty: Rc<Term>, body: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Fix(
            vec![rec_arg],
            0,
            vec![FixComponent {
                name: name.into(),
                ty,
                body,
            }],
        ))
    }

    pub fn meta(id: usize) -> Rc<Self> {
        Rc::new(Term::Meta(id))
    }

    /// Does any metavariable occur anywhere in this term?
    pub fn has_meta(&self) -> bool {
        match self {
            Term::Var(_) | Term::Sort(_) | Term::Const(_) => false,
            Term::Meta(_) => true,
            Term::App(head, args) => head.has_meta() || args.iter().any(|a| a.has_meta()),
            Term::Lam(_, ty, body) => ty.has_meta() || body.has_meta(),
            Term::Fix(_, _, components) => components
                .iter()
                .any(|c| c.ty.has_meta() || c.body.has_meta()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(idx) => write!(f, "{}", idx),
            Term::Sort(level) => match level.as_numeral() {
                Some(n) => write!(f, "(sort {})", n),
                None => write!(f, "(sort {:?})", level),
            },
            Term::Const(name) => write!(f, "{}", name),
            Term::App(head, args) => {
                write!(f, "(app {}", head)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
            Term::Lam(binder, ty, body) => write!(f, "(lam {} {} {})", binder, ty, body),
            Term::Fix(rec_args, _, components)
                if components.len() == 1 && rec_args.len() == 1 =>
            {
                let c = &components[0];
                write!(f, "(fix {} {} {} {})", rec_args[0], c.name, c.ty, c.body)
            }
            Term::Fix(rec_args, component, components) => {
                write!(f, "(mfix {}", component)?;
                for (k, c) in rec_args.iter().zip(components) {
                    write!(f, " ({} {} {} {})", k, c.name, c.ty, c.body)?;
                }
                write!(f, ")")
            }
            Term::Meta(id) => write!(f, "_{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_with_no_args_is_the_head() {
        let head = Term::constant("f");
        let same = Term::app(head.clone(), vec![]);
        assert_eq!(head, same);
    }

    #[test]
    fn app_flattens_nested_heads() {
        // ((f a) b) and (f a b) are the same spine
        let f = Term::constant("f");
        let a = Term::constant("a");
        let b = Term::constant("b");
        let nested = Term::app(Term::app(f.clone(), vec![a.clone()]), vec![b.clone()]);
        let flat = Term::app(f, vec![a, b]);
        assert_eq!(nested, flat);
    }

    #[test]
    fn display_prints_spine_syntax() {
        let t = Term::app(
            Term::constant("P"),
            vec![
                Term::app(Term::constant("f"), vec![Term::constant("n")]),
                Term::var(0),
            ],
        );
        assert_eq!(t.to_string(), "(app P (app f n) 0)");
    }

    #[test]
    fn has_meta_sees_through_binders() {
        let body = Term::app(Term::constant("g"), vec![Term::meta(3)]);
        let lam = Term::lam("x", Term::constant("Nat"), body);
        assert!(lam.has_meta());
        assert!(!Term::constant("g").has_meta());
    }

    #[test]
    fn level_numeral_roundtrip() {
        assert_eq!(Level::of(3).as_numeral(), Some(3));
        assert_eq!(Level::Param("u".to_string()).as_numeral(), None);
    }
}
