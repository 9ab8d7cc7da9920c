use crate::ast::Term;
use std::collections::HashMap;
use std::rc::Rc;

/// A local binding introduced by descending under a binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub ty: Rc<Term>,
}

impl Binding {
    pub fn new(name: impl Into<String>, ty: Rc<Term>) -> Self {
        Binding {
            name: name.into(),
            ty,
        }
    }
}

/// Unfolding transparency of a global definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transparency {
    /// Never unfolds (irreducible definitions, axioms).
    Opaque,
    /// Unfolds on demand.
    Reducible,
}

/// A global definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub ty: Rc<Term>,
    pub value: Option<Rc<Term>>, // None for axioms/extern declarations
    pub transparency: Transparency,
}

impl Definition {
    /// Create a definition that unfolds to its value.
    pub fn transparent(name: impl Into<String>, ty: Rc<Term>, value: Rc<Term>) -> Self {
        Definition {
            name: name.into(),
            ty,
            value: Some(value),
            transparency: Transparency::Reducible,
        }
    }

    /// Create a definition with a body that is nevertheless sealed.
    pub fn opaque(name: impl Into<String>, ty: Rc<Term>, value: Rc<Term>) -> Self {
        Definition {
            name: name.into(),
            ty,
            value: Some(value),
            transparency: Transparency::Opaque,
        }
    }

    /// Create an axiom (assumed without a body; axioms don't unfold).
    pub fn axiom(name: impl Into<String>, ty: Rc<Term>) -> Self {
        Definition {
            name: name.into(),
            ty,
            value: None,
            transparency: Transparency::Opaque,
        }
    }
}

/// Outcome of asking the global table for a constant's unfolded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnfoldResult {
    /// Transparent definition: here is its body.
    Value(Rc<Term>),
    /// The constant exists but refuses to unfold (opaque or bodyless).
    Opaque,
    /// No such constant.
    Unknown,
}

/// The global symbol table. Read-only from the tactic layer's point of
/// view; scripts populate it before any goal is attacked.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    defs: HashMap<String, Definition>,
}

impl Globals {
    pub fn new() -> Self {
        Globals {
            defs: HashMap::new(),
        }
    }

    /// Register a global definition, replacing any previous one of the
    /// same name.
    pub fn add_definition(&mut self, def: Definition) {
        self.defs.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(|k| k.as_str())
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.defs.values()
    }

    /// The delta-unfolding service: resolve a constant name to its
    /// defining value, if transparency allows.
    pub fn unfold(&self, name: &str) -> UnfoldResult {
        match self.defs.get(name) {
            Some(def) => match (&def.value, def.transparency) {
                (Some(value), Transparency::Reducible) => UnfoldResult::Value(value.clone()),
                _ => UnfoldResult::Opaque,
            },
            None => UnfoldResult::Unknown,
        }
    }
}

/// An evaluation environment: the ordered local bindings in scope plus a
/// shared read-only handle to the globals.
///
/// `push_local` is persistent: it returns a grown environment and leaves
/// every existing holder of the original untouched.
#[derive(Debug, Clone)]
pub struct Env {
    locals: Vec<Binding>,
    globals: Rc<Globals>,
}

impl Env {
    pub fn new(globals: Rc<Globals>) -> Self {
        Env {
            locals: Vec::new(),
            globals,
        }
    }

    /// An environment over an empty global table.
    pub fn empty() -> Self {
        Env::new(Rc::new(Globals::new()))
    }

    pub fn push_local(&self, binding: Binding) -> Env {
        let mut locals = self.locals.clone();
        locals.push(binding);
        Env {
            locals,
            globals: self.globals.clone(),
        }
    }

    /// Look up a local by de Bruijn index (0 = most recently pushed).
    pub fn local(&self, idx: usize) -> Option<&Binding> {
        if idx < self.locals.len() {
            Some(&self.locals[self.locals.len() - 1 - idx])
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.locals.len()
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }
}
