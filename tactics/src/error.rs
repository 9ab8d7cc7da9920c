use kernel::ast::Term;
use kernel::state::EvalState;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Hard errors. These abort the whole tactic immediately; nothing in the
/// search catches or retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TacticError {
    #[error("not a reference to a defined constant")]
    NotAReference,
    #[error("constant '{0}' is opaque and cannot be unfolded")]
    OpaqueConstant(String),
    #[error("the definition does not reduce to a fixpoint")]
    NotAFixedPoint,
    #[error("sequences have different lengths")]
    LengthMismatch,
}

/// Soft failures. Ordinary values combined by or-else during the search:
/// a failed candidate falls through to the next alternative, and only the
/// last level's failure reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    NoApplicationHere,
    ArityMismatch,
    NoOccurrence,
    NothingToSearch,
}

impl fmt::Display for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Fail::NoApplicationHere => "the conclusion is not an application",
            Fail::ArityMismatch => "the function is not applied to the right number of arguments",
            Fail::NoOccurrence => "found no subterm matching the given application",
            Fail::NothingToSearch => "there are no subterms left to search",
        };
        f.write_str(msg)
    }
}

/// Search result: the argument to induct on, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Rc<Term>),
    NotFound(Fail),
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}

/// The shape of every state-threading operation: the updated evaluation
/// state alongside the result, or a fatal error.
pub type Step<T> = Result<(EvalState, T), TacticError>;
