//! State-threading combinators.
//!
//! A small sequencing layer over an evolving evaluation state. Operations
//! take the state by value and hand back a possibly-updated one next to
//! their result (`Threaded`); fatal errors travel in the `Result`. The
//! combinators are generic over the state type so the rollback contract
//! can be exercised against any `Clone` state, not just the kernel's.

use crate::error::TacticError;

/// State-in/state-out result of one operation over state `S`.
pub type Threaded<S, T> = Result<(S, T), TacticError>;

/// Lift a pure value into the current state.
pub fn pure<S, T>(st: S, value: T) -> Threaded<S, T> {
    Ok((st, value))
}

/// Run `op1`, then feed its value and updated state to `op2`.
pub fn bind<S, A, B>(
    st: S,
    op1: impl FnOnce(S) -> Threaded<S, A>,
    op2: impl FnOnce(S, A) -> Threaded<S, B>,
) -> Threaded<S, B> {
    let (st, value) = op1(st)?;
    op2(st, value)
}

/// `bind` specialized to a pure transform of the result.
pub fn map<S, A, B>(
    st: S,
    op: impl FnOnce(S) -> Threaded<S, A>,
    f: impl FnOnce(A) -> B,
) -> Threaded<S, B> {
    let (st, value) = op(st)?;
    Ok((st, f(value)))
}

/// Yield the current state as the result value, leaving it in place.
pub fn get<S: Clone>(st: S) -> Threaded<S, S> {
    let snapshot = st.clone();
    Ok((st, snapshot))
}

/// Replace the state wholesale.
pub fn set<S>(_st: S, new: S) -> Threaded<S, ()> {
    Ok((new, ()))
}

/// Thread the state through a left-to-right reduction of `items`.
pub fn fold_left<S, T, A>(
    st: S,
    init: A,
    items: &[T],
    mut f: impl FnMut(S, A, &T) -> Threaded<S, A>,
) -> Threaded<S, A> {
    let mut st = st;
    let mut acc = init;
    for item in items {
        let (next, value) = f(st, acc, item)?;
        st = next;
        acc = value;
    }
    Ok((st, acc))
}

/// `fold_left` over two sequences in lockstep. Differing lengths are a
/// contract violation: the fold fails before `f` runs at all.
pub fn fold_left2<S, T, U, A>(
    st: S,
    init: A,
    xs: &[T],
    ys: &[U],
    mut f: impl FnMut(S, A, &T, &U) -> Threaded<S, A>,
) -> Threaded<S, A> {
    if xs.len() != ys.len() {
        return Err(TacticError::LengthMismatch);
    }
    let mut st = st;
    let mut acc = init;
    for (x, y) in xs.iter().zip(ys) {
        let (next, value) = f(st, acc, x, y)?;
        st = next;
        acc = value;
    }
    Ok((st, acc))
}

/// Branch with rollback: snapshot the state, run `predicate`, and either
/// commit its state changes (continuing with `on_true`) or discard them
/// and resume `on_false` from the snapshot.
///
/// The state visible to `on_false` is exactly the one captured before the
/// predicate ran, whatever the predicate mutated in between.
pub fn branch<S: Clone, I, T>(
    st: S,
    input: I,
    predicate: impl FnOnce(S, &I) -> Threaded<S, bool>,
    on_true: impl FnOnce(S, I) -> Threaded<S, T>,
    on_false: impl FnOnce(S, I) -> Threaded<S, T>,
) -> Threaded<S, T> {
    let snapshot = st.clone();
    let (st, holds) = predicate(st, &input)?;
    if holds {
        on_true(st, input)
    } else {
        drop(st);
        on_false(snapshot, input)
    }
}

/// Pairwise comparison of two equal-length sequences, each pair tested
/// under `branch` so a failed comparison's state effects are rolled back.
/// The first mismatch short-circuits the remaining comparisons to false;
/// the result is true only if every pair compared equal.
pub fn forall2<S: Clone, T, U>(
    st: S,
    xs: &[T],
    ys: &[U],
    mut eq: impl FnMut(S, &T, &U) -> Threaded<S, bool>,
) -> Threaded<S, bool> {
    fold_left2(st, true, xs, ys, |st, acc, x, y| {
        if !acc {
            return Ok((st, false));
        }
        branch(
            st,
            (x, y),
            |st, pair| eq(st, pair.0, pair.1),
            |st, _| Ok((st, true)),
            |st, _| Ok((st, false)),
        )
    })
}
