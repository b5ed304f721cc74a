//! Pattern matching for terms.
//!
//! One-way structural matching: variables in the pattern bind to sub-terms of
//! the target; variables occurring in the target are compared as plain values.
//! Matching proceeds left to right and every element sees the bindings made by
//! the elements before it.

use tracing::trace;

use crate::backend::errors::MatchError;
use crate::backend::models::{Bindings, Term};

/// Match a pattern against a value, returning variable bindings if successful.
///
/// # Examples
/// ```
/// use termrite::{pattern_match, seq, Term, Variable};
///
/// let x = Variable::named("x");
/// let bindings = pattern_match(&seq!["f", &x], &seq!["f", 1]).unwrap();
/// assert_eq!(bindings.get(&x), Some(&Term::long(1)));
///
/// assert!(pattern_match(&seq![&x, &x], &seq![1, 2]).is_none());
/// ```
pub fn pattern_match(pattern: &Term, target: &Term) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    if match_into(pattern, target, &mut bindings) {
        Some(bindings)
    } else {
        None
    }
}

/// Match `pattern` against `target`, extending `bindings` in place.
///
/// On failure, bindings made before the mismatch was found are left in
/// `bindings`; take a [`snapshot`](Bindings::snapshot) first if they need to be
/// discarded.
pub fn match_into(pattern: &Term, target: &Term, bindings: &mut Bindings) -> bool {
    trace!(target: "termrite::backend::eval::pattern", %pattern, value = %target, bound = bindings.len());
    match_impl(pattern, target, bindings)
}

/// Like [`match_into`], but a mismatch is an error carrying both operands.
///
/// For call sites that have already established the match must hold.
pub fn match_or_fail(
    pattern: &Term,
    target: &Term,
    bindings: &mut Bindings,
) -> Result<(), MatchError> {
    if match_into(pattern, target, bindings) {
        Ok(())
    } else {
        Err(MatchError::Mismatch {
            pattern: pattern.clone(),
            target: target.clone(),
        })
    }
}

fn match_impl(pattern: &Term, target: &Term, bindings: &mut Bindings) -> bool {
    match (pattern, target) {
        // Already bound: exact equality with the bound value, no re-match
        (Term::Var(var), _) => match bindings.get(var) {
            Some(existing) => existing == target,
            None if var.test(target) => {
                bindings.push_unbound(var.clone(), target.clone());
                true
            }
            None => false,
        },

        // Sequences must have same length and all elements must match
        (Term::Seq(p_items), Term::Seq(t_items)) => {
            if p_items.len() != t_items.len() {
                return false;
            }
            p_items
                .iter()
                .zip(t_items.iter())
                .all(|(p, t)| match_impl(p, t, bindings))
        }

        (Term::Atom(p), Term::Atom(t)) => p == t,

        _ => false,
    }
}
