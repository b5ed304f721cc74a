//! Substitution of bound variables into terms.

use std::borrow::Cow;

use tracing::trace;

use crate::backend::models::{Bindings, Term};

/// Apply variable bindings to a term.
///
/// Returns `Cow::Borrowed(term)` when nothing was substituted, so an unchanged
/// term comes back by reference. When some element of a sequence changed, a
/// new sequence is built; unchanged elements are shared, not copied.
///
/// Substitution is terminal: the value bound to a variable is inserted as-is
/// and not rewritten again. Use [`rewrite_fixpoint`] to chase chains.
pub fn rewrite<'a>(term: &'a Term, bindings: &Bindings) -> Cow<'a, Term> {
    // Fast path: empty bindings means no substitutions possible
    if bindings.is_empty() {
        return Cow::Borrowed(term);
    }
    rewrite_impl(term, bindings)
}

/// [`rewrite`] into an owned term
pub fn rewrite_owned(term: &Term, bindings: &Bindings) -> Term {
    rewrite(term, bindings).into_owned()
}

fn rewrite_impl<'a>(term: &'a Term, bindings: &Bindings) -> Cow<'a, Term> {
    match term {
        Term::Var(var) => match bindings.get(var) {
            Some(value) => Cow::Owned(value.clone()),
            None => Cow::Borrowed(term),
        },
        Term::Seq(items) => {
            // Check if any substitution will occur before allocating
            let Some(first_changed) = items.iter().enumerate().find_map(|(i, item)| {
                match rewrite_impl(item, bindings) {
                    Cow::Owned(new) => Some((i, new)),
                    Cow::Borrowed(_) => None,
                }
            }) else {
                return Cow::Borrowed(term);
            };

            let (index, replacement) = first_changed;
            let mut rewritten: Vec<Term> = Vec::with_capacity(items.len());
            rewritten.extend(items[..index].iter().cloned());
            rewritten.push(replacement);
            rewritten.extend(
                items[index + 1..]
                    .iter()
                    .map(|item| rewrite_impl(item, bindings).into_owned()),
            );
            Cow::Owned(Term::Seq(rewritten.into()))
        }
        Term::Atom(_) => Cow::Borrowed(term),
    }
}

/// Repeat [`rewrite`] until the term stops changing or `max_rounds` is reached.
///
/// Useful when variables are bound to terms mentioning other bound variables.
/// Returns the last term produced either way.
pub fn rewrite_fixpoint(term: &Term, bindings: &Bindings, max_rounds: usize) -> Term {
    let mut current = term.clone();
    for round in 0..max_rounds {
        match rewrite(&current, bindings) {
            Cow::Borrowed(_) => {
                trace!(target: "termrite::backend::eval::rewrite", round, "Fixpoint reached");
                return current;
            }
            Cow::Owned(next) => current = next,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::models::Variable;
    use crate::seq;

    fn is_borrowed_from(result: &Cow<'_, Term>, original: &Term) -> bool {
        matches!(result, Cow::Borrowed(t) if std::ptr::eq(*t, original))
    }

    #[test]
    fn test_empty_bindings_return_same_reference() {
        let x = Variable::named("x");
        let t = seq!["f", &x, seq![1, 2]];
        let result = rewrite(&t, &Bindings::new());
        assert!(is_borrowed_from(&result, &t));
    }

    #[test]
    fn test_unrelated_bindings_share_structure() {
        let x = Variable::named("x");
        let y = Variable::named("y");
        let mut bindings = Bindings::new();
        bindings.bind(y, Term::long(9));

        let t = seq!["f", &x, seq!["g", &x]];
        let result = rewrite(&t, &bindings);
        assert!(is_borrowed_from(&result, &t));
    }

    #[test]
    fn test_substitutes_bound_variables() {
        let x = Variable::named("x");
        let mut bindings = Bindings::new();
        bindings.bind(x.clone(), Term::sym("a"));

        let t = seq![2, "*", &x];
        assert_eq!(rewrite_owned(&t, &bindings), seq![2, "*", "a"]);
        assert_eq!(rewrite_owned(&Term::var(x), &bindings), Term::sym("a"));
    }

    #[test]
    fn test_unchanged_siblings_are_shared() {
        let x = Variable::named("x");
        let mut bindings = Bindings::new();
        bindings.bind(x.clone(), Term::long(1));

        let left = seq!["left", 0];
        let right = seq!["right", 0];
        let t = seq![left.clone(), &x, right.clone()];
        let result = rewrite_owned(&t, &bindings);

        let items = result.elements().unwrap();
        assert!(items[0].ptr_eq(&left));
        assert_eq!(items[1], Term::long(1));
        assert!(items[2].ptr_eq(&right));
        assert!(!result.ptr_eq(&t));
    }

    #[test]
    fn test_substitution_is_terminal() {
        let x = Variable::named("x");
        let y = Variable::named("y");
        let mut bindings = Bindings::new();
        bindings.bind(x.clone(), seq!["g", &y]);
        bindings.bind(y.clone(), Term::long(5));

        // $x's value is inserted without rewriting $y inside it
        assert_eq!(rewrite_owned(&seq!["f", &x], &bindings), seq!["f", seq!["g", &y]]);
        assert_eq!(rewrite_fixpoint(&seq!["f", &x], &bindings, 10), seq!["f", seq!["g", 5]]);
    }

    #[test]
    fn test_fixpoint_respects_round_limit() {
        let x = Variable::named("x");
        let mut bindings = Bindings::new();
        // cyclic chain: $x -> (s $x)
        bindings.bind(x.clone(), seq!["s", &x]);
        let result = rewrite_fixpoint(&Term::var(x.clone()), &bindings, 3);
        assert_eq!(result, seq!["s", seq!["s", seq!["s", &x]]]);
    }

    #[test]
    fn test_atoms_untouched() {
        let mut bindings = Bindings::new();
        bindings.bind(Variable::named("x"), Term::long(1));
        let t = Term::string("x");
        assert!(is_borrowed_from(&rewrite(&t, &bindings), &t));
    }
}
