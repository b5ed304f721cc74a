//! Rules: a predicate paired with an application.
//!
//! A rule's predicate decides applicability and may record bindings; the
//! application runs only after the predicate succeeded and computes the result.

use std::sync::Arc;

use tracing::trace;

use super::pattern::match_into;
use super::rewrite::rewrite_owned;
use crate::backend::models::{Bindings, Term};

/// Applicability test over a term and the current bindings.
///
/// Implemented for any `Fn(&Term, &mut Bindings) -> bool + Send + Sync`.
pub trait Predicate: Send + Sync {
    fn test(&self, term: &Term, bindings: &mut Bindings) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Term, &mut Bindings) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, term: &Term, bindings: &mut Bindings) -> bool {
        self(term, bindings)
    }
}

/// Result computation, run once the paired predicate has succeeded.
///
/// Implemented for any `Fn(&Term, &Bindings) -> R + Send + Sync`.
pub trait Application<R>: Send + Sync {
    fn compute(&self, term: &Term, bindings: &Bindings) -> R;
}

impl<R, F> Application<R> for F
where
    F: Fn(&Term, &Bindings) -> R + Send + Sync,
{
    #[inline]
    fn compute(&self, term: &Term, bindings: &Bindings) -> R {
        self(term, bindings)
    }
}

/// Anything that conditionally turns a term into an `R`.
///
/// `None` means the rule did not match. A rule that matched but has nothing
/// to say returns `Some` of whatever "nothing" is for `R` (e.g. `Some(None)`).
pub trait Rule<R>: Send + Sync {
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R>;
}

impl<R, T: Rule<R> + ?Sized> Rule<R> for &T {
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        (**self).apply(term, bindings)
    }
}

impl<R, T: Rule<R> + ?Sized> Rule<R> for Box<T> {
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        (**self).apply(term, bindings)
    }
}

impl<R, T: Rule<R> + ?Sized> Rule<R> for Arc<T> {
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        (**self).apply(term, bindings)
    }
}

/// A rule built from a separate predicate and application
#[derive(Debug, Clone)]
pub struct CompositeRule<P, A> {
    predicate: P,
    application: A,
}

impl<P, A> CompositeRule<P, A> {
    pub fn new(predicate: P, application: A) -> Self {
        CompositeRule {
            predicate,
            application,
        }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<R, P, A> Rule<R> for CompositeRule<P, A>
where
    P: Predicate,
    A: Application<R>,
{
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        if self.predicate.test(term, bindings) {
            Some(self.application.compute(term, bindings))
        } else {
            None
        }
    }
}

/// Predicate that holds when the term matches `pattern`, binding its variables
#[derive(Debug, Clone, PartialEq)]
pub struct PatternPredicate {
    pattern: Term,
}

impl PatternPredicate {
    pub fn new(pattern: Term) -> Self {
        PatternPredicate { pattern }
    }

    pub fn pattern(&self) -> &Term {
        &self.pattern
    }

    /// Rule running `application` on terms that match `pattern`
    pub fn match_with<R, A>(pattern: Term, application: A) -> CompositeRule<PatternPredicate, A>
    where
        A: Application<R>,
    {
        CompositeRule::new(PatternPredicate::new(pattern), application)
    }

    /// Rule rewriting terms that match `pattern` into `template` under the match bindings
    ///
    /// ```
    /// use termrite::{seq, PatternPredicate, Rule, Bindings, Variable};
    ///
    /// let x = Variable::named("x");
    /// let double = PatternPredicate::rewrite_to(seq![&x, "+", &x], seq![2, "*", &x]);
    /// let result = double.apply(&seq!["a", "+", "a"], &mut Bindings::new());
    /// assert_eq!(result, Some(seq![2, "*", "a"]));
    /// ```
    pub fn rewrite_to(pattern: Term, template: Term) -> CompositeRule<PatternPredicate, Template> {
        CompositeRule::new(PatternPredicate::new(pattern), Template::new(template))
    }
}

impl Predicate for PatternPredicate {
    fn test(&self, term: &Term, bindings: &mut Bindings) -> bool {
        let matched = match_into(&self.pattern, term, bindings);
        trace!(target: "termrite::backend::eval::rules", pattern = %self.pattern, %term, matched);
        matched
    }
}

/// Application that instantiates a stored term with the current bindings
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    term: Term,
}

impl Template {
    pub fn new(term: Term) -> Self {
        Template { term }
    }
}

impl Application<Term> for Template {
    fn compute(&self, _term: &Term, bindings: &Bindings) -> Term {
        rewrite_owned(&self.term, bindings)
    }
}
