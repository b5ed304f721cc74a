//! Ordered, first-match-wins rule dispatch.
//!
//! A [`RuleSet`] tries its rules in insertion order. Before each attempt the
//! bindings are rolled back to what the caller passed in, so a failed rule
//! never leaks partial bindings into the next one. The first rule that
//! matches produces the result; no further rules are tried.
//!
//! A `RuleSet` is itself a [`Rule`], so sets nest. Every level owns its own
//! snapshot/restore cycle.

use std::fmt;

use tracing::{debug, trace};

use super::rules::{Application, CompositeRule, Predicate, Rule};
use crate::backend::models::{Bindings, Term};

/// Ordered collection of rules producing `R`
pub struct RuleSet<R> {
    name: Option<String>,
    rules: Vec<Box<dyn Rule<R>>>,
}

impl<R> RuleSet<R> {
    pub fn new() -> Self {
        RuleSet {
            name: None,
            rules: Vec::new(),
        }
    }

    /// Empty set labelled `name` in log output
    pub fn named(name: impl Into<String>) -> Self {
        RuleSet {
            name: Some(name.into()),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Append a rule; it is tried after every rule already present
    pub fn add<T>(&mut self, rule: T) -> &mut Self
    where
        T: Rule<R> + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a [`CompositeRule`] built from `predicate` and `application`
    pub fn add_when<P, A>(&mut self, predicate: P, application: A) -> &mut Self
    where
        P: Predicate + 'static,
        A: Application<R> + 'static,
    {
        self.add(CompositeRule::new(predicate, application))
    }

    /// Builder form of [`add`](Self::add)
    pub fn with<T>(mut self, rule: T) -> Self
    where
        T: Rule<R> + 'static,
    {
        self.add(rule);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply with a fresh, empty environment
    pub fn apply_to(&self, term: &Term) -> Option<R> {
        self.dispatch(term, &mut Bindings::new())
    }

    /// Apply against the caller's environment.
    ///
    /// On a match, `bindings` holds what the matching rule added; otherwise it
    /// is left exactly as it was passed in.
    pub fn apply_to_with(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        self.dispatch(term, bindings)
    }

    /// Apply with a fresh environment, falling back to `default` on no match
    pub fn apply_to_or(&self, term: &Term, default: R) -> R {
        self.apply_to(term).unwrap_or(default)
    }

    pub fn apply_to_with_or(&self, term: &Term, bindings: &mut Bindings, default: R) -> R {
        self.dispatch(term, bindings).unwrap_or(default)
    }

    fn dispatch(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        let label = self.name.as_deref().unwrap_or("<anonymous>");
        let backup = bindings.snapshot();

        for (index, rule) in self.rules.iter().enumerate() {
            bindings.restore(&backup);
            trace!(target: "termrite::backend::eval::rule_set", rule_set = label, index, %term, "Trying rule");
            if let Some(result) = rule.apply(term, bindings) {
                debug!(target: "termrite::backend::eval::rule_set", rule_set = label, index, %term, "Rule matched");
                return Some(result);
            }
        }

        bindings.restore(&backup);
        trace!(target: "termrite::backend::eval::rule_set", rule_set = label, %term, "No rule matched");
        None
    }
}

impl RuleSet<Term> {
    /// Apply, returning the input unchanged when no rule matches
    pub fn rewrite_or_keep(&self, term: &Term) -> Term {
        self.apply_to(term).unwrap_or_else(|| term.clone())
    }
}

impl<R> Rule<R> for RuleSet<R> {
    fn apply(&self, term: &Term, bindings: &mut Bindings) -> Option<R> {
        self.dispatch(term, bindings)
    }
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RuleSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use super::*;

    impl<R: Send> RuleSet<R> {
        /// Apply to many independent terms on rayon's pool.
        ///
        /// Each term gets its own fresh environment; results keep input order.
        pub fn par_apply_to_all(&self, terms: &[Term]) -> Vec<Option<R>> {
            terms.par_iter().map(|term| self.apply_to(term)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::eval::rules::PatternPredicate;
    use crate::backend::models::Variable;
    use crate::seq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_set_never_matches() {
        let rules: RuleSet<Term> = RuleSet::new();
        assert!(rules.is_empty());
        assert_eq!(rules.name(), None);
        assert_eq!(RuleSet::<Term>::named("arith").name(), Some("arith"));
        assert_eq!(rules.apply_to(&Term::sym("a")), None);
        assert_eq!(rules.apply_to_or(&Term::sym("a"), Term::nil()), Term::nil());
    }

    #[test]
    fn test_first_match_wins() {
        let second_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&second_calls);

        let mut rules = RuleSet::new();
        rules
            .add_when(|_: &Term, _: &mut Bindings| true, |_: &Term, _: &Bindings| "first")
            .add_when(|_: &Term, _: &mut Bindings| true, move |_: &Term, _: &Bindings| {
                counter.fetch_add(1, Ordering::SeqCst);
                "second"
            });

        assert_eq!(rules.apply_to(&Term::sym("x")), Some("first"));
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rollback_between_attempts() {
        let v = Variable::named("v");
        let w = Variable::named("w");

        // R1 binds $v on the first element, then fails on the second
        let rules = RuleSet::new()
            .with(PatternPredicate::match_with(
                seq![&v, "never"],
                |_: &Term, _: &Bindings| usize::MAX,
            ))
            .with(PatternPredicate::match_with(
                seq![&w, "b"],
                |_: &Term, b: &Bindings| b.len(),
            ));

        let mut bindings = Bindings::new();
        let result = rules.apply_to_with(&seq!["a", "b"], &mut bindings);

        // R2 saw only its own binding
        assert_eq!(result, Some(1));
        assert!(!bindings.contains(&v));
        assert_eq!(bindings.get(&w), Some(&Term::sym("a")));
    }

    #[test]
    fn test_failed_dispatch_restores_caller_environment() {
        let pre = Variable::named("pre");
        let v = Variable::named("v");
        let rules: RuleSet<Term> =
            RuleSet::new().with(PatternPredicate::rewrite_to(seq![&v, "z"], Term::sym("hit")));

        let mut bindings = Bindings::new();
        bindings.bind(pre.clone(), Term::long(0));
        let before = bindings.clone();

        assert_eq!(rules.apply_to_with(&seq![1, 2], &mut bindings), None);
        assert_eq!(bindings, before);
    }

    #[test]
    fn test_destructive_predicate_is_rolled_back() {
        let pre = Variable::named("pre");
        let x = Variable::named("x");
        let rules: RuleSet<Term> = RuleSet::new()
            .with(CompositeRule::new(
                |_: &Term, env: &mut Bindings| {
                    *env = Bindings::new();
                    false
                },
                |_: &Term, _: &Bindings| Term::sym("unreachable"),
            ))
            .with(PatternPredicate::rewrite_to(seq!["f", &x], seq!["g", &x]));

        let mut bindings = Bindings::new();
        bindings.bind(pre.clone(), Term::long(7));
        assert_eq!(
            rules.apply_to_with(&seq!["f", 1], &mut bindings),
            Some(seq!["g", 1])
        );
        assert_eq!(bindings.get(&pre), Some(&Term::long(7)));
        assert_eq!(bindings.get(&x), Some(&Term::long(1)));

        // a pre-bound $x survives the wipe and still blocks the second rule
        let mut bindings = Bindings::new();
        bindings.bind(x.clone(), Term::long(2));
        let before = bindings.clone();
        assert_eq!(rules.apply_to_with(&seq!["f", 1], &mut bindings), None);
        assert_eq!(bindings, before);
    }

    #[test]
    fn test_caller_bindings_constrain_rules() {
        let x = Variable::named("x");
        let rules: RuleSet<Term> =
            RuleSet::new().with(PatternPredicate::rewrite_to(seq!["f", &x], seq!["g", &x]));

        let mut bindings = Bindings::new();
        bindings.bind(x.clone(), Term::long(1));
        assert_eq!(rules.apply_to_with(&seq!["f", 2], &mut bindings), None);
        assert_eq!(
            rules.apply_to_with(&seq!["f", 1], &mut bindings),
            Some(seq!["g", 1])
        );
    }

    #[test]
    fn test_default_result() {
        let x = Variable::named("x");
        let rules = RuleSet::new().with(PatternPredicate::rewrite_to(
            seq![&x, "+", &x],
            seq![2, "*", &x],
        ));

        let input = seq!["a", "+", "b"];
        assert_eq!(rules.apply_to_or(&input, input.clone()), input);
        assert_eq!(
            rules.apply_to_with_or(&input, &mut Bindings::new(), Term::nil()),
            Term::nil()
        );
        assert_eq!(rules.rewrite_or_keep(&input), input);
        assert_eq!(rules.rewrite_or_keep(&seq!["a", "+", "a"]), seq![2, "*", "a"]);
    }

    #[test]
    fn test_nested_rule_sets() {
        let x = Variable::named("x");
        let y = Variable::named("y");

        let arithmetic = RuleSet::named("arithmetic")
            .with(PatternPredicate::rewrite_to(seq![&x, "+", 0], Term::var(x.clone())))
            .with(PatternPredicate::rewrite_to(seq![&x, "*", 1], Term::var(x.clone())));

        let logic = RuleSet::named("logic")
            .with(PatternPredicate::rewrite_to(seq!["not", seq!["not", &y]], Term::var(y.clone())));

        let all = RuleSet::named("all").with(arithmetic).with(logic);
        assert_eq!(all.len(), 2);

        assert_eq!(all.apply_to(&seq!["a", "*", 1]), Some(Term::sym("a")));
        assert_eq!(all.apply_to(&seq!["not", seq!["not", "p"]]), Some(Term::sym("p")));
        assert_eq!(all.apply_to(&seq!["a", "-", 1]), None);
    }

    #[test]
    fn test_nested_failure_does_not_leak() {
        let v = Variable::named("v");
        let inner: RuleSet<&'static str> =
            RuleSet::new().with(PatternPredicate::match_with(seq![&v, "x"], |_: &Term, _: &Bindings| "inner"));
        let outer = RuleSet::new()
            .with(inner)
            .with(PatternPredicate::match_with(Term::var(Variable::named("any")), |_: &Term, b: &Bindings| {
                if b.contains(&Variable::named("v")) {
                    "leaked"
                } else {
                    "clean"
                }
            }));

        assert_eq!(outer.apply_to(&seq![1, "y"]), Some("clean"));
    }

    #[test]
    fn test_concrete_doubling_rule() {
        let x = Variable::named("x");
        let x_app = x.clone();
        let mut rules = RuleSet::new();
        rules.add(PatternPredicate::match_with(
            seq![&x, "+", &x],
            move |_: &Term, env: &Bindings| seq![2, "*", env.get(&x_app).cloned().unwrap_or_else(Term::nil)],
        ));

        assert_eq!(rules.apply_to(&seq!["a", "+", "a"]), Some(seq![2, "*", "a"]));
        let unmatched = seq!["a", "+", "b"];
        assert_eq!(rules.apply_to_or(&unmatched, unmatched.clone()), unmatched);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_par_apply_to_all_keeps_order() {
        let n = Variable::number("n");
        let rules = RuleSet::new().with(PatternPredicate::rewrite_to(
            seq!["twice", &n],
            seq![&n, &n],
        ));
        let inputs: Vec<Term> = (0..64).map(|i| seq!["twice", i]).chain([seq!["twice", "a"]]).collect();

        let results = rules.par_apply_to_all(&inputs);
        assert_eq!(results.len(), 65);
        for (i, result) in results.iter().take(64).enumerate() {
            assert_eq!(result, &Some(seq![i as i64, i as i64]));
        }
        assert_eq!(results[64], None);
    }
}
