// Matching, substitution and rule dispatch over terms
//
// match(p, t, env):  v        => env[v] == t        if v bound
//                              => v.test(t), env[v]=t otherwise
//                    (p1..pn) => n == len(t) && all match(pi, ti, env), left to right
//                    atom     => p == t
// rewrite(t, env):   bound v  => env[v]  (terminal)
//                    (t1..tn) => shared unless some ti changed
// dispatch(rules, t, env): restore env, try rule i, first Some wins

pub mod normalize;
pub mod pattern;
pub mod rewrite;
pub mod rule_set;
pub mod rules;

pub use normalize::{Normalized, Normalizer};
pub use pattern::{match_into, match_or_fail, pattern_match};
pub use rewrite::{rewrite, rewrite_fixpoint, rewrite_owned};
pub use rule_set::RuleSet;
pub use rules::{Application, CompositeRule, PatternPredicate, Predicate, Rule, Template};
