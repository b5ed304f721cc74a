/// Termrite - Pattern Matching and Rule-Based Term Rewriting
///
/// This library matches symbolic terms against patterns containing free
/// variables, builds a variable→term binding environment, and uses it to pick
/// and apply the first matching rule from an ordered list.
///
/// # Architecture
///
/// 1. **Models** (`backend::models`)
///    - `Term`: atoms (symbols, numbers, strings, grounded values), variables
///      and ordered sequences
///    - `Variable`: named or fresh placeholders with an acceptance filter
///    - `Bindings`: caller-owned, append-only environment with snapshot/restore
///
/// 2. **Evaluation** (`backend::eval`)
///    - `pattern_match` / `match_into` / `match_or_fail`: left-to-right
///      structural matching with single assignment of repeated variables
///    - `rewrite`: substitution that hands back the input when nothing changed
///    - `Rule`, `CompositeRule`, `PatternPredicate`: predicate + application
///    - `RuleSet`: ordered, first-match-wins dispatch with rollback
///    - `Normalizer`: drives a `RuleSet<Term>` to a normal form
///
/// # Example
///
/// ```rust
/// use termrite::*;
///
/// let x = Variable::named("x");
/// let x_app = x.clone();
///
/// let mut rules = RuleSet::new();
/// rules.add(PatternPredicate::match_with(
///     seq![&x, "+", &x],
///     move |_: &Term, env: &Bindings| seq![2, "*", env.get(&x_app).cloned().unwrap_or_else(Term::nil)],
/// ));
///
/// assert_eq!(rules.apply_to(&seq!["a", "+", "a"]), Some(seq![2, "*", "a"]));
///
/// let input = seq!["a", "+", "b"];
/// assert_eq!(rules.apply_to_or(&input, input.clone()), input);
/// ```
///
/// # Evaluation Strategy
///
/// - **Deterministic**: no backtracking over alternative bindings of a rule
/// - **First match wins**: later rules are never consulted once one matches
/// - **Rollback**: every attempt starts from the caller's bindings
/// - **Synchronous**: no internal locking; use one `Bindings` per thread

pub mod backend;

pub use backend::{
    match_into, match_or_fail, pattern_match, rewrite, rewrite_fixpoint, rewrite_owned,
    Application, Atom, Bindings, CompositeRule, ConfigError, EngineConfig, Grounded,
    GroundedValue, MatchError, NormalizeConfig, NormalizeError, Normalized, Normalizer,
    PatternPredicate, Predicate, Rule, RuleSet, Snapshot, Strategy, Symbol, Template, Term,
    VarFactory, VarId, Variable,
};
