//! Shared helpers for integration tests
//!
//! - Installing a tracing subscriber that writes through the test harness
//! - Small term constructors used across test files

#![allow(dead_code)]

use std::sync::Once;

use termrite::{seq, PatternPredicate, RuleSet, Term, Variable};

static TRACING: Once = Once::new();

/// Route `tracing` output to the test writer. Set `RUST_LOG`-style filtering
/// via `TERMRITE_LOG` (e.g. `TERMRITE_LOG=trace`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let level = std::env::var("TERMRITE_LOG")
            .ok()
            .and_then(|l| l.parse::<tracing::Level>().ok())
            .unwrap_or(tracing::Level::WARN);
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    });
}

pub fn var(name: &str) -> Variable {
    Variable::named(name)
}

/// Peano numeral: Z, (S Z), (S (S Z)), ...
pub fn peano(n: usize) -> Term {
    (0..n).fold(Term::sym("Z"), |acc, _| seq!["S", acc])
}

/// Boolean simplification rules over (not _), (and _ _), (or _ _)
pub fn boolean_rules() -> RuleSet<Term> {
    let x = var("x");
    RuleSet::named("boolean")
        .with(PatternPredicate::rewrite_to(seq!["not", "T"], Term::sym("F")))
        .with(PatternPredicate::rewrite_to(seq!["not", "F"], Term::sym("T")))
        .with(PatternPredicate::rewrite_to(seq!["and", "T", &x], Term::var(x.clone())))
        .with(PatternPredicate::rewrite_to(seq!["and", "F", &x], Term::sym("F")))
        .with(PatternPredicate::rewrite_to(seq!["or", "T", &x], Term::sym("T")))
        .with(PatternPredicate::rewrite_to(seq!["or", "F", &x], Term::var(x.clone())))
}
