//! Driving a rule set to a normal form.
//!
//! A single [`RuleSet::apply_to`] rewrites only the term it is handed. The
//! [`Normalizer`] repeatedly locates a redex (a position where some rule
//! matches), replaces it, and stops when no position matches any more or the
//! step budget runs out.

use tracing::{debug, trace};

use super::rule_set::RuleSet;
use crate::backend::config::{NormalizeConfig, Strategy};
use crate::backend::errors::NormalizeError;
use crate::backend::models::Term;

/// A term in normal form together with how many rewrites it took
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub term: Term,
    pub steps: usize,
}

#[derive(Debug)]
pub struct Normalizer<'r> {
    rules: &'r RuleSet<Term>,
    config: NormalizeConfig,
}

impl<'r> Normalizer<'r> {
    pub fn new(rules: &'r RuleSet<Term>, config: NormalizeConfig) -> Self {
        Normalizer { rules, config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Perform one rewrite step; `None` when `term` is already in normal form
    pub fn step(&self, term: &Term) -> Option<Term> {
        match self.config.strategy {
            Strategy::Outermost => self.step_outermost(term),
            Strategy::Innermost => self.step_innermost(term),
        }
    }

    /// Rewrite until no rule applies anywhere in the term
    pub fn normalize(&self, term: &Term) -> Result<Normalized, NormalizeError> {
        let mut current = term.clone();
        let mut steps = 0;

        while let Some(next) = self.step(&current) {
            if steps == self.config.max_steps {
                debug!(
                    target: "termrite::backend::eval::normalize",
                    limit = self.config.max_steps, term = %current, "Step limit exceeded"
                );
                return Err(NormalizeError::StepLimitExceeded {
                    limit: self.config.max_steps,
                    term: current,
                });
            }
            trace!(target: "termrite::backend::eval::normalize", step = steps, from = %current, to = %next);
            current = next;
            steps += 1;
        }

        debug!(target: "termrite::backend::eval::normalize", steps, result = %current, "Normal form reached");
        Ok(Normalized {
            term: current,
            steps,
        })
    }

    fn step_outermost(&self, term: &Term) -> Option<Term> {
        if let Some(rewritten) = self.rules.apply_to(term) {
            return Some(rewritten);
        }
        self.step_children(term, Self::step_outermost)
    }

    fn step_innermost(&self, term: &Term) -> Option<Term> {
        if let Some(rewritten) = self.step_children(term, Self::step_innermost) {
            return Some(rewritten);
        }
        self.rules.apply_to(term)
    }

    /// Rewrite the first child, left to right, that `step` can rewrite
    fn step_children(
        &self,
        term: &Term,
        step: fn(&Self, &Term) -> Option<Term>,
    ) -> Option<Term> {
        let items = term.elements()?;
        items.iter().enumerate().find_map(|(index, item)| {
            step(self, item).map(|replacement| {
                let mut rewritten = items.to_vec();
                rewritten[index] = replacement;
                Term::from(rewritten)
            })
        })
    }
}
