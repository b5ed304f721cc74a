//! Variable bindings for pattern matching
//!
//! Bindings are append-only during a match attempt: a variable, once bound,
//! is never rebound to a different value. A [`Snapshot`] holds a copy of the
//! entries, so [`Bindings::restore`] brings them back even after a callee
//! rebuilt the environment from scratch.
//!
//! Storage is a `SmallVec` so the common 1-8 binding case stays on the stack.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

use super::{Term, Variable};

/// Caller-owned environment mapping variables to terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: SmallVec<[(Variable, Term); 8]>,
}

/// Rollback point produced by [`Bindings::snapshot`].
///
/// Entries are reference counted terms, so taking one is a shallow copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: SmallVec<[(Variable, Term); 8]>,
}

impl Snapshot {
    /// Number of bindings captured
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Bindings {
    #[inline]
    pub fn new() -> Self {
        Bindings {
            entries: SmallVec::new(),
        }
    }

    /// Get the term bound to `var`
    #[inline]
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.entries
            .iter()
            .find(|(bound, _)| bound == var)
            .map(|(_, term)| term)
    }

    /// Look up a named variable by its name
    pub fn get_named(&self, name: &str) -> Option<&Term> {
        self.entries
            .iter()
            .find(|(bound, _)| bound.name() == Some(name))
            .map(|(_, term)| term)
    }

    #[inline]
    pub fn contains(&self, var: &Variable) -> bool {
        self.get(var).is_some()
    }

    /// Record `var -> term`.
    ///
    /// If `var` is already bound, succeeds only when the existing value equals
    /// `term`; the environment is left unchanged either way.
    pub fn bind(&mut self, var: Variable, term: Term) -> bool {
        match self.get(&var) {
            Some(existing) => *existing == term,
            None => {
                self.entries.push((var, term));
                true
            }
        }
    }

    /// Append without checking for an existing binding. Callers must have
    /// looked `var` up first.
    #[inline]
    pub(crate) fn push_unbound(&mut self, var: Variable, term: Term) {
        debug_assert!(!self.contains(&var));
        self.entries.push((var, term));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.entries.iter().map(|(var, term)| (var, term))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mark the current state for a later [`restore`](Self::restore)
    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self.entries.clone(),
        }
    }

    /// Put back exactly the bindings `snapshot` captured
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if self.entries.len() >= snapshot.len()
            && self.entries[..snapshot.len()]
                .iter()
                .zip(snapshot.entries.iter())
                .all(|(live, kept)| live.0 == kept.0 && live.1.ptr_eq(&kept.1))
        {
            self.entries.truncate(snapshot.len());
        } else {
            self.entries.clone_from(&snapshot.entries);
        }
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.entries
                .iter()
                .format_with(", ", |(var, term), f| f(&format_args!("{} = {}", var, term)))
        )
    }
}
