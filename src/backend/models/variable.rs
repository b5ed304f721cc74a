//! Pattern variables.
//!
//! A variable's identity is its [`VarId`]. Named variables are equal when their
//! names are equal; fresh variables are equal only to clones of themselves.
//! The acceptance filter plays no part in equality.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Atom, Term};
use crate::backend::symbol::Symbol;

/// Source of distinct factory scopes, so fresh variables from two factories never collide
static NEXT_SCOPE: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static DEFAULT_FACTORY: VarFactory = VarFactory::new();
}

/// Identity handle of a variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarId {
    /// Caller-named variable (`$x`)
    Named(Symbol),
    /// Anonymous variable minted by a [`VarFactory`]
    Fresh { scope: u64, index: u64 },
}

type FilterFn = dyn Fn(&Term) -> bool + Send + Sync;

#[derive(Clone)]
struct Filter {
    label: Arc<str>,
    test: Arc<FilterFn>,
}

/// A named placeholder inside a pattern
#[derive(Clone)]
pub struct Variable {
    id: VarId,
    filter: Option<Filter>,
}

impl Variable {
    /// Variable identified by `name`, accepting any term
    pub fn named(name: impl Into<Symbol>) -> Self {
        Variable {
            id: VarId::Named(name.into()),
            filter: None,
        }
    }

    /// Fresh anonymous variable from this thread's default factory
    pub fn var() -> Self {
        DEFAULT_FACTORY.with(VarFactory::fresh)
    }

    /// Named variable accepting only `Long` and `Float` atoms
    pub fn number(name: impl Into<Symbol>) -> Self {
        Variable::named(name).with_filter("number", |t| {
            matches!(t, Term::Atom(Atom::Long(_) | Atom::Float(_)))
        })
    }

    /// Named variable accepting only symbol atoms
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Variable::named(name).with_filter("symbol", |t| matches!(t, Term::Atom(Atom::Symbol(_))))
    }

    /// Named variable accepting only sequences
    pub fn sequence(name: impl Into<Symbol>) -> Self {
        Variable::named(name).with_filter("sequence", Term::is_seq)
    }

    /// Replace the acceptance predicate. `label` shows up in `Debug` output.
    pub fn with_filter<F>(mut self, label: &str, test: F) -> Self
    where
        F: Fn(&Term) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Filter {
            label: Arc::from(label),
            test: Arc::new(test),
        });
        self
    }

    #[inline]
    pub fn id(&self) -> &VarId {
        &self.id
    }

    /// Name of a named variable; `None` for fresh ones
    pub fn name(&self) -> Option<&str> {
        match &self.id {
            VarId::Named(name) => Some(name.as_str()),
            VarId::Fresh { .. } => None,
        }
    }

    /// Whether `term` may ever be bound to this variable
    #[inline]
    pub fn test(&self, term: &Term) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => (filter.test)(term),
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            VarId::Named(name) => write!(f, "${}", name),
            VarId::Fresh { scope, index } => write!(f, "$_{}_{}", scope, index),
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filter {
            None => write!(f, "Variable({})", self),
            Some(filter) => write!(f, "Variable({}: {})", self, filter.label),
        }
    }
}

/// Counter-backed generator of fresh variables.
///
/// Each factory owns a distinct scope; indices count up from zero within it.
#[derive(Debug)]
pub struct VarFactory {
    scope: u64,
    next: Cell<u64>,
}

impl VarFactory {
    pub fn new() -> Self {
        VarFactory {
            scope: NEXT_SCOPE.fetch_add(1, Ordering::Relaxed),
            next: Cell::new(0),
        }
    }

    pub fn fresh(&self) -> Variable {
        let index = self.next.get();
        self.next.set(index + 1);
        Variable {
            id: VarId::Fresh {
                scope: self.scope,
                index,
            },
            filter: None,
        }
    }

    /// Number of variables minted so far
    pub fn issued(&self) -> u64 {
        self.next.get()
    }
}

impl Default for VarFactory {
    fn default() -> Self {
        Self::new()
    }
}
