use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

use super::{Grounded, GroundedValue, Variable};
use crate::backend::symbol::Symbol;

/// An atomic value, compared by value equality
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// A symbolic name (`foo`, `+`)
    Symbol(Symbol),
    /// A boolean literal
    Bool(bool),
    /// An integer literal
    Long(i64),
    /// A floating point literal. Compared with IEEE `==`, so `NaN` never
    /// equals itself and a repeated variable will not match two `NaN`s.
    Float(f64),
    /// A string literal
    Str(Arc<str>),
    /// Nil/empty
    Nil,
    /// An opaque caller value
    Grounded(Grounded),
}

/// The universal value matched and rewritten by the engine.
///
/// Sequence payloads are reference counted, so `clone` never deep-copies and
/// rewriting can hand back shared subterms.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(Atom),
    /// A pattern variable
    Var(Variable),
    /// An ordered, fixed-length list of terms
    Seq(Arc<[Term]>),
}

impl Term {
    pub fn sym(name: impl Into<Symbol>) -> Self {
        Term::Atom(Atom::Symbol(name.into()))
    }

    pub fn long(n: i64) -> Self {
        Term::Atom(Atom::Long(n))
    }

    pub fn float(x: f64) -> Self {
        Term::Atom(Atom::Float(x))
    }

    pub fn boolean(b: bool) -> Self {
        Term::Atom(Atom::Bool(b))
    }

    pub fn string(s: &str) -> Self {
        Term::Atom(Atom::Str(Arc::from(s)))
    }

    pub fn nil() -> Self {
        Term::Atom(Atom::Nil)
    }

    pub fn grounded<T: GroundedValue>(value: T) -> Self {
        Term::Atom(Atom::Grounded(Grounded::new(value)))
    }

    pub fn var(v: Variable) -> Self {
        Term::Var(v)
    }

    pub fn seq(items: impl IntoIterator<Item = Term>) -> Self {
        Term::Seq(items.into_iter().collect())
    }

    #[inline]
    pub fn is_seq(&self) -> bool {
        matches!(self, Term::Seq(_))
    }

    /// Ordered sub-terms of a sequence; `None` for atoms and variables
    #[inline]
    pub fn elements(&self) -> Option<&[Term]> {
        match self {
            Term::Seq(items) => Some(&items[..]),
            _ => None,
        }
    }

    #[inline]
    pub fn as_var(&self) -> Option<&Variable> {
        match self {
            Term::Var(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// Number of elements of a sequence, 0 otherwise
    pub fn arity(&self) -> usize {
        self.elements().map_or(0, <[Term]>::len)
    }

    /// Leading symbol: the first element of a sequence, or the symbol itself
    pub fn head_symbol(&self) -> Option<&Symbol> {
        match self {
            Term::Atom(Atom::Symbol(s)) => Some(s),
            Term::Seq(items) => match items.first() {
                Some(Term::Atom(Atom::Symbol(s))) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    /// True when the term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Atom(_) => true,
            Term::Seq(items) => items.iter().all(Term::is_ground),
        }
    }

    /// Reference identity for sequences and grounded values, value identity otherwise
    pub fn ptr_eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Seq(a), Term::Seq(b)) => Arc::ptr_eq(a, b),
            (Term::Atom(Atom::Grounded(a)), Term::Atom(Atom::Grounded(b))) => a.ptr_eq(b),
            (a, b) => a == b,
        }
    }
}

impl From<Atom> for Term {
    fn from(a: Atom) -> Self {
        Term::Atom(a)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Var(v)
    }
}

impl From<&Variable> for Term {
    fn from(v: &Variable) -> Self {
        Term::Var(v.clone())
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::sym(s)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::long(n)
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Term::long(i64::from(n))
    }
}

impl From<f64> for Term {
    fn from(x: f64) -> Self {
        Term::float(x)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::boolean(b)
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Term::Seq(items.into())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(s) => write!(f, "{}", s),
            Atom::Bool(b) => write!(f, "{}", b),
            Atom::Long(n) => write!(f, "{}", n),
            Atom::Float(x) => write!(f, "{:?}", x),
            Atom::Str(s) => write!(f, "{:?}", s),
            Atom::Nil => f.write_str("()"),
            Atom::Grounded(g) => write!(f, "{:?}", g),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, "{}", a),
            Term::Var(v) => write!(f, "{}", v),
            Term::Seq(items) => write!(f, "({})", items.iter().join(" ")),
        }
    }
}

/// Build a sequence term from anything convertible into [`Term`].
///
/// ```
/// use termrite::{seq, Term};
///
/// let t = seq!["a", "+", 1];
/// assert_eq!(t.to_string(), "(a + 1)");
/// assert_eq!(seq![], Term::seq(vec![]));
/// ```
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::Term::seq(::std::vec![$($crate::Term::from($item)),*])
    };
}
