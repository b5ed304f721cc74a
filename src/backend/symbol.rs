//! Symbol names for symbolic atoms and named variables.
//!
//! With the `symbol-interning` feature, `Symbol` is a 4-byte key into a global
//! lasso `ThreadedRodeo`, so equality is an integer comparison.
//!
//! Without the feature, `Symbol` wraps an `Arc<str>`: cloning is a reference
//! count increment and equality compares the string contents.
//!
//! ```
//! use termrite::backend::symbol::{intern, Symbol};
//!
//! let a = intern("plus");
//! let b = Symbol::new("plus");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "plus");
//! ```

use std::fmt;

#[cfg(feature = "symbol-interning")]
mod repr {
    use lasso::{Spur, ThreadedRodeo};
    use std::sync::OnceLock;

    static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

    #[inline]
    fn interner() -> &'static ThreadedRodeo {
        INTERNER.get_or_init(ThreadedRodeo::new)
    }

    /// Interned symbol - 4 bytes, O(1) comparison
    #[derive(Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Symbol(Spur);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn as_str(&self) -> &'static str {
            interner().resolve(&self.0)
        }
    }
}

#[cfg(not(feature = "symbol-interning"))]
mod repr {
    use std::sync::Arc;

    /// Shared string symbol
    #[derive(Clone, Eq, PartialEq, Hash)]
    pub struct Symbol(Arc<str>);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(Arc::from(s))
        }

        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(Arc::from(s))
        }

        #[inline]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }
}

pub use repr::Symbol;

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    #[inline]
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    #[inline]
    fn from(s: String) -> Self {
        Symbol::from_string(s)
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Intern a string and return a Symbol
#[inline]
pub fn intern(s: &str) -> Symbol {
    Symbol::new(s)
}
