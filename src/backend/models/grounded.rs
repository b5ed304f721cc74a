//! Opaque caller values embedded in terms.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A caller-supplied value carried through matching and rewriting untouched.
///
/// Implemented for every `PartialEq + Debug + Send + Sync + 'static` type.
/// Values of different Rust types never compare equal.
pub trait GroundedValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_grounded(&self, other: &dyn GroundedValue) -> bool;
}

impl<T> GroundedValue for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_grounded(&self, other: &dyn GroundedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Shared handle to a grounded value
#[derive(Clone)]
pub struct Grounded(Arc<dyn GroundedValue>);

impl Grounded {
    pub fn new<T: GroundedValue>(value: T) -> Self {
        Grounded(Arc::new(value))
    }

    /// Borrow the wrapped value as `T`, if that is its type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    /// True when both handles point at the same allocation
    #[inline]
    pub fn ptr_eq(&self, other: &Grounded) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for Grounded {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.eq_grounded(&*other.0)
    }
}

impl fmt::Debug for Grounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grounded({:?})", self.0)
    }
}
