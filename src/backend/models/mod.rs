pub mod bindings;
pub mod grounded;
pub mod term;
pub mod variable;

pub use bindings::{Bindings, Snapshot};
pub use grounded::{Grounded, GroundedValue};
pub use term::{Atom, Term};
pub use variable::{VarFactory, VarId, Variable};
