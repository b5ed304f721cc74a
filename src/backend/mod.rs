// Backend module for term matching and rewriting
//
// - `models`: terms, variables, bindings, grounded atoms
// - `eval`: pattern matching, rewriting, rules, rule sets, normalization
// - `config`: TOML engine configuration

pub mod config;
pub mod errors;
pub mod eval;
pub mod models;
pub mod symbol;

pub use config::{EngineConfig, NormalizeConfig, Strategy};
pub use errors::{ConfigError, MatchError, NormalizeError};
pub use eval::*;
pub use models::*;
pub use symbol::{intern, Symbol};
