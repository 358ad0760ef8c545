//! Frontend contract: entities, the parser and the action registry
//!
//! Concrete syntaxes (XML, YAML) live in their own crates and only need to
//! implement [`Entity`].

mod entity;
mod error;
mod parser;
mod registry;

pub use entity::*;
pub use error::*;
pub use parser::*;
pub use registry::*;
