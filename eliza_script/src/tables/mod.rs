//! Lookup tables consulted while compiling patterns and normalizing input.
//!
//! - **Tags**: named sets of interchangeable words referenced as `@name` in patterns
//! - **Substitutions**: per-word rewrites applied to the input before matching

mod substitution;
mod tag;

pub use substitution::*;
pub use tag::*;
