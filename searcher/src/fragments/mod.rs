//! Reusable query body fragments.
//!
//! A fragment is a named chunk of query DSL registered once and referenced
//! from any body with a `{"$fragment": "<name>"}` marker. References are
//! expanded by the [`FragmentParser`] when a query is assembled.

mod builtin;
mod parser;
mod registry;

pub use builtin::{Bool, Exists, Ids, Match, Range, Term, Terms};
pub use parser::FragmentParser;
pub use registry::{fragment_ref, Fragment, FragmentRegistry, FRAGMENT_KEY};
