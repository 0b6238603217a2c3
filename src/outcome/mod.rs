//! Error-propagating containers for chaining fallible steps
//!
//! Two independent takes on the same idea:
//! - [`Outcome`] is immutable and chains with `bind`, which may change the
//!   success type at every step and stops at the first failure.
//! - [`MutableOutcome`] keeps its success payload in a shared cell and
//!   edits it in place with `in_place_bind` / `read_only_bind`.

pub mod mutable;
pub mod result;

pub use mutable::MutableOutcome;
pub use result::Outcome;
