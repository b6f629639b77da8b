//! Shared data structures for Storyline.
//! FxHashMap, insertion-ordered Fx sets, the (object, verb) visit pair.

pub mod collections;
pub mod visit;

pub use collections::{FxHashMap, FxHashSet, FxIndexSet};
pub use visit::Visit;
