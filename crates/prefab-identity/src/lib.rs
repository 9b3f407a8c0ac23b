//! First-class identity types for the modeled type universe.
//!
//! These types provide type-safe identifiers for types, fields, and interned
//! names, eliminating string-based lookups and preventing mix-ups between
//! different entity kinds.

mod entities;
mod names;

pub use entities::{FieldId, NameId, TypeDefId};
pub use names::NameTable;

use smallvec::SmallVec;

/// Short list of type ids, inline up to four entries.
///
/// Parameter-type lists and interface lists are almost always this short, so
/// the common case never touches the heap.
pub type TypeIdVec = SmallVec<[TypeDefId; 4]>;
