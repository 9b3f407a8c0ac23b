//! The modeled runtime environment the synthesis engine introspects.
//!
//! A [`Universe`] holds the type schemas, static field cells, and dynamic
//! construction capabilities for one verification run. Values of the modeled
//! universe are represented by the dynamic [`Value`] enum with structural
//! equality throughout.

mod construct;
mod schema;
mod universe;
mod value;

pub use construct::{Constructors, CtorFn};
pub use schema::{FieldDef, FieldSpec, TypeDef, TypeKind};
pub use universe::{Primitives, Universe};
pub use value::Value;
