//! Prefab value synthesis for contract-verification fixtures.
//!
//! Given a [`TypeTag`] describing an arbitrary, possibly-generic, possibly-
//! recursive type, [`PrefabValues`] produces two guaranteed-distinguishable
//! sample instances of it: "red" and "black". Synthesis traverses the type's
//! structure through the caller-built universe, detects cyclic type graphs
//! instead of overflowing the stack, and snapshots every global it touches so
//! a run can be rolled back afterwards.

pub mod builtins;
mod conditional;
mod engine;
mod errors;
mod factory;
mod stash;
mod store;
mod synth;
mod type_tag;

pub use conditional::ConditionalBuilder;
pub use engine::PrefabValues;
pub use errors::PrefabError;
pub use factory::{MapFactory, PrefabFactory, SequenceFactory, SyncCellFactory};
pub use stash::StaticStash;
pub use store::{PrefabStore, Tuple};
pub use type_tag::TypeTag;
