//! Synthesis errors (P0xxx).

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum PrefabError {
    /// A type graph cycled back to a tag currently being synthesized.
    /// `chain` lists every tag encountered on the way, in traversal order.
    #[error("recursive data structure; add prefab values for one of: {}", .chain.join(", "))]
    #[diagnostic(
        code(P0001),
        help("pre-register a tuple for one type in the cycle, then request the cyclic type again")
    )]
    Recursion { chain: Vec<String> },

    #[error("enum {name} has no constants to draw values from")]
    #[diagnostic(code(P0002))]
    EnumHasNoElements { name: String },

    #[error("type does not match value: expected {expected}, found {found}")]
    #[diagnostic(code(P0003))]
    TypeMismatch { expected: String, found: String },

    /// An internal invariant was violated. Never expected in a correctly
    /// assembled engine; not recoverable.
    #[error("internal defect: {detail}")]
    #[diagnostic(
        code(P0004),
        help("this indicates a wiring defect in the engine's bundled configuration")
    )]
    Bug { detail: String },
}
