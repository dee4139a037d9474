#![forbid(unsafe_code)]

//! Relationship-envelope validation + star-graph data model (headless).
//!
//! Design goals:
//! - a loosely-typed external envelope never panics or errors its way into the
//!   graph: invalid input degrades to an empty graph, bad entries are skipped
//!   and logged
//! - deterministic, testable output (same envelope + overrides → structurally
//!   identical node/edge sets, same order)
//! - no rendering concern: the `{nodes, links}` model is the only contract the
//!   surrounding application depends on

pub mod builder;
pub mod envelope;
pub mod error;
pub mod graph;

pub use builder::{BuildOverrides, MAX_RELATED_NODES, build_graph};
pub use envelope::{
    AnchorEntity, RelatedEntity, RelationshipEnvelope, SUPPORTED_SCHEMA_VERSION, parse_envelope,
};
pub use error::{Error, Result};
pub use graph::{EntitySource, GraphLink, GraphNode, RelationshipGraph, pair_key};

#[cfg(test)]
mod tests;
