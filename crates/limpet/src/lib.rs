#![forbid(unsafe_code)]

//! Headless bounded force relaxation for small star-topology graphs.
//!
//! `limpet` is used by `seastar-render` as a drop-in refinement pass over an
//! already-computed radial placement: a fixed number of discrete relaxation
//! steps (radial attraction, pairwise circle separation, weak link springs),
//! then positions freeze. It is not a live physics simulation: the iteration
//! budget bounds cost, and identical inputs always produce identical output.

pub mod error;
pub mod graph;
pub mod relax;

pub use error::{Error, Result};
pub use graph::{Bounds, Edge, Graph, LayoutResult, Node, Point};
pub use relax::RelaxOptions;

/// Headless relaxation entry point.
pub fn layout(graph: &Graph, opts: &RelaxOptions) -> Result<LayoutResult> {
    relax::layout(graph, opts)
}
