//! Constrained radial layout for a star graph of labeled shells.
//!
//! Placement is exact, not simulated: every related node gets a fixed angle
//! (even spacing, input order) and a center distance derived from clipping its
//! travel ray against the margin-inset canvas. One common edge length is used
//! for all nodes — the tightest-fitting shell decides it — so the diagram
//! stays visually balanced instead of letting one wide label orbit further
//! out than its neighbors.

use crate::geom::{Vector, vector};
use crate::sizing::SizedNode;
use crate::{RenderOptions, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutStrategy {
    /// Exact radial placement only.
    Radial,
    /// Radial placement refined by a bounded `limpet` relaxation pass.
    /// Resolves residual shell overlaps when label widths are very uneven.
    #[default]
    RadialRelaxed,
}

const EPS: f64 = 1e-9;

/// Distance from a shell's center to its own boundary along a unit direction:
/// `min(hw/|dx|, hh/|dy|)`, either term dropping out when its component is ~0.
fn shell_ray_offset(half_w: f64, half_h: f64, dir: Vector) -> f64 {
    let tx = if dir.x.abs() > EPS {
        half_w / dir.x.abs()
    } else {
        f64::INFINITY
    };
    let ty = if dir.y.abs() > EPS {
        half_h / dir.y.abs()
    } else {
        f64::INFINITY
    };
    let t = tx.min(ty);
    // Both components ~0 cannot happen for a unit direction.
    if t.is_finite() { t } else { 0.0 }
}

/// How far a shell center may travel from `(fx, fy)` along `dir` before the
/// shell's far edge crosses the margin rectangle, per axis and direction
/// sign. An axis the direction has no component on imposes no limit.
#[allow(clippy::too_many_arguments)]
fn max_center_distance(
    fx: f64,
    fy: f64,
    dir: Vector,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    half_w: f64,
    half_h: f64,
) -> f64 {
    let mut t = f64::INFINITY;
    if dir.x > EPS {
        t = t.min((max_x - half_w - fx) / dir.x);
    } else if dir.x < -EPS {
        t = t.min((min_x + half_w - fx) / dir.x);
    }
    if dir.y > EPS {
        t = t.min((max_y - half_h - fy) / dir.y);
    } else if dir.y < -EPS {
        t = t.min((min_y + half_h - fy) / dir.y);
    }
    if t.is_finite() { t.max(0.0) } else { 0.0 }
}

/// Ray offset of a sized node's shell along `dir`.
pub fn shell_ray_offset_for(node: &SizedNode, dir: Vector) -> f64 {
    shell_ray_offset(node.half_width(), node.half_height(), dir)
}

/// Positions every node in place and returns an id → slice-index lookup.
///
/// The focus shell sits at the canvas center. Related shells are evenly
/// spaced by angle starting at `options.start_angle`, each at the common
/// target edge length (clamped per node to its own canvas limit). Degenerate
/// canvases clamp distances to 0 — nodes collapse onto the focus — rather
/// than erroring.
pub fn layout_nodes(
    nodes: &mut [SizedNode],
    options: &RenderOptions,
) -> Result<FxHashMap<String, usize>> {
    let mut lookup: FxHashMap<String, usize> = FxHashMap::default();
    if nodes.is_empty() {
        return Ok(lookup);
    }

    let focus_idx = nodes.iter().position(|n| n.data.is_focus).unwrap_or(0);
    let cx = options.width / 2.0;
    let cy = options.height / 2.0;
    nodes[focus_idx].x = cx;
    nodes[focus_idx].y = cy;

    let related: Vec<usize> = (0..nodes.len()).filter(|&i| i != focus_idx).collect();
    if related.is_empty() {
        for (i, n) in nodes.iter().enumerate() {
            lookup.insert(n.data.id.clone(), i);
        }
        return Ok(lookup);
    }

    let min_x = options.canvas_margin;
    let min_y = options.canvas_margin;
    let max_x = options.width - options.canvas_margin;
    let max_y = options.height - options.canvas_margin;
    let focus_half_w = nodes[focus_idx].half_width();
    let focus_half_h = nodes[focus_idx].half_height();

    let n = related.len();
    struct Slot {
        node_idx: usize,
        dir: Vector,
        source_offset: f64,
        target_offset: f64,
        max_center: f64,
    }

    let mut slots: Vec<Slot> = Vec::with_capacity(n);
    for (k, &node_idx) in related.iter().enumerate() {
        let angle = options.start_angle + std::f64::consts::TAU * k as f64 / n as f64;
        let dir = vector(angle.cos(), angle.sin());
        let source_offset = shell_ray_offset(focus_half_w, focus_half_h, dir);
        let target_offset =
            shell_ray_offset(nodes[node_idx].half_width(), nodes[node_idx].half_height(), dir);
        let max_center = max_center_distance(
            cx,
            cy,
            dir,
            min_x,
            min_y,
            max_x,
            max_y,
            nodes[node_idx].half_width(),
            nodes[node_idx].half_height(),
        );
        slots.push(Slot {
            node_idx,
            dir,
            source_offset,
            target_offset,
            max_center,
        });
    }

    // The tightest-fitting node decides the common edge length: none may
    // overflow, and edges stay as long as the canvas allows up to the
    // preference.
    let max_common_edge = slots
        .iter()
        .map(|s| (s.max_center - s.source_offset - s.target_offset).max(0.0))
        .fold(f64::INFINITY, f64::min);
    let target_edge = options.preferred_edge_length().min(max_common_edge);

    for slot in &slots {
        let distance = (target_edge + slot.source_offset + slot.target_offset).min(slot.max_center);
        let node = &mut nodes[slot.node_idx];
        node.x = cx + slot.dir.x * distance;
        node.y = cy + slot.dir.y * distance;
    }

    if options.strategy == LayoutStrategy::RadialRelaxed {
        relax(nodes, focus_idx, options)?;
    }

    for (i, n) in nodes.iter().enumerate() {
        lookup.insert(n.data.id.clone(), i);
    }
    Ok(lookup)
}

/// Hands the exact placement to `limpet` for a bounded refinement pass. Each
/// edge's ideal length is the distance the exact pass chose, so relaxation
/// only redistributes local overlap instead of re-deriving the orbit.
fn relax(nodes: &mut [SizedNode], focus_idx: usize, options: &RenderOptions) -> Result<()> {
    let focus_id = nodes[focus_idx].data.id.clone();
    let (fx, fy) = (nodes[focus_idx].x, nodes[focus_idx].y);

    let graph = limpet::Graph {
        nodes: nodes
            .iter()
            .enumerate()
            .map(|(i, n)| limpet::Node {
                id: n.data.id.clone(),
                width: n.shell_width,
                height: n.shell_height,
                collision_radius: n.collision_radius(),
                x: n.x,
                y: n.y,
                pinned: i == focus_idx,
            })
            .collect(),
        edges: nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != focus_idx)
            .map(|(_, n)| limpet::Edge {
                id: seastar_core::pair_key(&focus_id, &n.data.id),
                source: focus_id.clone(),
                target: n.data.id.clone(),
                ideal_length: (n.x - fx).hypot(n.y - fy),
            })
            .collect(),
    };

    let opts = limpet::RelaxOptions {
        bounds: Some(limpet::Bounds {
            min_x: options.canvas_margin,
            min_y: options.canvas_margin,
            max_x: options.width - options.canvas_margin,
            max_y: options.height - options.canvas_margin,
        }),
        ..Default::default()
    };
    let result = limpet::layout(&graph, &opts)?;

    for n in nodes.iter_mut() {
        if let Some(p) = result.positions.get(n.data.id.as_str()) {
            n.x = p.x;
            n.y = p.y;
        }
    }
    Ok(())
}
