use crate::error::Result;
use crate::graph::{Bounds, Graph, LayoutResult, Point};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct RelaxOptions {
    /// Discrete step budget. The pass always runs exactly this many steps; it
    /// does not test for convergence, so cost is bounded and deterministic.
    pub iterations: usize,
    /// Strength of the pull toward the target orbit radius around the pinned
    /// node, per step, in `[0, 1]`.
    pub radial_strength: f64,
    /// Strength of the per-edge spring toward `Edge::ideal_length`.
    pub link_strength: f64,
    /// Fraction of a detected circle overlap resolved per step.
    pub separation_strength: f64,
    /// Target orbit radius for the radial force. When `None`, the mean of the
    /// edge ideal lengths is used.
    pub orbit_radius: Option<f64>,
    /// When set, shell centers are clamped into this rectangle (inset by each
    /// node's half extents) after every step.
    pub bounds: Option<Bounds>,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            iterations: 120,
            radial_strength: 0.15,
            link_strength: 0.05,
            separation_strength: 0.5,
            orbit_radius: None,
            bounds: None,
        }
    }
}

#[derive(Debug, Clone)]
struct SimNode {
    id: String,
    half_w: f64,
    half_h: f64,
    radius: f64,
    x: f64,
    y: f64,
    fx: f64,
    fy: f64,
    pinned: bool,
}

/// Direction used when two centers coincide and no force direction exists.
/// Derived from node indices so the escape is reproducible.
fn tie_break_unit(i: usize, j: usize, n: usize) -> (f64, f64) {
    let slots = (n * n).max(1);
    let angle = std::f64::consts::TAU * ((i * n + j) % slots) as f64 / slots as f64;
    (angle.cos(), angle.sin())
}

pub fn layout(graph: &Graph, opts: &RelaxOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let mut nodes: Vec<SimNode> = graph
        .nodes
        .iter()
        .map(|n| SimNode {
            id: n.id.clone(),
            half_w: n.width.max(0.0) / 2.0,
            half_h: n.height.max(0.0) / 2.0,
            radius: n.collision_radius.max(0.0),
            x: n.x,
            y: n.y,
            fx: 0.0,
            fy: 0.0,
            pinned: n.pinned,
        })
        .collect();

    let index_of: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let anchor = nodes.iter().position(|n| n.pinned);

    let orbit_radius = opts.orbit_radius.unwrap_or_else(|| {
        if graph.edges.is_empty() {
            0.0
        } else {
            graph.edges.iter().map(|e| e.ideal_length).sum::<f64>() / graph.edges.len() as f64
        }
    });

    let n_count = nodes.len();
    for _step in 0..opts.iterations {
        for n in nodes.iter_mut() {
            n.fx = 0.0;
            n.fy = 0.0;
        }

        // Radial attraction toward the target orbit around the pinned anchor.
        if let Some(anchor_idx) = anchor {
            let (ax, ay) = (nodes[anchor_idx].x, nodes[anchor_idx].y);
            for (i, n) in nodes.iter_mut().enumerate() {
                if n.pinned {
                    continue;
                }
                let dx = n.x - ax;
                let dy = n.y - ay;
                let dist = (dx * dx + dy * dy).sqrt();
                let (ux, uy) = if dist > f64::EPSILON {
                    (dx / dist, dy / dist)
                } else {
                    tie_break_unit(anchor_idx, i, n_count)
                };
                let delta = orbit_radius - dist;
                n.fx += ux * delta * opts.radial_strength;
                n.fy += uy * delta * opts.radial_strength;
            }
        }

        // Link springs toward each edge's ideal length.
        for e in &graph.edges {
            let (si, ti) = (index_of[e.source.as_str()], index_of[e.target.as_str()]);
            if si == ti {
                continue;
            }
            let dx = nodes[ti].x - nodes[si].x;
            let dy = nodes[ti].y - nodes[si].y;
            let dist = (dx * dx + dy * dy).sqrt();
            let (ux, uy) = if dist > f64::EPSILON {
                (dx / dist, dy / dist)
            } else {
                tie_break_unit(si, ti, n_count)
            };
            let stretch = dist - e.ideal_length;
            let f = stretch * opts.link_strength;
            match (nodes[si].pinned, nodes[ti].pinned) {
                (false, false) => {
                    nodes[si].fx += ux * f / 2.0;
                    nodes[si].fy += uy * f / 2.0;
                    nodes[ti].fx -= ux * f / 2.0;
                    nodes[ti].fy -= uy * f / 2.0;
                }
                (false, true) => {
                    nodes[si].fx += ux * f;
                    nodes[si].fy += uy * f;
                }
                (true, false) => {
                    nodes[ti].fx -= ux * f;
                    nodes[ti].fy -= uy * f;
                }
                (true, true) => {}
            }
        }

        // Pairwise circle separation. Pairs are visited in index order so the
        // accumulated forces are reproducible.
        for i in 0..n_count {
            for j in (i + 1)..n_count {
                let dx = nodes[j].x - nodes[i].x;
                let dy = nodes[j].y - nodes[i].y;
                let dist = (dx * dx + dy * dy).sqrt();
                let min_dist = nodes[i].radius + nodes[j].radius;
                if dist >= min_dist {
                    continue;
                }
                let (ux, uy) = if dist > f64::EPSILON {
                    (dx / dist, dy / dist)
                } else {
                    tie_break_unit(i, j, n_count)
                };
                let push = (min_dist - dist) * opts.separation_strength;
                match (nodes[i].pinned, nodes[j].pinned) {
                    (false, false) => {
                        nodes[i].fx -= ux * push / 2.0;
                        nodes[i].fy -= uy * push / 2.0;
                        nodes[j].fx += ux * push / 2.0;
                        nodes[j].fy += uy * push / 2.0;
                    }
                    (false, true) => {
                        nodes[i].fx -= ux * push;
                        nodes[i].fy -= uy * push;
                    }
                    (true, false) => {
                        nodes[j].fx += ux * push;
                        nodes[j].fy += uy * push;
                    }
                    (true, true) => {}
                }
            }
        }

        for n in nodes.iter_mut() {
            if n.pinned {
                continue;
            }
            n.x += n.fx;
            n.y += n.fy;
            if let Some(b) = opts.bounds {
                n.x = clamp_axis(n.x, b.min_x + n.half_w, b.max_x - n.half_w);
                n.y = clamp_axis(n.y, b.min_y + n.half_h, b.max_y - n.half_h);
            }
        }
    }

    let mut positions: std::collections::BTreeMap<String, Point> =
        std::collections::BTreeMap::new();
    for n in &nodes {
        positions.insert(n.id.clone(), Point { x: n.x, y: n.y });
    }
    Ok(LayoutResult { positions })
}

/// Clamp with an inverted range collapsing to its midpoint (shell wider than
/// the available span).
fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
    if min > max {
        (min + max) / 2.0
    } else {
        v.clamp(min, max)
    }
}
