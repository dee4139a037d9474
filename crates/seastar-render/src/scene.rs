//! Positioned, icon-resolved scene model: everything the SVG writer and a
//! host's interaction layer need, with no drawing concern of its own.

use crate::icons;
use crate::layout::layout_nodes;
use crate::sizing::{SizedNode, size_nodes};
use crate::{RenderOptions, Result, ensure_surface};
use seastar_core::{GraphNode, RelationshipGraph};
use serde::Serialize;

/// Radius of the circular link/add badge on non-focus shells.
pub const NODE_BADGE_RADIUS: f64 = 10.0;
/// Radius of the provenance badge at each edge midpoint.
pub const EDGE_BADGE_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeBadgeKind {
    /// `record_id` present: navigates to the linked CRM record.
    Link,
    /// Unmatched entity: offers record creation.
    Add,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBadge {
    pub kind: NodeBadgeKind,
    pub icon_url: Option<String>,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub data: GraphNode,
    pub label: String,
    /// Shell center.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
    pub icon_url: Option<String>,
    pub badge: Option<NodeBadge>,
}

impl SceneNode {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x - self.width / 2.0
            && x <= self.x + self.width / 2.0
            && y >= self.y - self.height / 2.0
            && y <= self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    pub is_crm_link: bool,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub badge_icon_url: Option<String>,
}

impl SceneEdge {
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Visible length between the endpoint centers.
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// A fully positioned render pass. Rebuilt from scratch on every call to
/// [`build_scene`]; nothing here survives a re-render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Topmost node whose shell contains the point. Nodes are drawn in order,
    /// so the last hit wins.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.contains(x, y))
            .map(|n| &n.data)
    }

    /// Hit-tests a click and forwards the node's full data record to the
    /// configured callback. Returns the hit node either way so hosts without
    /// a callback can route the click themselves.
    pub fn dispatch_click(&self, x: f64, y: f64, options: &RenderOptions) -> Option<&GraphNode> {
        let node = self.node_at(x, y)?;
        if let Some(cb) = options.on_node_click.as_ref() {
            cb(node);
        }
        Some(node)
    }
}

/// Sizes, lays out, and decorates the graph into a [`Scene`].
pub fn build_scene(graph: &RelationshipGraph, options: &RenderOptions) -> Result<Scene> {
    ensure_surface(options.width, options.height)?;

    let mut sized = size_nodes(graph, options);
    let lookup = layout_nodes(&mut sized, options)?;

    let resolver = options.icon_resolver.as_ref();
    let nodes: Vec<SceneNode> = sized
        .iter()
        .map(|n| {
            let badge = (!n.data.is_focus).then(|| {
                let kind = if n.data.record_id.is_some() {
                    NodeBadgeKind::Link
                } else {
                    NodeBadgeKind::Add
                };
                let icon_id = match kind {
                    NodeBadgeKind::Link => icons::ICON_LINK,
                    NodeBadgeKind::Add => icons::ICON_ADD,
                };
                NodeBadge {
                    kind,
                    icon_url: resolver.resolve_icon_url(icon_id),
                    cx: n.x + n.half_width() - options.shell_padding / 2.0 - NODE_BADGE_RADIUS,
                    cy: n.y,
                    radius: NODE_BADGE_RADIUS,
                }
            });
            SceneNode {
                data: n.data.clone(),
                label: n.display_label.clone(),
                x: n.x,
                y: n.y,
                width: n.shell_width,
                height: n.shell_height,
                border_radius: options.shell_border_radius,
                icon_url: resolver.resolve_icon_url(icons::node_icon(&n.data)),
                badge,
            }
        })
        .collect();

    let edges: Vec<SceneEdge> = graph
        .links
        .iter()
        .filter_map(|link| {
            let source = sized.get(*lookup.get(link.source.as_str())?)?;
            let target = sized.get(*lookup.get(link.target.as_str())?)?;
            let badge_icon = if link.is_crm_link {
                icons::ICON_SOURCE_CRM
            } else {
                icons::ICON_SOURCE_WEB
            };
            Some(SceneEdge {
                source: link.source.clone(),
                target: link.target.clone(),
                is_crm_link: link.is_crm_link,
                x1: source.x,
                y1: source.y,
                x2: target.x,
                y2: target.y,
                badge_icon_url: resolver.resolve_icon_url(badge_icon),
            })
        })
        .collect();

    Ok(Scene {
        width: options.width,
        height: options.height,
        nodes,
        edges,
    })
}

/// Visible edge length for layout assertions: center distance minus both
/// shells' ray offsets toward each other.
pub fn visible_edge_length(source: &SizedNode, target: &SizedNode) -> f64 {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    let dist = dx.hypot(dy);
    if dist <= f64::EPSILON {
        return 0.0;
    }
    let dir = crate::geom::vector(dx / dist, dy / dist);
    let src = crate::layout::shell_ray_offset_for(source, dir);
    let tgt = crate::layout::shell_ray_offset_for(target, dir);
    (dist - src - tgt).max(0.0)
}
