use crate::RenderOptions;
use crate::text::{TextStyle, measure_or_estimate};
use seastar_core::{GraphNode, RelationshipGraph};

/// Extra width reserved at the right edge of non-focus shells for the
/// circular link/add badge button. The focus shell carries no badge.
pub const BADGE_RESERVE: f64 = 26.0;

/// Added to the circumscribing half-extent when deriving the collision
/// radius used by the relaxation pass.
pub const COLLISION_MARGIN: f64 = 6.0;

/// A graph node plus its measured shell box and, after layout, its center.
#[derive(Debug, Clone)]
pub struct SizedNode {
    pub data: GraphNode,
    /// Truncated display label actually drawn inside the shell.
    pub display_label: String,
    pub shell_width: f64,
    pub shell_height: f64,
    pub x: f64,
    pub y: f64,
}

impl SizedNode {
    pub fn half_width(&self) -> f64 {
        self.shell_width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.shell_height / 2.0
    }

    /// Circle radius enclosing the shell, for the relaxation pass only.
    pub fn collision_radius(&self) -> f64 {
        self.half_width().max(self.half_height()) + COLLISION_MARGIN
    }
}

/// Truncates a label to `max_chars` chars, appending an ellipsis when it was
/// cut. Char-based, not byte-based, so multi-byte labels never split.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Measures every node's shell box. Positions are initialized to the origin
/// and filled in by the layout engine.
pub fn size_nodes(graph: &RelationshipGraph, options: &RenderOptions) -> Vec<SizedNode> {
    let style = TextStyle::default();
    graph
        .nodes
        .iter()
        .map(|node| {
            let display_label = truncate_label(&node.label, options.max_label_chars);
            let metrics =
                measure_or_estimate(options.text_measurer.as_ref(), &display_label, &style);
            let badge_reserve = if node.is_focus { 0.0 } else { BADGE_RESERVE };
            let shell_width = options.shell_padding
                + options.icon_size
                + options.icon_text_gap
                + metrics.width.max(0.0)
                + options.shell_padding
                + badge_reserve;
            SizedNode {
                data: node.clone(),
                display_label,
                shell_width,
                shell_height: options.shell_height,
                x: 0.0,
                y: 0.0,
            }
        })
        .collect()
}
