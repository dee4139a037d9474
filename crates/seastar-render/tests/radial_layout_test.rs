use seastar_core::{
    AnchorEntity, BuildOverrides, RelatedEntity, RelationshipEnvelope, RelationshipGraph,
    SUPPORTED_SCHEMA_VERSION, build_graph,
};
use seastar_render::layout::{LayoutStrategy, layout_nodes, shell_ray_offset_for};
use seastar_render::sizing::{SizedNode, size_nodes};
use seastar_render::{RenderOptions, geom};

fn graph_with_labels(labels: &[&str]) -> RelationshipGraph {
    let related_entities = labels
        .iter()
        .map(|label| RelatedEntity {
            entity_name: label.to_string(),
            predicate: "related to".to_string(),
            ..Default::default()
        })
        .collect();
    let envelope = RelationshipEnvelope {
        schema_version: SUPPORTED_SCHEMA_VERSION.to_string(),
        anchor_entity: AnchorEntity {
            entity_name: "Acme Corp".to_string(),
            ..Default::default()
        },
        related_entities,
    };
    build_graph(&envelope, &BuildOverrides::default())
}

fn laid_out(labels: &[&str], options: &RenderOptions) -> Vec<SizedNode> {
    let graph = graph_with_labels(labels);
    let mut nodes = size_nodes(&graph, options);
    layout_nodes(&mut nodes, options).unwrap();
    nodes
}

fn assert_in_bounds(nodes: &[SizedNode], options: &RenderOptions) {
    let tol = 1e-6;
    for n in nodes {
        let left = n.x - n.half_width();
        let right = n.x + n.half_width();
        let top = n.y - n.half_height();
        let bottom = n.y + n.half_height();
        assert!(
            left >= options.canvas_margin - tol
                && right <= options.width - options.canvas_margin + tol
                && top >= options.canvas_margin - tol
                && bottom <= options.height - options.canvas_margin + tol,
            "shell of {:?} out of bounds: [{left}, {top}] .. [{right}, {bottom}]",
            n.data.id,
        );
    }
}

fn visible_length(focus: &SizedNode, node: &SizedNode) -> f64 {
    let dx = node.x - focus.x;
    let dy = node.y - focus.y;
    let dist = dx.hypot(dy);
    if dist <= f64::EPSILON {
        return 0.0;
    }
    let dir = geom::vector(dx / dist, dy / dist);
    (dist - shell_ray_offset_for(focus, dir) - shell_ray_offset_for(node, dir)).max(0.0)
}

/// Circular order of related nodes by angle around the focus.
fn angular_order(nodes: &[SizedNode], options: &RenderOptions) -> Vec<String> {
    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();
    let mut related: Vec<(f64, String)> = nodes
        .iter()
        .filter(|n| !n.data.is_focus)
        .map(|n| {
            let angle = (n.y - focus.y).atan2(n.x - focus.x);
            // Normalize so the configured start angle is 0 and order is the
            // placement sweep direction.
            let rel = (angle - options.start_angle).rem_euclid(std::f64::consts::TAU);
            (rel, n.data.id.clone())
        })
        .collect();
    related.sort_by(|a, b| a.0.total_cmp(&b.0));
    related.into_iter().map(|(_, id)| id).collect()
}

#[test]
fn focus_sits_at_canvas_center() {
    let options = RenderOptions::default().with_strategy(LayoutStrategy::Radial);
    let nodes = laid_out(&["Beta Inc", "Gamma LLC"], &options);
    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();
    assert_eq!((focus.x, focus.y), (options.width / 2.0, options.height / 2.0));
}

#[test]
fn all_shells_stay_inside_the_margined_canvas() {
    let labels = [
        "Beta Inc",
        "Gamma Logistics Holding Company",
        "Dora Jones",
        "Epsilon Heavy Industries Worldwide",
        "Zed",
        "Eta Maritime and Overland Freight",
        "Theta Capital",
        "Iota Research Lab",
    ];
    for strategy in [LayoutStrategy::Radial, LayoutStrategy::RadialRelaxed] {
        let options = RenderOptions::default()
            .with_size(900.0, 700.0)
            .with_strategy(strategy);
        let nodes = laid_out(&labels, &options);
        assert_in_bounds(&nodes, &options);
    }
}

#[test]
fn angular_ordering_matches_input_order() {
    let labels = ["First", "Second", "Third", "Fourth", "Fifth", "Sixth"];
    let options = RenderOptions::default().with_strategy(LayoutStrategy::Radial);
    let nodes = laid_out(&labels, &options);
    assert_eq!(angular_order(&nodes, &options), labels.to_vec());
}

#[test]
fn relaxation_preserves_angular_ordering_on_well_spread_input() {
    let labels = ["First", "Second", "Third", "Fourth", "Fifth"];
    let options = RenderOptions::default()
        .with_size(900.0, 700.0)
        .with_strategy(LayoutStrategy::RadialRelaxed);
    let nodes = laid_out(&labels, &options);
    assert_eq!(angular_order(&nodes, &options), labels.to_vec());
    assert_in_bounds(&nodes, &options);
}

#[test]
fn edges_share_one_visible_length_when_unclamped() {
    let labels = ["Node One", "Node Two", "Node Three", "Node Four", "Node Five"];
    let options = RenderOptions::default().with_strategy(LayoutStrategy::Radial);
    let nodes = laid_out(&labels, &options);
    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();

    let lengths: Vec<f64> = nodes
        .iter()
        .filter(|n| !n.data.is_focus)
        .map(|n| visible_length(focus, n))
        .collect();
    // Default canvas comfortably fits these labels, so the preferred edge
    // length wins for every node.
    for len in &lengths {
        assert!(
            (len - options.preferred_edge_length()).abs() < 1e-6,
            "visible length {len} != preferred {}",
            options.preferred_edge_length()
        );
    }
}

#[test]
fn tight_canvas_shrinks_every_edge_to_the_tightest_node() {
    // One oversized label shortens the common edge length for all nodes.
    let labels = ["Short", "An Extremely Verbose Label", "Tiny"];
    let options = RenderOptions::default()
        .with_size(420.0, 300.0)
        .with_strategy(LayoutStrategy::Radial);
    let nodes = laid_out(&labels, &options);
    assert_in_bounds(&nodes, &options);

    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();
    let lengths: Vec<f64> = nodes
        .iter()
        .filter(|n| !n.data.is_focus)
        .map(|n| visible_length(focus, n))
        .collect();
    let common = lengths[0];
    assert!(common < options.preferred_edge_length());
    for len in &lengths {
        // Uniform except where a node's own canvas limit clamps it shorter.
        assert!(*len <= common + 1e-6);
    }
}

#[test]
fn very_long_label_on_a_small_canvas_stays_inside_margins() {
    let long_label = "x".repeat(60);
    let mut options = RenderOptions::default()
        .with_size(200.0, 200.0)
        .with_strategy(LayoutStrategy::Radial);
    options.max_label_chars = 10;
    let nodes = laid_out(&[long_label.as_str()], &options);
    assert_in_bounds(&nodes, &options);

    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();
    let related = nodes.iter().find(|n| !n.data.is_focus).unwrap();
    let len = visible_length(focus, related);
    assert!(
        len < options.preferred_edge_length(),
        "edge did not shrink: {len}"
    );
}

#[test]
fn degenerate_canvas_collapses_distances_to_zero() {
    let options = RenderOptions::default()
        .with_size(10.0, 10.0)
        .with_strategy(LayoutStrategy::Radial);
    let nodes = laid_out(&["Beta Inc", "Gamma LLC"], &options);
    let focus = nodes.iter().find(|n| n.data.is_focus).unwrap();
    for n in nodes.iter().filter(|n| !n.data.is_focus) {
        let dist = (n.x - focus.x).hypot(n.y - focus.y);
        assert!(dist < 1e-9, "expected collapse onto focus, got {dist}");
    }
}

#[test]
fn focus_only_graph_positions_just_the_focus() {
    // Self-reference: the only related entry collapses onto the anchor.
    let graph = graph_with_labels(&["Acme Corp"]);
    assert_eq!(graph.nodes.len(), 1);
    let options = RenderOptions::default();
    let mut nodes = size_nodes(&graph, &options);
    let lookup = layout_nodes(&mut nodes, &options).unwrap();
    assert_eq!(lookup.len(), 1);
    assert_eq!(nodes[0].x, options.width / 2.0);
}

#[test]
fn layout_is_deterministic_across_runs() {
    let labels = ["Beta Inc", "Gamma Logistics Holding Company", "Dora Jones"];
    for strategy in [LayoutStrategy::Radial, LayoutStrategy::RadialRelaxed] {
        let options = RenderOptions::default().with_strategy(strategy);
        let a = laid_out(&labels, &options);
        let b = laid_out(&labels, &options);
        for (na, nb) in a.iter().zip(&b) {
            assert_eq!((na.x, na.y), (nb.x, nb.y), "jitter on {:?}", na.data.id);
        }
    }
}

#[test]
fn relaxation_does_not_worsen_shell_overlap() {
    let labels = [
        "Alpha Conglomerated Industries",
        "Beta Continental Logistics Co",
        "Gamma Worldwide Manufacturing",
        "Delta Integrated Solutions Inc",
        "Epsilon Global Services Group",
        "Zeta International Holdings",
        "Eta Consolidated Enterprises",
        "Theta Unified Operations Ltd",
    ];
    let exact = laid_out(
        &labels,
        &RenderOptions::default().with_strategy(LayoutStrategy::Radial),
    );
    let relaxed_options = RenderOptions::default().with_strategy(LayoutStrategy::RadialRelaxed);
    let relaxed = laid_out(&labels, &relaxed_options);

    fn total_overlap(nodes: &[SizedNode]) -> f64 {
        let mut sum = 0.0;
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let min_dist = nodes[i].collision_radius() + nodes[j].collision_radius();
                let dist = (nodes[i].x - nodes[j].x).hypot(nodes[i].y - nodes[j].y);
                sum += (min_dist - dist).max(0.0);
            }
        }
        sum
    }

    assert!(total_overlap(&relaxed) <= total_overlap(&exact) + 1e-6);
    assert_in_bounds(&relaxed, &relaxed_options);
}
