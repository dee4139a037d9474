//! Headless SVG emission for a positioned [`Scene`](crate::scene::Scene).
//!
//! Every call emits a complete document from scratch — the "clear" operation
//! of an incremental canvas is re-emission here, which makes re-rendering
//! idempotent by construction.

use crate::scene::{NodeBadgeKind, Scene, SceneEdge, SceneNode};
use crate::{RenderOptions, Result, ensure_surface};
use std::fmt::Write as _;

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Stringifies a coordinate without `-0` or tiny float noise.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Conservative `id` token for the `<svg>` root, so multiple diagrams can be
/// inlined in one host document without id collisions.
fn sanitize_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "relationship-graph".to_string();
    }
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }
    if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        out.insert_str(0, "g-");
    }
    out
}

pub fn render_scene_svg(scene: &Scene, options: &RenderOptions) -> Result<String> {
    ensure_surface(scene.width, scene.height)?;

    let diagram_id = sanitize_id(options.diagram_id.as_deref().unwrap_or("relationship-graph"));

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" role="graphics-document document" aria-roledescription="relationshipGraph">"#,
        id = escape_xml(&diagram_id),
        w = fmt(scene.width),
        h = fmt(scene.height),
    );

    out.push_str(r#"<g class="links">"#);
    for edge in &scene.edges {
        write_edge(&mut out, edge);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &scene.nodes {
        write_node(&mut out, node, options);
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    Ok(out)
}

fn write_edge(out: &mut String, edge: &SceneEdge) {
    let provenance = if edge.is_crm_link { "crm" } else { "web" };
    let _ = write!(
        out,
        r#"<line class="link link--{provenance}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"/>"#,
        x1 = fmt(edge.x1),
        y1 = fmt(edge.y1),
        x2 = fmt(edge.x2),
        y2 = fmt(edge.y2),
    );

    let (mx, my) = edge.midpoint();
    let r = crate::scene::EDGE_BADGE_RADIUS;
    let _ = write!(
        out,
        r#"<g class="link-badge link-badge--{provenance}"><circle cx="{mx}" cy="{my}" r="{r}"/>"#,
        mx = fmt(mx),
        my = fmt(my),
        r = fmt(r),
    );
    if let Some(href) = edge.badge_icon_url.as_deref() {
        let icon_edge = r * 1.5;
        let _ = write!(
            out,
            r#"<image href="{href}" x="{x}" y="{y}" width="{s}" height="{s}"/>"#,
            href = escape_xml(href),
            x = fmt(mx - icon_edge / 2.0),
            y = fmt(my - icon_edge / 2.0),
            s = fmt(icon_edge),
        );
    }
    out.push_str("</g>");
}

fn write_node(out: &mut String, node: &SceneNode, options: &RenderOptions) {
    let kind = if node.data.is_focus {
        "node node--focus"
    } else {
        "node"
    };
    let left = node.x - node.width / 2.0;
    let top = node.y - node.height / 2.0;

    let _ = write!(
        out,
        r#"<g class="{kind}" data-entity-id="{id}"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" ry="{rx}"/>"#,
        id = escape_xml(&node.data.id),
        x = fmt(left),
        y = fmt(top),
        w = fmt(node.width),
        h = fmt(node.height),
        rx = fmt(node.border_radius),
    );

    if let Some(href) = node.icon_url.as_deref() {
        let _ = write!(
            out,
            r#"<image href="{href}" x="{x}" y="{y}" width="{s}" height="{s}"/>"#,
            href = escape_xml(href),
            x = fmt(left + options.shell_padding),
            y = fmt(node.y - options.icon_size / 2.0),
            s = fmt(options.icon_size),
        );
    }

    let _ = write!(
        out,
        r#"<text class="node-label" x="{x}" y="{y}" dominant-baseline="central">{label}</text>"#,
        x = fmt(left + options.shell_padding + options.icon_size + options.icon_text_gap),
        y = fmt(node.y),
        label = escape_xml(&node.label),
    );

    if let Some(badge) = node.badge.as_ref() {
        let kind = match badge.kind {
            NodeBadgeKind::Link => "link",
            NodeBadgeKind::Add => "add",
        };
        let _ = write!(
            out,
            r#"<g class="node-badge node-badge--{kind}"><circle cx="{cx}" cy="{cy}" r="{r}"/>"#,
            cx = fmt(badge.cx),
            cy = fmt(badge.cy),
            r = fmt(badge.radius),
        );
        if let Some(href) = badge.icon_url.as_deref() {
            let icon_edge = badge.radius * 1.2;
            let _ = write!(
                out,
                r#"<image href="{href}" x="{x}" y="{y}" width="{s}" height="{s}"/>"#,
                href = escape_xml(href),
                x = fmt(badge.cx - icon_edge / 2.0),
                y = fmt(badge.cy - icon_edge / 2.0),
                s = fmt(icon_edge),
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</g>");
}
