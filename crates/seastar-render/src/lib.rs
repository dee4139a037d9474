#![forbid(unsafe_code)]

//! Deterministic radial layout + headless SVG renderer for seastar
//! relationship graphs.
//!
//! The pipeline is pure and synchronous: a built
//! [`RelationshipGraph`](seastar_core::RelationshipGraph) goes through node
//! sizing (text metrics → shell boxes), the constrained radial layout engine
//! (optionally refined by `limpet` relaxation), and finally scene/SVG
//! emission. Same graph + same options → byte-identical SVG.

pub mod geom;
pub mod icons;
pub mod layout;
pub mod scene;
pub mod sizing;
pub mod svg;
pub mod text;
pub mod tooltip;

use crate::icons::{IconResolver, SpriteIconResolver};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use seastar_core::{GraphNode, RelationshipGraph};
use std::sync::Arc;

pub use layout::LayoutStrategy;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unusable rendering surface: {width}x{height}")]
    UnusableSurface { width: f64, height: f64 },
    #[error("relaxation pass failed: {0}")]
    Relax(#[from] limpet::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rendering tunables. Every field has a sane default; hosts override what
/// their canvas needs and leave the rest.
#[derive(Clone)]
pub struct RenderOptions {
    /// Canvas extents in px.
    pub width: f64,
    pub height: f64,
    /// Base unit for the preferred edge length (preferred = 6 × base radius).
    pub base_radius: f64,
    /// Uniform shell row height.
    pub shell_height: f64,
    /// Horizontal padding inside a shell, each side.
    pub shell_padding: f64,
    /// Gap between the icon and the label.
    pub icon_text_gap: f64,
    /// Shell corner radius.
    pub shell_border_radius: f64,
    /// Inset from the canvas edge no shell may cross.
    pub canvas_margin: f64,
    /// Angle of the first related node; default 12 o'clock.
    pub start_angle: f64,
    /// Square icon edge inside a shell.
    pub icon_size: f64,
    /// Label truncation threshold, in chars, ellipsis appended beyond it.
    pub max_label_chars: usize,
    pub strategy: LayoutStrategy,
    /// `id` attribute of the emitted `<svg>` root.
    pub diagram_id: Option<String>,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub icon_resolver: Arc<dyn IconResolver + Send + Sync>,
    /// Invoked by [`scene::Scene::dispatch_click`] with the hit node's data.
    pub on_node_click: Option<Arc<dyn Fn(&GraphNode) + Send + Sync>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            base_radius: 20.0,
            shell_height: 36.0,
            shell_padding: 12.0,
            icon_text_gap: 8.0,
            shell_border_radius: 18.0,
            canvas_margin: 20.0,
            start_angle: -std::f64::consts::FRAC_PI_2,
            icon_size: 20.0,
            max_label_chars: 28,
            strategy: LayoutStrategy::default(),
            diagram_id: None,
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            icon_resolver: Arc::new(SpriteIconResolver::default()),
            on_node_click: None,
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    /// Preferred visible edge length before canvas limits shrink it.
    pub fn preferred_edge_length(&self) -> f64 {
        self.base_radius * 6.0
    }
}

/// The only hard failure in the pipeline: a surface no diagram can be
/// emitted onto. A zero-size canvas is *not* unusable — it renders as a
/// degenerate but valid document.
pub(crate) fn ensure_surface(width: f64, height: f64) -> Result<()> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(Error::UnusableSurface { width, height })
    }
}

/// One-call pipeline: graph → sized/positioned scene → SVG document.
pub fn render_graph_svg(graph: &RelationshipGraph, options: &RenderOptions) -> Result<String> {
    let scene = scene::build_scene(graph, options)?;
    svg::render_scene_svg(&scene, options)
}
