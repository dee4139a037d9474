#![forbid(unsafe_code)]

//! `seastar` renders focus-centered relationship graphs: one anchor entity
//! plus up to eight related entities, built from a validated JSON envelope and
//! laid out radially around the anchor.
//!
//! The data model (`seastar-core`) is always available; layout and SVG
//! emission live behind the `render` feature.
//!
//! # Features
//!
//! - `render`: enable sizing + radial layout + SVG rendering (`seastar::render`)

pub use seastar_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use seastar_render::icons::{IconResolver, SpriteIconResolver};
    pub use seastar_render::scene::{Scene, build_scene};
    pub use seastar_render::svg::render_scene_svg;
    pub use seastar_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use seastar_render::tooltip::{
        TooltipCommand, TooltipContent, TooltipController, TooltipState,
    };
    pub use seastar_render::{LayoutStrategy, RenderOptions, render_graph_svg};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Envelope(#[from] seastar_core::Error),
        #[error(transparent)]
        Render(#[from] seastar_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// One-call pipeline: envelope JSON text → SVG document.
    ///
    /// This is also the whole re-render story: when the host mutates the
    /// source envelope (e.g. after a record match is confirmed), it calls this
    /// again and swaps the output — there is no incremental update path.
    pub fn render_envelope_svg(
        envelope_json: &str,
        overrides: &seastar_core::BuildOverrides,
        options: &RenderOptions,
    ) -> Result<String> {
        let envelope = seastar_core::parse_envelope(envelope_json)?;
        let graph = seastar_core::build_graph(&envelope, overrides);
        Ok(seastar_render::render_graph_svg(&graph, options)?)
    }

    /// Convenience wrapper bundling build overrides and render options, for
    /// hosts that re-render the same embedded view repeatedly.
    #[derive(Clone, Default)]
    pub struct RelationshipRenderer {
        pub overrides: seastar_core::BuildOverrides,
        pub options: RenderOptions,
    }

    impl RelationshipRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_overrides(mut self, overrides: seastar_core::BuildOverrides) -> Self {
            self.overrides = overrides;
            self
        }

        pub fn with_options(mut self, options: RenderOptions) -> Self {
            self.options = options;
            self
        }

        pub fn build_graph(
            &self,
            envelope: &seastar_core::RelationshipEnvelope,
        ) -> seastar_core::RelationshipGraph {
            seastar_core::build_graph(envelope, &self.overrides)
        }

        pub fn build_scene(
            &self,
            envelope: &seastar_core::RelationshipEnvelope,
        ) -> Result<Scene> {
            let graph = self.build_graph(envelope);
            Ok(seastar_render::scene::build_scene(&graph, &self.options)?)
        }

        pub fn render_svg(&self, envelope_json: &str) -> Result<String> {
            render_envelope_svg(envelope_json, &self.overrides, &self.options)
        }
    }
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use crate::render::*;

    fn envelope_json() -> String {
        serde_json::json!({
            "schemaVersion": "2",
            "anchorEntity": { "entityName": "Acme Corp" },
            "relatedEntities": [
                { "entityName": "Beta Inc", "predicate": "supplier of", "source": "crm" },
                { "entityName": "Gamma LLC", "predicate": "competitor of" }
            ]
        })
        .to_string()
    }

    #[test]
    fn envelope_to_svg_round_trip() {
        let svg = render_envelope_svg(
            &envelope_json(),
            &crate::BuildOverrides::default(),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Acme Corp</text>"));
    }

    #[test]
    fn renderer_bundle_rebuilds_from_new_envelopes() {
        let renderer = RelationshipRenderer::new();
        let envelope = crate::parse_envelope(&envelope_json()).unwrap();
        let scene = renderer.build_scene(&envelope).unwrap();
        assert_eq!(scene.nodes.len(), 3);

        // A confirmed match mutates the source envelope; the next build picks
        // it up because nothing is cached.
        let mut confirmed = envelope.clone();
        confirmed.related_entities[1].record_id = Some("001GAMMA".to_string());
        confirmed.related_entities[1].is_crm_confirmed = Some(true);
        let scene = renderer.build_scene(&confirmed).unwrap();
        let gamma = scene
            .nodes
            .iter()
            .find(|n| n.data.id == "Gamma LLC")
            .unwrap();
        assert!(gamma.data.is_crm_link);
    }

    #[test]
    fn malformed_json_surfaces_as_an_envelope_error() {
        let err = render_envelope_svg(
            "{broken",
            &crate::BuildOverrides::default(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HeadlessError::Envelope(_)));
    }
}
