//! Symbolic icon ids and their resolution to sprite URLs.
//!
//! The renderer never touches icon assets; it emits `<image>` references
//! resolved through an injected [`IconResolver`]. Icon ids are namespaced
//! (`standard:` for entity/record glyphs, `utility:` for badge glyphs) and the
//! lookup tables are plain functions, not mutable registries.

/// Badge glyph on a non-focus shell: linked to an existing CRM record, or an
/// offer to create one.
pub const ICON_LINK: &str = "utility:link";
pub const ICON_ADD: &str = "utility:add";

/// Edge provenance badges.
pub const ICON_SOURCE_CRM: &str = "utility:database";
pub const ICON_SOURCE_WEB: &str = "utility:world";

const ICON_DEFAULT_ENTITY: &str = "standard:default";

/// Entity-type glyph shown inside a shell when no record type is known.
pub fn entity_type_icon(entity_type: &str) -> &'static str {
    match entity_type {
        "organization" => "standard:account",
        "person" => "standard:contact",
        _ => ICON_DEFAULT_ENTITY,
    }
}

/// Record-type glyph; takes precedence over the entity-type glyph.
pub fn record_type_icon(record_type: &str) -> &'static str {
    match record_type {
        "account" => "standard:account",
        "opportunity" => "standard:opportunity",
        "contact" => "standard:contact",
        "lead" => "standard:lead",
        _ => ICON_DEFAULT_ENTITY,
    }
}

/// The shell glyph for a node: record type when present, else entity type.
pub fn node_icon(node: &seastar_core::GraphNode) -> &'static str {
    match node.record_type.as_deref() {
        Some(record_type) => record_type_icon(&record_type.to_lowercase()),
        None => entity_type_icon(&node.entity_type),
    }
}

pub trait IconResolver {
    /// Resolves a symbolic icon id (`"standard:account"`, `"utility:link"`) to
    /// a URL the output document can reference. `None` suppresses the glyph.
    fn resolve_icon_url(&self, icon_id: &str) -> Option<String>;
}

/// Resolves namespaced ids against two sprite sheets via URL fragments, the
/// usual shape for SVG symbol sprites.
#[derive(Debug, Clone)]
pub struct SpriteIconResolver {
    pub standard_sprite: String,
    pub utility_sprite: String,
}

impl Default for SpriteIconResolver {
    fn default() -> Self {
        Self {
            standard_sprite: "/assets/icons/standard-sprite/symbols.svg".to_string(),
            utility_sprite: "/assets/icons/utility-sprite/symbols.svg".to_string(),
        }
    }
}

impl IconResolver for SpriteIconResolver {
    fn resolve_icon_url(&self, icon_id: &str) -> Option<String> {
        let (namespace, name) = icon_id.split_once(':')?;
        if name.is_empty() {
            return None;
        }
        match namespace {
            "standard" => Some(format!("{}#{name}", self.standard_sprite)),
            "utility" => Some(format!("{}#{name}", self.utility_sprite)),
            _ => None,
        }
    }
}
