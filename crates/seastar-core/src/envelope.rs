use crate::Result;
use serde::{Deserialize, Serialize};

/// The only envelope schema revision this crate accepts. Anything else builds
/// to an empty graph rather than an error: the producer side ships envelopes
/// ahead of consumer upgrades, so an unknown version must render as "nothing
/// to show", not a crash.
pub const SUPPORTED_SCHEMA_VERSION: &str = "2";

/// External relationship envelope, as produced by the research backend.
///
/// All fields are lenient: absent keys deserialize to defaults and every
/// validity decision happens in [`RelationshipEnvelope::is_valid`] /
/// [`crate::build_graph`], never in serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipEnvelope {
    pub schema_version: String,
    pub anchor_entity: AnchorEntity,
    pub related_entities: Vec<RelatedEntity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnchorEntity {
    pub entity_name: String,
    pub canonical_name: Option<String>,
    pub record_id: Option<String>,
    pub record_type: Option<String>,
    pub entity_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedEntity {
    pub entity_name: String,
    pub predicate: String,
    pub canonical_name: Option<String>,
    pub record_id: Option<String>,
    pub record_type: Option<String>,
    pub entity_type: Option<String>,
    /// Provenance hint, `"crm"` or `"web"`. Unknown values mean "unknown web
    /// research", not an error.
    pub source: Option<String>,
    pub is_crm_confirmed: Option<bool>,
    pub uuid: Option<String>,
    pub context: Option<String>,
    pub citation: Option<String>,
    #[serde(rename = "citationURL")]
    pub citation_url: Option<String>,
    pub importance_score: Option<f64>,
}

impl RelationshipEnvelope {
    /// An envelope is buildable iff the schema version matches, the anchor has
    /// a non-blank name, and at least one related entry is itself valid.
    pub fn is_valid(&self) -> bool {
        self.schema_version == SUPPORTED_SCHEMA_VERSION
            && !self.anchor_entity.entity_name.trim().is_empty()
            && self.related_entities.iter().any(RelatedEntity::is_valid)
    }
}

impl RelatedEntity {
    /// Valid iff both the entity name and the predicate are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.entity_name.trim().is_empty() && !self.predicate.trim().is_empty()
    }
}

/// Parses an envelope from raw JSON text.
///
/// Malformed JSON is the caller's integration problem and surfaces as an
/// error; a *well-formed* envelope that fails validation is not (it builds to
/// an empty graph).
pub fn parse_envelope(text: &str) -> Result<RelationshipEnvelope> {
    Ok(serde_json::from_str(text)?)
}

/// Trims an optional string, mapping blank to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
