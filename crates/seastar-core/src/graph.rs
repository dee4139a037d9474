use serde::{Deserialize, Serialize};

/// Where a node or edge was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitySource {
    Crm,
    Web,
}

impl EntitySource {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "crm" => Some(Self::Crm),
            "web" => Some(Self::Web),
            _ => None,
        }
    }
}

/// One entity in the relationship graph.
///
/// Identity is the trimmed entity name (`id`), case-sensitive. Everything else
/// is display/provenance payload; layout attributes live on the render side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub is_focus: bool,
    /// Lower-cased entity kind ("organization", "person", ...). Open set.
    pub entity_type: String,
    /// CRM-confirmed provenance: drives badge/edge iconography.
    pub is_crm_link: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Present iff the entity is linked to an existing CRM record; absence
    /// means "unmatched, offer to create".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<EntitySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(rename = "citationURL", skip_serializing_if = "Option::is_none")]
    pub citation_url: Option<String>,
}

/// One focus→related edge. The graph is a star: `source` is always the focus
/// node's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub is_crm_link: bool,
}

impl GraphLink {
    /// Order-independent identity for deduplication.
    pub fn pair_key(&self) -> String {
        pair_key(&self.source, &self.target)
    }
}

/// Sorted concatenation of two endpoint ids, independent of direction.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// The builder's output: nodes and links in insertion order, anchor first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl RelationshipGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The focus node. Present whenever the graph is non-empty.
    pub fn focus(&self) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .find(|n| n.is_focus)
            .or_else(|| self.nodes.first())
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn related(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| !n.is_focus)
    }
}
