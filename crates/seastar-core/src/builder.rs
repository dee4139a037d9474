use crate::envelope::{RelationshipEnvelope, non_blank};
use crate::graph::{EntitySource, GraphLink, GraphNode, RelationshipGraph};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// Hard cap on accepted related nodes. Callers pre-sort related entities by
/// importance (descending) so the cap keeps the most relevant eight.
pub const MAX_RELATED_NODES: usize = 8;

const DEFAULT_ENTITY_TYPE: &str = "organization";

/// Host context that takes precedence over envelope-declared anchor identity:
/// the CRM record the graph view is embedded in.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub record_id: Option<String>,
    pub record_type: Option<String>,
}

/// Builds the node/edge model from a validated envelope.
///
/// Never fails: an invalid envelope yields an empty graph, and every bad
/// related entry (blank name/predicate, self-reference, duplicate) is skipped
/// with a warning while the rest of the envelope is processed. The output is
/// rebuilt from scratch on every call; node and link order is insertion order
/// with the anchor first.
pub fn build_graph(
    envelope: &RelationshipEnvelope,
    overrides: &BuildOverrides,
) -> RelationshipGraph {
    if !envelope.is_valid() {
        tracing::warn!(
            schema_version = %envelope.schema_version,
            "envelope failed validation, building empty graph"
        );
        return RelationshipGraph::default();
    }

    let anchor = &envelope.anchor_entity;
    let anchor_id = anchor.entity_name.trim().to_string();
    let anchor_node = GraphNode {
        id: anchor_id.clone(),
        label: non_blank(anchor.canonical_name.as_deref()).unwrap_or_else(|| anchor_id.clone()),
        is_focus: true,
        entity_type: resolved_entity_type(anchor.entity_type.as_deref()),
        is_crm_link: true,
        record_type: non_blank(overrides.record_type.as_deref())
            .or_else(|| non_blank(anchor.record_type.as_deref())),
        record_id: non_blank(overrides.record_id.as_deref())
            .or_else(|| non_blank(anchor.record_id.as_deref())),
        source: Some(EntitySource::Crm),
        uuid: None,
        context: None,
        citation: None,
        citation_url: None,
    };

    let mut nodes = vec![anchor_node];
    let mut links: Vec<GraphLink> = Vec::new();
    let mut seen_ids: IndexSet<String> = IndexSet::new();
    seen_ids.insert(anchor_id.clone());
    let mut pair_keys: FxHashSet<String> = FxHashSet::default();
    let mut accepted = 0usize;
    let mut skipped = 0usize;

    for related in &envelope.related_entities {
        if accepted >= MAX_RELATED_NODES {
            tracing::debug!(
                cap = MAX_RELATED_NODES,
                remaining = envelope.related_entities.len(),
                "related-node cap reached, ignoring the rest of the envelope"
            );
            break;
        }

        if !related.is_valid() {
            tracing::warn!(
                entity = %related.entity_name,
                predicate = %related.predicate,
                "skipping related entity with blank name or predicate"
            );
            skipped += 1;
            continue;
        }

        let id = related.entity_name.trim().to_string();
        if id == anchor_id {
            tracing::warn!(entity = %id, "skipping self-referencing related entity");
            skipped += 1;
            continue;
        }
        if seen_ids.contains(&id) {
            tracing::warn!(entity = %id, "skipping duplicate related entity, first occurrence wins");
            skipped += 1;
            continue;
        }

        let source = related.source.as_deref().and_then(EntitySource::parse);
        let is_crm_link =
            source == Some(EntitySource::Crm) || related.is_crm_confirmed == Some(true);

        let uuid = non_blank(related.uuid.as_deref());
        if let Some(raw) = uuid.as_deref() {
            if uuid::Uuid::parse_str(raw).is_err() {
                tracing::debug!(entity = %id, uuid = %raw, "related entity uuid is not RFC 4122");
            }
        }
        let citation_url = non_blank(related.citation_url.as_deref());
        if let Some(raw) = citation_url.as_deref() {
            if url::Url::parse(raw).is_err() {
                tracing::debug!(entity = %id, url = %raw, "citation URL does not parse");
            }
        }

        let node = GraphNode {
            id: id.clone(),
            label: non_blank(related.canonical_name.as_deref()).unwrap_or_else(|| id.clone()),
            is_focus: false,
            entity_type: resolved_entity_type(related.entity_type.as_deref()),
            is_crm_link,
            record_type: non_blank(related.record_type.as_deref()),
            record_id: non_blank(related.record_id.as_deref()),
            source,
            uuid,
            context: non_blank(related.context.as_deref()),
            citation: non_blank(related.citation.as_deref()),
            citation_url,
        };

        let link = GraphLink {
            source: anchor_id.clone(),
            target: id.clone(),
            is_crm_link,
        };
        if !pair_keys.insert(link.pair_key()) {
            tracing::warn!(pair = %link.pair_key(), "skipping link with colliding pair key");
        } else {
            links.push(link);
        }

        seen_ids.insert(id);
        nodes.push(node);
        accepted += 1;
    }

    if skipped > 0 {
        tracing::debug!(accepted, skipped, "related entity processing finished");
    }

    drop_dangling_links(&mut links, &seen_ids);
    RelationshipGraph { nodes, links }
}

fn resolved_entity_type(raw: Option<&str>) -> String {
    non_blank(raw)
        .map(|t| t.to_lowercase())
        .unwrap_or_else(|| DEFAULT_ENTITY_TYPE.to_string())
}

/// Links must reference nodes that made it into the set. Unreachable as long
/// as links are only minted alongside accepted nodes, but the invariant is
/// cheap to hold at the boundary.
fn drop_dangling_links(links: &mut Vec<GraphLink>, node_ids: &IndexSet<String>) {
    links.retain(|l| {
        let ok = node_ids.contains(&l.source) && node_ids.contains(&l.target);
        if !ok {
            tracing::warn!(source = %l.source, target = %l.target, "dropping link with missing endpoint");
        }
        ok
    });
}
