use crate::*;
use serde_json::json;

#[test]
fn envelope_parses_camel_case_keys() {
    let text = json!({
        "schemaVersion": "2",
        "anchorEntity": { "entityName": "Acme Corp", "canonicalName": "Acme Corporation" },
        "relatedEntities": [
            {
                "entityName": "Beta Inc",
                "predicate": "supplier of",
                "source": "web",
                "isCrmConfirmed": false,
                "citationURL": "https://example.com/article",
                "importanceScore": 0.9
            }
        ]
    })
    .to_string();

    let envelope = parse_envelope(&text).unwrap();
    assert_eq!(envelope.schema_version, "2");
    assert_eq!(envelope.anchor_entity.entity_name, "Acme Corp");
    assert_eq!(
        envelope.anchor_entity.canonical_name.as_deref(),
        Some("Acme Corporation")
    );
    let related = &envelope.related_entities[0];
    assert_eq!(related.predicate, "supplier of");
    assert_eq!(
        related.citation_url.as_deref(),
        Some("https://example.com/article")
    );
    assert_eq!(related.importance_score, Some(0.9));
}

#[test]
fn envelope_tolerates_missing_optional_keys() {
    let text = r#"{
        "schemaVersion": "2",
        "anchorEntity": { "entityName": "Acme Corp" },
        "relatedEntities": [{ "entityName": "Beta Inc", "predicate": "partner" }]
    }"#;
    let envelope = parse_envelope(text).unwrap();
    assert!(envelope.is_valid());
    assert!(envelope.related_entities[0].canonical_name.is_none());
    assert!(envelope.related_entities[0].source.is_none());
}

#[test]
fn envelope_malformed_json_is_an_error() {
    assert!(parse_envelope("{not json").is_err());
}

#[test]
fn envelope_wrong_schema_version_is_invalid() {
    let mut envelope = sample();
    envelope.schema_version = "1".to_string();
    assert!(!envelope.is_valid());
}

#[test]
fn envelope_blank_anchor_name_is_invalid() {
    let mut envelope = sample();
    envelope.anchor_entity.entity_name = "   ".to_string();
    assert!(!envelope.is_valid());
}

#[test]
fn envelope_needs_at_least_one_valid_related_entity() {
    let mut envelope = sample();
    envelope.related_entities[0].predicate = "".to_string();
    assert!(!envelope.is_valid());

    envelope.related_entities[0].predicate = "partner".to_string();
    envelope.related_entities[0].entity_name = " ".to_string();
    assert!(!envelope.is_valid());
}

fn sample() -> RelationshipEnvelope {
    RelationshipEnvelope {
        schema_version: "2".to_string(),
        anchor_entity: AnchorEntity {
            entity_name: "Acme Corp".to_string(),
            ..Default::default()
        },
        related_entities: vec![RelatedEntity {
            entity_name: "Beta Inc".to_string(),
            predicate: "partner".to_string(),
            ..Default::default()
        }],
    }
}
