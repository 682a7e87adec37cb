//! Integration tests for the query converter

mod common;

use common::*;
use orgview::prelude::*;
use serde_json::json;

fn convert(doc: Document) -> Result<QueryModel, ModelValidationFailure> {
    let entity = QueryEntity::from_document(doc).expect("fixture decodes");
    QueryModel::convert_from_entity(&entity)
}

#[test]
fn test_mixed_tracking_orgs_resolve_per_entry() {
    init_tracing();
    let model = convert(query_with_orgs(vec![
        Bson::ObjectId(oid(OTHER_ORG_HEX)),
        Bson::Document(full_organisation(ORG_HEX)),
        Bson::String(OTHER_ORG_HEX.to_string()),
    ]))
    .unwrap();

    assert_eq!(model.tracking_orgs.len(), 3);
    assert_eq!(model.tracking_orgs[0], OrganisationRef::Id(OTHER_ORG_HEX.to_string()));

    let nested = model.tracking_orgs[1].as_model().expect("embedded organisation");
    assert_eq!(nested.id, ORG_HEX);
    assert_eq!(nested.name.as_deref(), Some("Acme"));
    assert!(!nested.includes_credentials());

    assert_eq!(model.tracking_orgs[2], OrganisationRef::Id(OTHER_ORG_HEX.to_string()));
}

#[test]
fn test_serialized_tracking_orgs_are_ids_or_objects() {
    let model = convert(query_with_orgs(vec![
        Bson::ObjectId(oid(OTHER_ORG_HEX)),
        Bson::Document(minimal_organisation(ORG_HEX)),
    ]))
    .unwrap();

    let json = model.to_json().unwrap();
    assert_eq!(json["trackingOrgs"][0], json!(OTHER_ORG_HEX));
    assert_eq!(json["trackingOrgs"][1]["id"], json!(ORG_HEX));
    assert_eq!(json["trackingOrgs"][1]["shopifyConnectionStatus"], json!("INACTIVE"));
}

#[test]
fn test_citations_keep_input_order() {
    let model = convert(query_with_orgs(vec![])).unwrap();

    let citations: Vec<&Citation> = model.citations.iter().flatten().collect();
    let positions: Vec<_> = citations.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![Some(1), Some(0)]);
    assert_eq!(citations[0].link_text.as_deref(), Some("Acme Trail"));
    assert_eq!(citations[1].brand_domain, None);

    let json = model.to_json().unwrap();
    assert!(json["citations"][1].get("brandDomain").is_none());
}

#[test]
fn test_null_citation_passes_through_in_place() {
    let model = convert(doc! {
        "_id": oid(QUERY_HEX),
        "citations": [{ "link": "https://acme.com", "position": 0 }, null],
    })
    .unwrap();

    assert_eq!(model.citations.len(), 2);
    assert_eq!(model.citations[0].as_ref().and_then(|c| c.position), Some(0));
    assert_eq!(model.citations[1], None);

    let json = model.to_json().unwrap();
    assert_eq!(json["citations"][1], serde_json::Value::Null);
    assert_eq!(json["citations"][0]["link"], json!("https://acme.com"));
}

#[test]
fn test_double_position_is_read_as_integer() {
    let model = convert(doc! {
        "_id": oid(QUERY_HEX),
        "citations": [{ "link": "https://acme.com", "position": 3.0 }],
    })
    .unwrap();

    assert_eq!(model.citations[0].as_ref().unwrap().position, Some(3));
    assert_eq!(model.to_json().unwrap()["citations"][0]["position"], json!(3));
}

#[test]
fn test_fractional_position_is_decode_error() {
    let err = QueryEntity::from_document(doc! {
        "_id": oid(QUERY_HEX),
        "citations": [{ "position": 0.5 }],
    })
    .unwrap_err();
    assert_eq!(err.entity, "query");
}

#[test]
fn test_platform_and_prompt() {
    let model = convert(query_with_orgs(vec![])).unwrap();
    assert_eq!(model.platform, Some(Platform::Perplexity));
    assert_eq!(model.prompt.as_deref(), Some("best trail running shoes"));
    assert_eq!(model.to_json().unwrap()["platform"], json!("Perplexity"));
}

#[test]
fn test_bare_query_has_empty_lists_and_no_timestamps() {
    let model = convert(doc! { "_id": oid(QUERY_HEX) }).unwrap();
    assert!(model.tracking_orgs.is_empty());
    assert!(model.citations.is_empty());

    let json = model.to_json().unwrap();
    assert_eq!(json["trackingOrgs"], json!([]));
    assert_eq!(json["citations"], json!([]));
    assert_eq!(json["prompt"], serde_json::Value::Null);
    assert!(json.get("createdAt").is_none());
    assert!(json.get("updatedAt").is_none());
}

#[test]
fn test_timestamps_present_only_when_truthy() {
    let model = convert(doc! {
        "_id": oid(QUERY_HEX),
        "createdAt": millis(1_700_000_000_000),
        "updatedAt": null,
    })
    .unwrap();

    let json = model.to_json().unwrap();
    assert_eq!(json["createdAt"], json!("2023-11-14T22:13:20Z"));
    assert!(json.get("updatedAt").is_none());
}

#[test]
fn test_invalid_nested_org_fails_the_query() {
    let failure = convert(query_with_orgs(vec![
        Bson::ObjectId(oid(OTHER_ORG_HEX)),
        Bson::Document(doc! { "_id": oid(ORG_HEX), "billingPlanStatus": "TRIAL" }),
    ]))
    .unwrap_err();

    assert_eq!(failure.model, "query");
    assert!(failure.has_issue("trackingOrgs[1].billingPlanStatus"));
}

#[test]
fn test_unrecognised_reference_is_decode_error() {
    let err = QueryEntity::from_document(doc! {
        "_id": oid(QUERY_HEX),
        "trackingOrgs": ["acme"],
    })
    .unwrap_err();
    assert_eq!(err.entity, "query");
}
