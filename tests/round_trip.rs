//! Codec round trips across the resource families

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use clusters_model::clusters::{
    CloudProvider, CloudProviderBuilder, CloudRegion, CloudRegionBuilder, Cluster,
    ClusterBuilder, ClusterState, Label, LabelBuilder, Version, VersionBuilder,
};
use clusters_model::codec::{marshal, marshal_list, marshal_to_string, unmarshal, unmarshal_list_str, unmarshal_str};
use clusters_model::incidents::{EventBuilder, Incident, IncidentBuilder, User, UserBuilder};
use clusters_model::prelude::*;
use clusters_model::{kind_of, kind_tag_of, Error, Kind, List, ListBuilder, ListResponse};
use serde_json::{json, Value};

fn cluster() -> Cluster {
    ClusterBuilder::new()
        .id("1a2b3c")
        .href("/api/clusters_mgmt/v1/clusters/1a2b3c")
        .name("prod-east")
        .display_name("")
        .cloud_provider(CloudProviderBuilder::new().id("aws").link(true))
        .region(
            CloudRegionBuilder::new()
                .id("us-east-1")
                .cloud_provider(CloudProviderBuilder::new().id("aws").link(true))
                .supports_multi_az(true),
        )
        .version(VersionBuilder::new().id("openshift-v4.15.2").raw_id("4.15.2"))
        .creation_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        .expiration_timestamp(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        .labels(ListBuilder::new().push(LabelBuilder::new().key("env").value("prod")))
        .load_balancer_quota(0)
        .multi_az(false)
        .properties([("owner", "team-a"), ("tier", "gold")])
        .state(ClusterState::Installing)
        .build()
        .unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_cluster_round_trip() {
    let original = cluster();
    let mut buffer = Vec::new();
    marshal(&original, &mut buffer).unwrap();
    let read: Cluster = unmarshal(buffer.as_slice()).unwrap();
    assert_eq!(read, original);
}

#[test]
fn test_zero_values_stay_present() {
    let read: Cluster = unmarshal_str(&marshal_to_string(&cluster()).unwrap()).unwrap();
    assert_eq!(read.get_display_name(), Some(""));
    assert_eq!(read.get_load_balancer_quota(), Some(0));
    assert_eq!(read.get_multi_az(), Some(false));
    assert_eq!(read.get_external_id(), None);
    assert_eq!(read.external_id(), "");
}

#[test]
fn test_every_kind_survives() {
    let provider = CloudProviderBuilder::new().id("gcp").link(true).build().unwrap();
    let read: CloudProvider = unmarshal_str(&marshal_to_string(&provider).unwrap()).unwrap();
    assert_eq!(read.kind_tag(), Kind::Link);

    let user = UserBuilder::new().username("jdoe").build().unwrap();
    let read: User = unmarshal_str(&marshal_to_string(&user).unwrap()).unwrap();
    assert_eq!(read.kind_tag(), Kind::Full);
    assert_eq!(kind_tag_of::<User>(None), Kind::Nil);
}

#[test]
fn test_array_round_trip() {
    let labels = vec![
        LabelBuilder::new().key("a").value("1").build().unwrap(),
        LabelBuilder::new().key("b").link(true).build().unwrap(),
    ];
    let mut buffer = Vec::new();
    marshal_list(&labels, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("["));

    let read: Vec<Label> = unmarshal_list_str(&text).unwrap();
    assert_eq!(read, labels);
    assert!(read[1].is_link());
}

#[test]
fn test_list_response_round_trip() {
    let list: List<Version> = ListBuilder::new()
        .push(VersionBuilder::new().id("v1").enabled(true))
        .push(VersionBuilder::new().id("v2").enabled(false))
        .build()
        .unwrap();
    let response = ListResponse::new(list).with_page(2).with_size(2).with_total(12);
    let text = marshal_to_string(&response).unwrap();
    assert!(text.starts_with(r#"{"kind":"VersionList","page":2"#));

    let read: ListResponse<Version> = unmarshal_str(&text).unwrap();
    assert_eq!(read.page(), Some(2));
    assert_eq!(read.total(), Some(12));
    assert_eq!(read.items().len(), 2);
    assert_eq!(read.items().get(1).and_then(Version::get_enabled), Some(false));
}

// =============================================================================
// Reading server documents
// =============================================================================

#[test]
fn test_link_with_unknown_field() {
    let region: CloudRegion =
        unmarshal_str(r#"{"kind":"CloudRegionLink","unexpected_field":123}"#).unwrap();
    assert!(region.is_link());
    assert!(region.is_empty());
    assert_eq!(kind_of(Some(&region)), "CloudRegionLink");
}

#[test]
fn test_null_fields_are_absent() {
    let cluster: Cluster = unmarshal_str(
        r#"{"kind":"Cluster","name":null,"region":null,"labels":null,"properties":null}"#,
    )
    .unwrap();
    assert!(cluster.is_empty());
    assert!(cluster.region().is_none());
    assert_eq!(cluster.labels().kind(), "LabelListNil");
}

#[test]
fn test_first_error_after_full_scan() {
    let document = json!({
        "kind": "Incident",
        "incident_name": 5,
        "creator": {"kind": "UserLink", "id": "u1"},
        "products": ["clusters", false],
        "summary": "API errors"
    });
    let err = clusters_model::codec::unmarshal_value::<Incident>(&document).unwrap_err();
    assert!(err.is_parse_error());
    assert_matches!(err, Error::Parse { ref path, .. } if path == "incident_name");
}

#[test]
fn test_non_object_document_is_rejected() {
    let err = unmarshal_str::<Cluster>("[1, 2]").unwrap_err();
    assert_matches!(err, Error::UnexpectedDocument { expected: "object", found: "array" });

    let err = unmarshal_str::<Cluster>("{not json").unwrap_err();
    assert_matches!(err, Error::Json(_));
}

// =============================================================================
// Builders
// =============================================================================

#[test]
fn test_copy_is_idempotent() {
    let original = cluster();
    let copy = ClusterBuilder::new().copy_from(Some(&original)).build().unwrap();
    assert_eq!(copy, original);

    let twice = ClusterBuilder::new().copy_from(Some(&copy)).build().unwrap();
    assert_eq!(twice, original);
}

#[test]
fn test_edits_after_copy_do_not_leak() {
    let original = cluster();
    let edited = ClusterBuilder::new()
        .copy_from(Some(&original))
        .region(None)
        .property("owner", "team-b")
        .build()
        .unwrap();
    assert!(edited.region().is_none());
    assert_eq!(edited.property("owner"), Some("team-b"));
    assert_eq!(original.region().map(CloudRegion::id), Some("us-east-1"));
    assert_eq!(original.property("owner"), Some("team-a"));
}

#[test]
fn test_build_error_from_deep_nesting() {
    let builder = IncidentBuilder::new().events(
        ListBuilder::new()
            .push(EventBuilder::new().payload(json!({"ok": true})))
            .push(EventBuilder::new().payload_raw("not json at all")),
    );
    let err = builder.build().unwrap_err();
    assert!(err.is_build_error());

    // The builder is left usable
    let fixed = builder
        .events(ListBuilder::new().push(EventBuilder::new().payload(Value::Null)))
        .build()
        .unwrap();
    assert_eq!(fixed.events().len(), 1);
}

#[test]
fn test_absent_list_accessors() {
    let incident = IncidentBuilder::new().summary("quiet").build().unwrap();
    let events = incident.events();
    assert_eq!(events.len(), 0);
    assert!(events.get(0).is_none());
    assert!(events.slice().is_empty());
    let mut visited = 0;
    events.range(|_, _| {
        visited += 1;
        true
    });
    assert_eq!(visited, 0);
}
