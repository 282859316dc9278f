//! Cluster
//!
//! The central resource of the model. A cluster owns links to its provider,
//! region and version, a nested list of labels, free-form properties and a
//! lifecycle state.

use crate::clusters::cloud_provider::{CloudProvider, CloudProviderBuilder};
use crate::clusters::cloud_region::{CloudRegion, CloudRegionBuilder};
use crate::clusters::cluster_state::ClusterState;
use crate::clusters::label::{Label, LabelBuilder};
use crate::clusters::version::{Version, VersionBuilder};
use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{List, ListBuilder, Resource, ResourceBuilder};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const CLOUD_PROVIDER: usize = 3;
const CREATION_TIMESTAMP: usize = 4;
const DISPLAY_NAME: usize = 5;
const EXPIRATION_TIMESTAMP: usize = 6;
const EXTERNAL_ID: usize = 7;
const LABELS: usize = 8;
const LOAD_BALANCER_QUOTA: usize = 9;
const MULTI_AZ: usize = 10;
const NAME: usize = 11;
const PROPERTIES: usize = 12;
const REGION: usize = 13;
const STATE: usize = 14;
const VERSION: usize = 15;
const FIELDS: usize = 16;

static NO_PROPERTIES: BTreeMap<String, String> = BTreeMap::new();

// =============================================================================
// Value
// =============================================================================

/// Values of the 'cluster' type.
///
/// Every attribute may be absent. Plain accessors return the zero value of
/// the attribute type when it is, `get_*` accessors return `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    fields: FieldSet,
    id: String,
    href: String,
    cloud_provider: Option<CloudProvider>,
    creation_timestamp: DateTime<FixedOffset>,
    display_name: String,
    expiration_timestamp: DateTime<FixedOffset>,
    external_id: String,
    labels: Option<List<Label>>,
    load_balancer_quota: i64,
    multi_az: bool,
    name: String,
    properties: BTreeMap<String, String>,
    region: Option<CloudRegion>,
    state: ClusterState,
    version: Option<Version>,
}

impl Resource for Cluster {
    const KIND: &'static str = "Cluster";
    const LINK_KIND: &'static str = "ClusterLink";
    const NIL_KIND: &'static str = "ClusterNil";
    const LIST_KIND: &'static str = "ClusterList";
    const LIST_LINK_KIND: &'static str = "ClusterListLink";
    const LIST_NIL_KIND: &'static str = "ClusterListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl Cluster {
    pub fn id(&self) -> &str {
        self.get_id().unwrap_or_default()
    }

    pub fn get_id(&self) -> Option<&str> {
        self.fields.contains(ID).then_some(self.id.as_str())
    }

    pub fn href(&self) -> &str {
        self.get_href().unwrap_or_default()
    }

    pub fn get_href(&self) -> Option<&str> {
        self.fields.contains(HREF).then_some(self.href.as_str())
    }

    /// Provider hosting the cluster, usually a link
    pub fn cloud_provider(&self) -> Option<&CloudProvider> {
        if self.fields.contains(CLOUD_PROVIDER) {
            self.cloud_provider.as_ref()
        } else {
            None
        }
    }

    pub fn creation_timestamp(&self) -> DateTime<FixedOffset> {
        self.get_creation_timestamp().unwrap_or_default()
    }

    pub fn get_creation_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.fields
            .contains(CREATION_TIMESTAMP)
            .then_some(self.creation_timestamp)
    }

    pub fn display_name(&self) -> &str {
        self.get_display_name().unwrap_or_default()
    }

    pub fn get_display_name(&self) -> Option<&str> {
        self.fields
            .contains(DISPLAY_NAME)
            .then_some(self.display_name.as_str())
    }

    /// Moment after which the cluster is deleted automatically
    pub fn expiration_timestamp(&self) -> DateTime<FixedOffset> {
        self.get_expiration_timestamp().unwrap_or_default()
    }

    pub fn get_expiration_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.fields
            .contains(EXPIRATION_TIMESTAMP)
            .then_some(self.expiration_timestamp)
    }

    pub fn external_id(&self) -> &str {
        self.get_external_id().unwrap_or_default()
    }

    pub fn get_external_id(&self) -> Option<&str> {
        self.fields
            .contains(EXTERNAL_ID)
            .then_some(self.external_id.as_str())
    }

    /// Labels of the cluster. Use [`crate::model::OptionalList`] to read an
    /// absent list safely.
    pub fn labels(&self) -> Option<&List<Label>> {
        if self.fields.contains(LABELS) {
            self.labels.as_ref()
        } else {
            None
        }
    }

    pub fn load_balancer_quota(&self) -> i64 {
        self.get_load_balancer_quota().unwrap_or_default()
    }

    pub fn get_load_balancer_quota(&self) -> Option<i64> {
        self.fields
            .contains(LOAD_BALANCER_QUOTA)
            .then_some(self.load_balancer_quota)
    }

    pub fn multi_az(&self) -> bool {
        self.get_multi_az().unwrap_or_default()
    }

    pub fn get_multi_az(&self) -> Option<bool> {
        self.fields.contains(MULTI_AZ).then_some(self.multi_az)
    }

    pub fn name(&self) -> &str {
        self.get_name().unwrap_or_default()
    }

    pub fn get_name(&self) -> Option<&str> {
        self.fields.contains(NAME).then_some(self.name.as_str())
    }

    /// User defined properties, empty if not set
    pub fn properties(&self) -> &BTreeMap<String, String> {
        self.get_properties().unwrap_or(&NO_PROPERTIES)
    }

    pub fn get_properties(&self) -> Option<&BTreeMap<String, String>> {
        self.fields.contains(PROPERTIES).then_some(&self.properties)
    }

    /// Value of a single property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.get_properties()?.get(key).map(String::as_str)
    }

    pub fn region(&self) -> Option<&CloudRegion> {
        if self.fields.contains(REGION) {
            self.region.as_ref()
        } else {
            None
        }
    }

    /// Lifecycle state, [`ClusterState::Unknown`] if not set
    pub fn state(&self) -> ClusterState {
        self.get_state().cloned().unwrap_or_default()
    }

    pub fn get_state(&self) -> Option<&ClusterState> {
        self.fields.contains(STATE).then_some(&self.state)
    }

    pub fn version(&self) -> Option<&Version> {
        if self.fields.contains(VERSION) {
            self.version.as_ref()
        } else {
            None
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder of [`Cluster`] values
#[derive(Debug, Clone, Default)]
pub struct ClusterBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    cloud_provider: Option<CloudProviderBuilder>,
    creation_timestamp: DateTime<FixedOffset>,
    display_name: String,
    expiration_timestamp: DateTime<FixedOffset>,
    external_id: String,
    labels: Option<ListBuilder<LabelBuilder>>,
    load_balancer_quota: i64,
    multi_az: bool,
    name: String,
    properties: BTreeMap<String, String>,
    region: Option<CloudRegionBuilder>,
    state: ClusterState,
    version: Option<VersionBuilder>,
}

impl ClusterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = value.into();
        self.fields.insert(FIELDS, ID);
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self.fields.insert(FIELDS, HREF);
        self
    }

    pub fn cloud_provider(mut self, value: impl Into<Option<CloudProviderBuilder>>) -> Self {
        self.cloud_provider = value.into();
        self.fields
            .mark(FIELDS, CLOUD_PROVIDER, self.cloud_provider.is_some());
        self
    }

    pub fn creation_timestamp(mut self, value: impl Into<DateTime<FixedOffset>>) -> Self {
        self.creation_timestamp = value.into();
        self.fields.insert(FIELDS, CREATION_TIMESTAMP);
        self
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self.fields.insert(FIELDS, DISPLAY_NAME);
        self
    }

    pub fn expiration_timestamp(mut self, value: impl Into<DateTime<FixedOffset>>) -> Self {
        self.expiration_timestamp = value.into();
        self.fields.insert(FIELDS, EXPIRATION_TIMESTAMP);
        self
    }

    pub fn external_id(mut self, value: impl Into<String>) -> Self {
        self.external_id = value.into();
        self.fields.insert(FIELDS, EXTERNAL_ID);
        self
    }

    /// Set the labels; `None` unsets them
    pub fn labels(mut self, value: impl Into<Option<ListBuilder<LabelBuilder>>>) -> Self {
        self.labels = value.into();
        self.fields.mark(FIELDS, LABELS, self.labels.is_some());
        self
    }

    pub fn load_balancer_quota(mut self, value: i64) -> Self {
        self.load_balancer_quota = value;
        self.fields.insert(FIELDS, LOAD_BALANCER_QUOTA);
        self
    }

    pub fn multi_az(mut self, value: bool) -> Self {
        self.multi_az = value;
        self.fields.insert(FIELDS, MULTI_AZ);
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self.fields.insert(FIELDS, NAME);
        self
    }

    /// Replace all properties
    pub fn properties<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.fields.insert(FIELDS, PROPERTIES);
        self
    }

    /// Add or replace a single property
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self.fields.insert(FIELDS, PROPERTIES);
        self
    }

    pub fn region(mut self, value: impl Into<Option<CloudRegionBuilder>>) -> Self {
        self.region = value.into();
        self.fields.mark(FIELDS, REGION, self.region.is_some());
        self
    }

    pub fn state(mut self, value: impl Into<ClusterState>) -> Self {
        self.state = ClusterState::canonical(value.into());
        self.fields.insert(FIELDS, STATE);
        self
    }

    pub fn version(mut self, value: impl Into<Option<VersionBuilder>>) -> Self {
        self.version = value.into();
        self.fields.mark(FIELDS, VERSION, self.version.is_some());
        self
    }
}

impl ResourceBuilder for ClusterBuilder {
    type Output = Cluster;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&Cluster>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.cloud_provider = object
            .cloud_provider
            .as_ref()
            .map(|provider| CloudProviderBuilder::new().copy_from(Some(provider)));
        self.creation_timestamp = object.creation_timestamp;
        self.display_name = object.display_name.clone();
        self.expiration_timestamp = object.expiration_timestamp;
        self.external_id = object.external_id.clone();
        self.labels = object
            .labels
            .as_ref()
            .map(|labels| ListBuilder::new().copy_from(Some(labels)));
        self.load_balancer_quota = object.load_balancer_quota;
        self.multi_az = object.multi_az;
        self.name = object.name.clone();
        self.properties = object.properties.clone();
        self.region = object
            .region
            .as_ref()
            .map(|region| CloudRegionBuilder::new().copy_from(Some(region)));
        self.state = object.state.clone();
        self.version = object
            .version
            .as_ref()
            .map(|version| VersionBuilder::new().copy_from(Some(version)));
        self
    }

    fn build(&self) -> Result<Cluster> {
        Ok(Cluster {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            cloud_provider: self
                .cloud_provider
                .as_ref()
                .map(ResourceBuilder::build)
                .transpose()?,
            creation_timestamp: self.creation_timestamp,
            display_name: self.display_name.clone(),
            expiration_timestamp: self.expiration_timestamp,
            external_id: self.external_id.clone(),
            labels: self.labels.as_ref().map(ListBuilder::build).transpose()?,
            load_balancer_quota: self.load_balancer_quota,
            multi_az: self.multi_az,
            name: self.name.clone(),
            properties: self.properties.clone(),
            region: self.region.as_ref().map(ResourceBuilder::build).transpose()?,
            state: self.state.clone(),
            version: self.version.as_ref().map(ResourceBuilder::build).transpose()?,
        })
    }
}

// =============================================================================
// Codec
// =============================================================================

impl Serialize for Cluster {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = &self.fields;
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(fields.contains(ID), "id", &self.id)?;
        writer.field(fields.contains(HREF), "href", &self.href)?;
        writer.nested(
            fields.contains(CLOUD_PROVIDER),
            "cloud_provider",
            self.cloud_provider.as_ref(),
        )?;
        writer.timestamp(
            fields.contains(CREATION_TIMESTAMP),
            "creation_timestamp",
            &self.creation_timestamp,
        )?;
        writer.field(fields.contains(DISPLAY_NAME), "display_name", &self.display_name)?;
        writer.timestamp(
            fields.contains(EXPIRATION_TIMESTAMP),
            "expiration_timestamp",
            &self.expiration_timestamp,
        )?;
        writer.field(fields.contains(EXTERNAL_ID), "external_id", &self.external_id)?;
        writer.nested(fields.contains(LABELS), "labels", self.labels.as_ref())?;
        writer.field(
            fields.contains(LOAD_BALANCER_QUOTA),
            "load_balancer_quota",
            &self.load_balancer_quota,
        )?;
        writer.field(fields.contains(MULTI_AZ), "multi_az", &self.multi_az)?;
        writer.field(fields.contains(NAME), "name", &self.name)?;
        writer.field(fields.contains(PROPERTIES), "properties", &self.properties)?;
        writer.nested(fields.contains(REGION), "region", self.region.as_ref())?;
        writer.field(fields.contains(STATE), "state", &self.state)?;
        writer.nested(fields.contains(VERSION), "version", self.version.as_ref())?;
        writer.end()
    }
}

impl ReadResource for Cluster {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = Cluster {
            fields: fresh_fields::<Self>(),
            ..Self::default()
        };
        let fields = &mut value.fields;
        for (name, field) in object {
            match name.as_str() {
                "kind" => {
                    let link = reader.read_kind(name, field, Self::LINK_KIND);
                    fields.mark(FIELDS, LINK, link);
                }
                "id" => fields.fill(ID, &mut value.id, reader.read_string(name, field)),
                "href" => fields.fill(HREF, &mut value.href, reader.read_string(name, field)),
                "cloud_provider" => fields.fill(
                    CLOUD_PROVIDER,
                    &mut value.cloud_provider,
                    reader.read_object(name, field).map(Some),
                ),
                "creation_timestamp" => fields.fill(
                    CREATION_TIMESTAMP,
                    &mut value.creation_timestamp,
                    reader.read_timestamp(name, field),
                ),
                "display_name" => fields.fill(
                    DISPLAY_NAME,
                    &mut value.display_name,
                    reader.read_string(name, field),
                ),
                "expiration_timestamp" => fields.fill(
                    EXPIRATION_TIMESTAMP,
                    &mut value.expiration_timestamp,
                    reader.read_timestamp(name, field),
                ),
                "external_id" => fields.fill(
                    EXTERNAL_ID,
                    &mut value.external_id,
                    reader.read_string(name, field),
                ),
                "labels" => fields.fill(
                    LABELS,
                    &mut value.labels,
                    reader.read_list(name, field).map(Some),
                ),
                "load_balancer_quota" => fields.fill(
                    LOAD_BALANCER_QUOTA,
                    &mut value.load_balancer_quota,
                    reader.read_integer(name, field),
                ),
                "multi_az" => {
                    fields.fill(MULTI_AZ, &mut value.multi_az, reader.read_bool(name, field))
                }
                "name" => fields.fill(NAME, &mut value.name, reader.read_string(name, field)),
                "properties" => fields.fill(
                    PROPERTIES,
                    &mut value.properties,
                    reader.read_string_map(name, field),
                ),
                "region" => fields.fill(
                    REGION,
                    &mut value.region,
                    reader.read_object(name, field).map(Some),
                ),
                "state" => fields.fill(
                    STATE,
                    &mut value.state,
                    reader.read_string(name, field).map(ClusterState::from),
                ),
                "version" => fields.fill(
                    VERSION,
                    &mut value.version,
                    reader.read_object(name, field).map(Some),
                ),
                _ => reader.skip(name),
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{marshal_to_string, unmarshal_str};
    use crate::error::Error;
    use crate::model::{Kind, OptionalList};
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn full_cluster() -> Cluster {
        ClusterBuilder::new()
            .id("123")
            .href("/api/clusters_mgmt/v1/clusters/123")
            .name("mycluster")
            .cloud_provider(CloudProviderBuilder::new().id("aws").link(true))
            .region(CloudRegionBuilder::new().id("us-east-1").link(true))
            .version(VersionBuilder::new().id("openshift-v4.15.2").link(true))
            .creation_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
            .labels(
                ListBuilder::new()
                    .push(LabelBuilder::new().key("env").value("prod"))
                    .push(LabelBuilder::new().key("team").value("storage")),
            )
            .load_balancer_quota(4)
            .multi_az(false)
            .property("owner", "team-a")
            .state(ClusterState::Ready)
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_presence() {
        let cluster = full_cluster();
        let text = marshal_to_string(&cluster).unwrap();
        let read: Cluster = unmarshal_str(&text).unwrap();
        assert_eq!(read, cluster);
        assert_eq!(read.get_multi_az(), Some(false));
        assert_eq!(read.get_display_name(), None);
        assert_eq!(read.get_expiration_timestamp(), None);
        assert_eq!(read.state(), ClusterState::Ready);
        assert_eq!(read.property("owner"), Some("team-a"));
    }

    #[test]
    fn test_written_document() {
        let value = serde_json::to_value(full_cluster()).unwrap();
        assert_eq!(value["kind"], "Cluster");
        assert_eq!(value["cloud_provider"], json!({"kind": "CloudProviderLink", "id": "aws"}));
        assert_eq!(value["creation_timestamp"], "2024-03-01T12:30:00Z");
        assert_eq!(value["labels"]["kind"], "LabelList");
        assert_eq!(value["labels"]["items"][1]["key"], "team");
        assert_eq!(value["state"], "ready");
        assert!(value.get("display_name").is_none());
        assert!(value.get("external_id").is_none());
    }

    #[test]
    fn test_read_cluster_with_links() {
        let cluster: Cluster = unmarshal_str(
            r#"{
                "kind": "Cluster",
                "id": "123",
                "name": "mycluster",
                "region": {"kind": "CloudRegionLink", "id": "us-east-1", "href": "/api/clusters_mgmt/v1/cloud_providers/aws/regions/us-east-1"},
                "labels": [{"key": "env", "value": "prod"}],
                "state": "hibernating",
                "something_new": {"nested": true}
            }"#,
        )
        .unwrap();
        assert_eq!(cluster.kind_tag(), Kind::Full);
        let region = cluster.region().unwrap();
        assert!(region.is_link());
        assert_eq!(region.id(), "us-east-1");
        assert_eq!(cluster.labels().len(), 1);
        assert_eq!(cluster.labels().get(0).map(Label::value), Some("prod"));
        assert_eq!(cluster.state(), ClusterState::Hibernating);
        assert!(cluster.version().is_none());
    }

    #[test]
    fn test_absent_labels_are_safe() {
        let cluster = ClusterBuilder::new().name("bare").build().unwrap();
        let labels = cluster.labels();
        assert_eq!(labels.kind(), "LabelListNil");
        assert_eq!(labels.len(), 0);
        assert!(labels.get(3).is_none());
        assert!(labels.slice().is_empty());
        assert!(cluster.properties().is_empty());
        assert_eq!(cluster.state(), ClusterState::Unknown);
    }

    #[test]
    fn test_empty_labels_are_present() {
        let cluster = ClusterBuilder::new()
            .labels(ListBuilder::<LabelBuilder>::new())
            .build()
            .unwrap();
        assert!(cluster.labels().is_some());
        assert_eq!(
            serde_json::to_value(&cluster).unwrap(),
            json!({"kind": "Cluster", "labels": {"kind": "LabelList", "items": []}})
        );
    }

    #[test]
    fn test_unknown_state_round_trips() {
        let cluster: Cluster = unmarshal_str(r#"{"kind":"Cluster","state":"migrating"}"#).unwrap();
        assert_eq!(cluster.state().as_str(), "migrating");
        assert_eq!(
            marshal_to_string(&cluster).unwrap(),
            r#"{"kind":"Cluster","state":"migrating"}"#
        );
    }

    #[test]
    fn test_other_state_with_known_name_round_trips() {
        let cluster = ClusterBuilder::new()
            .state(ClusterState::Other("ready".to_string()))
            .build()
            .unwrap();
        assert_eq!(cluster.state(), ClusterState::Ready);
        let read: Cluster = unmarshal_str(&marshal_to_string(&cluster).unwrap()).unwrap();
        assert_eq!(read, cluster);
    }

    #[test]
    fn test_first_error_is_reported_in_document_order() {
        let err = unmarshal_str::<Cluster>(
            r#"{"kind":"Cluster","multi_az":"yes","region":{"name":7},"load_balancer_quota":"four"}"#,
        )
        .unwrap_err();
        assert!(err.is_parse_error());
        assert_matches!(err, Error::Parse { ref path, .. } if path == "multi_az");

        let err = unmarshal_str::<Cluster>(r#"{"region":{"name":7},"multi_az":"yes"}"#).unwrap_err();
        assert_matches!(err, Error::Parse { ref path, .. } if path == "region.name");
    }

    #[test]
    fn test_copy_then_edit_leaves_original() {
        let original = full_cluster();
        let edited = ClusterBuilder::new()
            .copy_from(Some(&original))
            .name("renamed")
            .labels(None)
            .build()
            .unwrap();
        assert_eq!(edited.name(), "renamed");
        assert!(edited.labels().is_none());
        assert_eq!(original.name(), "mycluster");
        assert_eq!(original.labels().len(), 2);

        let copy = ClusterBuilder::new().copy_from(Some(&original)).build().unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_link_only_cluster() {
        let cluster = ClusterBuilder::new()
            .id("123")
            .href("/api/clusters_mgmt/v1/clusters/123")
            .link(true)
            .build()
            .unwrap();
        assert_eq!(
            marshal_to_string(&cluster).unwrap(),
            r#"{"kind":"ClusterLink","id":"123","href":"/api/clusters_mgmt/v1/clusters/123"}"#
        );
    }
}
