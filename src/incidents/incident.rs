//! Incident
//!
//! An incident owns its creator and the ordered list of events that make up
//! its timeline.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::incidents::event::{Event, EventBuilder};
use crate::incidents::user::{User, UserBuilder};
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{List, ListBuilder, Resource, ResourceBuilder};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const CREATED_AT: usize = 3;
const CREATOR: usize = 4;
const EVENTS: usize = 5;
const INCIDENT_NAME: usize = 6;
const PRODUCTS: usize = 7;
const SUMMARY: usize = 8;
const FIELDS: usize = 9;

// =============================================================================
// Value
// =============================================================================

/// Values of the 'incident' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Incident {
    fields: FieldSet,
    id: String,
    href: String,
    created_at: DateTime<FixedOffset>,
    creator: Option<User>,
    events: Option<List<Event>>,
    incident_name: String,
    products: Vec<String>,
    summary: String,
}

impl Resource for Incident {
    const KIND: &'static str = "Incident";
    const LINK_KIND: &'static str = "IncidentLink";
    const NIL_KIND: &'static str = "IncidentNil";
    const LIST_KIND: &'static str = "IncidentList";
    const LIST_LINK_KIND: &'static str = "IncidentListLink";
    const LIST_NIL_KIND: &'static str = "IncidentListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl Incident {
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

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.get_created_at().unwrap_or_default()
    }

    pub fn get_created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.fields.contains(CREATED_AT).then_some(self.created_at)
    }

    pub fn creator(&self) -> Option<&User> {
        if self.fields.contains(CREATOR) {
            self.creator.as_ref()
        } else {
            None
        }
    }

    /// Timeline of the incident, oldest first
    pub fn events(&self) -> Option<&List<Event>> {
        if self.fields.contains(EVENTS) {
            self.events.as_ref()
        } else {
            None
        }
    }

    pub fn incident_name(&self) -> &str {
        self.get_incident_name().unwrap_or_default()
    }

    pub fn get_incident_name(&self) -> Option<&str> {
        self.fields
            .contains(INCIDENT_NAME)
            .then_some(self.incident_name.as_str())
    }

    /// Products affected by the incident
    pub fn products(&self) -> &[String] {
        self.get_products().unwrap_or_default()
    }

    pub fn get_products(&self) -> Option<&[String]> {
        self.fields
            .contains(PRODUCTS)
            .then_some(self.products.as_slice())
    }

    pub fn summary(&self) -> &str {
        self.get_summary().unwrap_or_default()
    }

    pub fn get_summary(&self) -> Option<&str> {
        self.fields.contains(SUMMARY).then_some(self.summary.as_str())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder of [`Incident`] values
#[derive(Debug, Clone, Default)]
pub struct IncidentBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    created_at: DateTime<FixedOffset>,
    creator: Option<UserBuilder>,
    events: Option<ListBuilder<EventBuilder>>,
    incident_name: String,
    products: Vec<String>,
    summary: String,
}

impl IncidentBuilder {
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

    pub fn created_at(mut self, value: impl Into<DateTime<FixedOffset>>) -> Self {
        self.created_at = value.into();
        self.fields.insert(FIELDS, CREATED_AT);
        self
    }

    pub fn creator(mut self, value: impl Into<Option<UserBuilder>>) -> Self {
        self.creator = value.into();
        self.fields.mark(FIELDS, CREATOR, self.creator.is_some());
        self
    }

    pub fn events(mut self, value: impl Into<Option<ListBuilder<EventBuilder>>>) -> Self {
        self.events = value.into();
        self.fields.mark(FIELDS, EVENTS, self.events.is_some());
        self
    }

    pub fn incident_name(mut self, value: impl Into<String>) -> Self {
        self.incident_name = value.into();
        self.fields.insert(FIELDS, INCIDENT_NAME);
        self
    }

    pub fn products<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.products = values.into_iter().map(Into::into).collect();
        self.fields.insert(FIELDS, PRODUCTS);
        self
    }

    pub fn summary(mut self, value: impl Into<String>) -> Self {
        self.summary = value.into();
        self.fields.insert(FIELDS, SUMMARY);
        self
    }
}

impl ResourceBuilder for IncidentBuilder {
    type Output = Incident;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&Incident>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.created_at = object.created_at;
        self.creator = object
            .creator
            .as_ref()
            .map(|creator| UserBuilder::new().copy_from(Some(creator)));
        self.events = object
            .events
            .as_ref()
            .map(|events| ListBuilder::new().copy_from(Some(events)));
        self.incident_name = object.incident_name.clone();
        self.products = object.products.clone();
        self.summary = object.summary.clone();
        self
    }

    fn build(&self) -> Result<Incident> {
        Ok(Incident {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            created_at: self.created_at,
            creator: self.creator.as_ref().map(ResourceBuilder::build).transpose()?,
            events: self.events.as_ref().map(ListBuilder::build).transpose()?,
            incident_name: self.incident_name.clone(),
            products: self.products.clone(),
            summary: self.summary.clone(),
        })
    }
}

// =============================================================================
// Codec
// =============================================================================

impl Serialize for Incident {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = &self.fields;
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(fields.contains(ID), "id", &self.id)?;
        writer.field(fields.contains(HREF), "href", &self.href)?;
        writer.timestamp(fields.contains(CREATED_AT), "created_at", &self.created_at)?;
        writer.nested(fields.contains(CREATOR), "creator", self.creator.as_ref())?;
        writer.nested(fields.contains(EVENTS), "events", self.events.as_ref())?;
        writer.field(fields.contains(INCIDENT_NAME), "incident_name", &self.incident_name)?;
        writer.field(fields.contains(PRODUCTS), "products", &self.products)?;
        writer.field(fields.contains(SUMMARY), "summary", &self.summary)?;
        writer.end()
    }
}

impl ReadResource for Incident {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = Incident {
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
                "created_at" => fields.fill(
                    CREATED_AT,
                    &mut value.created_at,
                    reader.read_timestamp(name, field),
                ),
                "creator" => fields.fill(
                    CREATOR,
                    &mut value.creator,
                    reader.read_object(name, field).map(Some),
                ),
                "events" => fields.fill(
                    EVENTS,
                    &mut value.events,
                    reader.read_list(name, field).map(Some),
                ),
                "incident_name" => fields.fill(
                    INCIDENT_NAME,
                    &mut value.incident_name,
                    reader.read_string(name, field),
                ),
                "products" => fields.fill(
                    PRODUCTS,
                    &mut value.products,
                    reader.read_strings(name, field),
                ),
                "summary" => {
                    fields.fill(SUMMARY, &mut value.summary, reader.read_string(name, field))
                }
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
    use crate::model::OptionalList;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_nested_build_error_propagates() {
        let err = IncidentBuilder::new()
            .incident_name("api-outage")
            .creator(UserBuilder::new().username("oncall"))
            .events(
                ListBuilder::new()
                    .push(EventBuilder::new().note("first"))
                    .push(EventBuilder::new().payload_raw("{\"unterminated\": ")),
            )
            .build()
            .unwrap_err();
        assert!(err.is_build_error());
        assert_matches!(err, Error::InvalidAttributeJson { ref attribute, .. } if attribute == "payload");
    }

    #[test]
    fn test_timeline_round_trip() {
        let incident = IncidentBuilder::new()
            .id("inc-1")
            .incident_name("api-outage")
            .products(["clusters", "accounts"])
            .events(
                ListBuilder::new()
                    .push(EventBuilder::new().id("e1").note("detected"))
                    .push(
                        EventBuilder::new()
                            .id("e2")
                            .payload(json!({"status": "resolved"})),
                    ),
            )
            .build()
            .unwrap();
        let read: Incident = unmarshal_str(&marshal_to_string(&incident).unwrap()).unwrap();
        assert_eq!(read, incident);

        let mut ids = Vec::new();
        read.events().each(|event| {
            ids.push(event.id().to_string());
            true
        });
        assert_eq!(ids, vec!["e1", "e2"]);
        assert_eq!(read.events().get(1).map(Event::payload), Some(&json!({"status": "resolved"})));
        assert!(read.creator().is_none());
    }

    #[test]
    fn test_nested_event_error_path() {
        let err = unmarshal_str::<Incident>(
            r#"{"kind":"Incident","events":{"kind":"EventList","items":[{"id":"e1"},{"created_at":"yesterday"}]}}"#,
        )
        .unwrap_err();
        assert_matches!(err, Error::Parse { ref path, .. } if path == "events.items[1].created_at");
    }
}
