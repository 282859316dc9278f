//! Event
//!
//! Entry in the timeline of an incident. The payload is an arbitrary JSON
//! document that is carried through without interpretation.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::incidents::user::{User, UserBuilder};
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{OpaqueInput, Resource, ResourceBuilder};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const CREATED_AT: usize = 3;
const CREATOR: usize = 4;
const EVENT_TYPE: usize = 5;
const EXTERNAL_REFS: usize = 6;
const NOTE: usize = 7;
const PAYLOAD: usize = 8;
const FIELDS: usize = 9;

static NULL: Value = Value::Null;

// =============================================================================
// Value
// =============================================================================

/// Values of the 'event' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    fields: FieldSet,
    id: String,
    href: String,
    created_at: DateTime<FixedOffset>,
    creator: Option<User>,
    event_type: String,
    external_refs: Vec<String>,
    note: String,
    payload: Value,
}

impl Resource for Event {
    const KIND: &'static str = "Event";
    const LINK_KIND: &'static str = "EventLink";
    const NIL_KIND: &'static str = "EventNil";
    const LIST_KIND: &'static str = "EventList";
    const LIST_LINK_KIND: &'static str = "EventListLink";
    const LIST_NIL_KIND: &'static str = "EventListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl Event {
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

    /// Type of the event, e.g. `note` or `status_change`
    pub fn event_type(&self) -> &str {
        self.get_event_type().unwrap_or_default()
    }

    pub fn get_event_type(&self) -> Option<&str> {
        self.fields
            .contains(EVENT_TYPE)
            .then_some(self.event_type.as_str())
    }

    /// References to tickets in external systems
    pub fn external_refs(&self) -> &[String] {
        self.get_external_refs().unwrap_or_default()
    }

    pub fn get_external_refs(&self) -> Option<&[String]> {
        self.fields
            .contains(EXTERNAL_REFS)
            .then_some(self.external_refs.as_slice())
    }

    pub fn note(&self) -> &str {
        self.get_note().unwrap_or_default()
    }

    pub fn get_note(&self) -> Option<&str> {
        self.fields.contains(NOTE).then_some(self.note.as_str())
    }

    /// Payload document, `null` if not set.
    ///
    /// A payload explicitly set to `null` is present; use
    /// [`Event::get_payload`] to tell the two apart.
    pub fn payload(&self) -> &Value {
        self.get_payload().unwrap_or(&NULL)
    }

    pub fn get_payload(&self) -> Option<&Value> {
        self.fields.contains(PAYLOAD).then_some(&self.payload)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder of [`Event`] values
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    created_at: DateTime<FixedOffset>,
    creator: Option<UserBuilder>,
    event_type: String,
    external_refs: Vec<String>,
    note: String,
    payload: OpaqueInput,
}

impl EventBuilder {
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

    pub fn event_type(mut self, value: impl Into<String>) -> Self {
        self.event_type = value.into();
        self.fields.insert(FIELDS, EVENT_TYPE);
        self
    }

    pub fn external_refs<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.external_refs = values.into_iter().map(Into::into).collect();
        self.fields.insert(FIELDS, EXTERNAL_REFS);
        self
    }

    pub fn note(mut self, value: impl Into<String>) -> Self {
        self.note = value.into();
        self.fields.insert(FIELDS, NOTE);
        self
    }

    /// Set the payload to an already parsed document
    pub fn payload(mut self, value: Value) -> Self {
        self.payload = OpaqueInput::Parsed(value);
        self.fields.insert(FIELDS, PAYLOAD);
        self
    }

    /// Set the payload to JSON text. The text is parsed by `build`, which
    /// fails if it is not valid JSON.
    pub fn payload_raw(mut self, text: impl Into<String>) -> Self {
        self.payload = OpaqueInput::Raw(text.into());
        self.fields.insert(FIELDS, PAYLOAD);
        self
    }
}

impl ResourceBuilder for EventBuilder {
    type Output = Event;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&Event>) -> Self {
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
        self.event_type = object.event_type.clone();
        self.external_refs = object.external_refs.clone();
        self.note = object.note.clone();
        self.payload = OpaqueInput::Parsed(object.payload.clone());
        self
    }

    fn build(&self) -> Result<Event> {
        let payload = if self.fields.contains(PAYLOAD) {
            self.payload.resolve("payload")?
        } else {
            Value::Null
        };
        Ok(Event {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            created_at: self.created_at,
            creator: self.creator.as_ref().map(ResourceBuilder::build).transpose()?,
            event_type: self.event_type.clone(),
            external_refs: self.external_refs.clone(),
            note: self.note.clone(),
            payload,
        })
    }
}

// =============================================================================
// Codec
// =============================================================================

impl Serialize for Event {
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
        writer.field(fields.contains(EVENT_TYPE), "event_type", &self.event_type)?;
        writer.field(fields.contains(EXTERNAL_REFS), "external_refs", &self.external_refs)?;
        writer.field(fields.contains(NOTE), "note", &self.note)?;
        writer.field(fields.contains(PAYLOAD), "payload", &self.payload)?;
        writer.end()
    }
}

impl ReadResource for Event {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = Event {
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
                "event_type" => fields.fill(
                    EVENT_TYPE,
                    &mut value.event_type,
                    reader.read_string(name, field),
                ),
                "external_refs" => fields.fill(
                    EXTERNAL_REFS,
                    &mut value.external_refs,
                    reader.read_strings(name, field),
                ),
                "note" => fields.fill(NOTE, &mut value.note, reader.read_string(name, field)),
                "payload" => fields.fill(
                    PAYLOAD,
                    &mut value.payload,
                    Some(reader.read_opaque(name, field)),
                ),
                _ => reader.skip(name),
            }
        }
        value
    }
}
