//! Label
//!
//! Key/value pair attached to a cluster. Clusters hold their labels as a
//! nested list.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{Resource, ResourceBuilder};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const KEY: usize = 3;
const VALUE: usize = 4;
const FIELDS: usize = 5;

/// Values of the 'label' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    fields: FieldSet,
    id: String,
    href: String,
    key: String,
    value: String,
}

impl Resource for Label {
    const KIND: &'static str = "Label";
    const LINK_KIND: &'static str = "LabelLink";
    const NIL_KIND: &'static str = "LabelNil";
    const LIST_KIND: &'static str = "LabelList";
    const LIST_LINK_KIND: &'static str = "LabelListLink";
    const LIST_NIL_KIND: &'static str = "LabelListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl Label {
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

    pub fn key(&self) -> &str {
        self.get_key().unwrap_or_default()
    }

    pub fn get_key(&self) -> Option<&str> {
        self.fields.contains(KEY).then_some(self.key.as_str())
    }

    pub fn value(&self) -> &str {
        self.get_value().unwrap_or_default()
    }

    pub fn get_value(&self) -> Option<&str> {
        self.fields.contains(VALUE).then_some(self.value.as_str())
    }
}

/// Builder of [`Label`] values
#[derive(Debug, Clone, Default)]
pub struct LabelBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    key: String,
    value: String,
}

impl LabelBuilder {
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

    pub fn key(mut self, value: impl Into<String>) -> Self {
        self.key = value.into();
        self.fields.insert(FIELDS, KEY);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.fields.insert(FIELDS, VALUE);
        self
    }
}

impl ResourceBuilder for LabelBuilder {
    type Output = Label;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&Label>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.key = object.key.clone();
        self.value = object.value.clone();
        self
    }

    fn build(&self) -> Result<Label> {
        Ok(Label {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            key: self.key.clone(),
            value: self.value.clone(),
        })
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(self.fields.contains(ID), "id", &self.id)?;
        writer.field(self.fields.contains(HREF), "href", &self.href)?;
        writer.field(self.fields.contains(KEY), "key", &self.key)?;
        writer.field(self.fields.contains(VALUE), "value", &self.value)?;
        writer.end()
    }
}

impl ReadResource for Label {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = Label {
            fields: fresh_fields::<Self>(),
            ..Self::default()
        };
        for (name, field) in object {
            match name.as_str() {
                "kind" => {
                    let link = reader.read_kind(name, field, Self::LINK_KIND);
                    value.fields.mark(FIELDS, LINK, link);
                }
                "id" => value.fields.fill(ID, &mut value.id, reader.read_string(name, field)),
                "href" => value.fields.fill(HREF, &mut value.href, reader.read_string(name, field)),
                "key" => value.fields.fill(KEY, &mut value.key, reader.read_string(name, field)),
                "value" => value.fields.fill(VALUE, &mut value.value, reader.read_string(name, field)),
                _ => reader.skip(name),
            }
        }
        value
    }
}
