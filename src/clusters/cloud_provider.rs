//! Cloud Provider
//!
//! A cloud provider that clusters can be placed on. Usually seen as a link
//! inside other resources.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{Resource, ResourceBuilder};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const DISPLAY_NAME: usize = 3;
const NAME: usize = 4;
const FIELDS: usize = 5;

// =============================================================================
// Value
// =============================================================================

/// Values of the 'cloud_provider' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudProvider {
    fields: FieldSet,
    id: String,
    href: String,
    display_name: String,
    name: String,
}

impl Resource for CloudProvider {
    const KIND: &'static str = "CloudProvider";
    const LINK_KIND: &'static str = "CloudProviderLink";
    const NIL_KIND: &'static str = "CloudProviderNil";
    const LIST_KIND: &'static str = "CloudProviderList";
    const LIST_LINK_KIND: &'static str = "CloudProviderListLink";
    const LIST_NIL_KIND: &'static str = "CloudProviderListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl CloudProvider {
    /// Identifier of the object, empty if not set
    pub fn id(&self) -> &str {
        self.get_id().unwrap_or_default()
    }

    /// Identifier of the object
    pub fn get_id(&self) -> Option<&str> {
        self.fields.contains(ID).then_some(self.id.as_str())
    }

    /// Link to the object, empty if not set
    pub fn href(&self) -> &str {
        self.get_href().unwrap_or_default()
    }

    /// Link to the object
    pub fn get_href(&self) -> Option<&str> {
        self.fields.contains(HREF).then_some(self.href.as_str())
    }

    /// Human friendly name, e.g. `Amazon Web Services`
    pub fn display_name(&self) -> &str {
        self.get_display_name().unwrap_or_default()
    }

    pub fn get_display_name(&self) -> Option<&str> {
        self.fields
            .contains(DISPLAY_NAME)
            .then_some(self.display_name.as_str())
    }

    /// Short name, e.g. `aws`
    pub fn name(&self) -> &str {
        self.get_name().unwrap_or_default()
    }

    pub fn get_name(&self) -> Option<&str> {
        self.fields.contains(NAME).then_some(self.name.as_str())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder of [`CloudProvider`] values
#[derive(Debug, Clone, Default)]
pub struct CloudProviderBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    display_name: String,
    name: String,
}

impl CloudProviderBuilder {
    /// Create an empty builder
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

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self.fields.insert(FIELDS, DISPLAY_NAME);
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self.fields.insert(FIELDS, NAME);
        self
    }
}

impl ResourceBuilder for CloudProviderBuilder {
    type Output = CloudProvider;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&CloudProvider>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.display_name = object.display_name.clone();
        self.name = object.name.clone();
        self
    }

    fn build(&self) -> Result<CloudProvider> {
        Ok(CloudProvider {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            display_name: self.display_name.clone(),
            name: self.name.clone(),
        })
    }
}

// =============================================================================
// Codec
// =============================================================================

impl Serialize for CloudProvider {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(self.fields.contains(ID), "id", &self.id)?;
        writer.field(self.fields.contains(HREF), "href", &self.href)?;
        writer.field(self.fields.contains(DISPLAY_NAME), "display_name", &self.display_name)?;
        writer.field(self.fields.contains(NAME), "name", &self.name)?;
        writer.end()
    }
}

impl ReadResource for CloudProvider {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = CloudProvider {
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
                "display_name" => value.fields.fill(
                    DISPLAY_NAME,
                    &mut value.display_name,
                    reader.read_string(name, field),
                ),
                "name" => value.fields.fill(NAME, &mut value.name, reader.read_string(name, field)),
                _ => reader.skip(name),
            }
        }
        value
    }
}
