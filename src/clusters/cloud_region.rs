//! Cloud Region
//!
//! A region of a cloud provider. The provider is owned by the region value
//! and is normally a link.

use crate::clusters::cloud_provider::{CloudProvider, CloudProviderBuilder};
use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{Resource, ResourceBuilder};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const CLOUD_PROVIDER: usize = 3;
const DISPLAY_NAME: usize = 4;
const ENABLED: usize = 5;
const NAME: usize = 6;
const SUPPORTS_MULTI_AZ: usize = 7;
const FIELDS: usize = 8;

// =============================================================================
// Value
// =============================================================================

/// Values of the 'cloud_region' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudRegion {
    fields: FieldSet,
    id: String,
    href: String,
    cloud_provider: Option<CloudProvider>,
    display_name: String,
    enabled: bool,
    name: String,
    supports_multi_az: bool,
}

impl Resource for CloudRegion {
    const KIND: &'static str = "CloudRegion";
    const LINK_KIND: &'static str = "CloudRegionLink";
    const NIL_KIND: &'static str = "CloudRegionNil";
    const LIST_KIND: &'static str = "CloudRegionList";
    const LIST_LINK_KIND: &'static str = "CloudRegionListLink";
    const LIST_NIL_KIND: &'static str = "CloudRegionListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl CloudRegion {
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

    /// Provider this region belongs to
    pub fn cloud_provider(&self) -> Option<&CloudProvider> {
        if self.fields.contains(CLOUD_PROVIDER) {
            self.cloud_provider.as_ref()
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        self.get_display_name().unwrap_or_default()
    }

    pub fn get_display_name(&self) -> Option<&str> {
        self.fields
            .contains(DISPLAY_NAME)
            .then_some(self.display_name.as_str())
    }

    /// Whether the region accepts new clusters, false if not set
    pub fn enabled(&self) -> bool {
        self.get_enabled().unwrap_or_default()
    }

    pub fn get_enabled(&self) -> Option<bool> {
        self.fields.contains(ENABLED).then_some(self.enabled)
    }

    pub fn name(&self) -> &str {
        self.get_name().unwrap_or_default()
    }

    pub fn get_name(&self) -> Option<&str> {
        self.fields.contains(NAME).then_some(self.name.as_str())
    }

    pub fn supports_multi_az(&self) -> bool {
        self.get_supports_multi_az().unwrap_or_default()
    }

    pub fn get_supports_multi_az(&self) -> Option<bool> {
        self.fields
            .contains(SUPPORTS_MULTI_AZ)
            .then_some(self.supports_multi_az)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder of [`CloudRegion`] values
#[derive(Debug, Clone, Default)]
pub struct CloudRegionBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    cloud_provider: Option<CloudProviderBuilder>,
    display_name: String,
    enabled: bool,
    name: String,
    supports_multi_az: bool,
}

impl CloudRegionBuilder {
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

    /// Set the provider; `None` unsets it
    pub fn cloud_provider(mut self, value: impl Into<Option<CloudProviderBuilder>>) -> Self {
        self.cloud_provider = value.into();
        self.fields
            .mark(FIELDS, CLOUD_PROVIDER, self.cloud_provider.is_some());
        self
    }

    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self.fields.insert(FIELDS, DISPLAY_NAME);
        self
    }

    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = value;
        self.fields.insert(FIELDS, ENABLED);
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self.fields.insert(FIELDS, NAME);
        self
    }

    pub fn supports_multi_az(mut self, value: bool) -> Self {
        self.supports_multi_az = value;
        self.fields.insert(FIELDS, SUPPORTS_MULTI_AZ);
        self
    }
}

impl ResourceBuilder for CloudRegionBuilder {
    type Output = CloudRegion;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&CloudRegion>) -> Self {
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
        self.display_name = object.display_name.clone();
        self.enabled = object.enabled;
        self.name = object.name.clone();
        self.supports_multi_az = object.supports_multi_az;
        self
    }

    fn build(&self) -> Result<CloudRegion> {
        Ok(CloudRegion {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            cloud_provider: self
                .cloud_provider
                .as_ref()
                .map(ResourceBuilder::build)
                .transpose()?,
            display_name: self.display_name.clone(),
            enabled: self.enabled,
            name: self.name.clone(),
            supports_multi_az: self.supports_multi_az,
        })
    }
}

// =============================================================================
// Codec
// =============================================================================

impl Serialize for CloudRegion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(self.fields.contains(ID), "id", &self.id)?;
        writer.field(self.fields.contains(HREF), "href", &self.href)?;
        writer.nested(
            self.fields.contains(CLOUD_PROVIDER),
            "cloud_provider",
            self.cloud_provider.as_ref(),
        )?;
        writer.field(self.fields.contains(DISPLAY_NAME), "display_name", &self.display_name)?;
        writer.field(self.fields.contains(ENABLED), "enabled", &self.enabled)?;
        writer.field(self.fields.contains(NAME), "name", &self.name)?;
        writer.field(
            self.fields.contains(SUPPORTS_MULTI_AZ),
            "supports_multi_az",
            &self.supports_multi_az,
        )?;
        writer.end()
    }
}

impl ReadResource for CloudRegion {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = CloudRegion {
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
                "cloud_provider" => value.fields.fill(
                    CLOUD_PROVIDER,
                    &mut value.cloud_provider,
                    reader.read_object(name, field).map(Some),
                ),
                "display_name" => value.fields.fill(
                    DISPLAY_NAME,
                    &mut value.display_name,
                    reader.read_string(name, field),
                ),
                "enabled" => {
                    value.fields.fill(ENABLED, &mut value.enabled, reader.read_bool(name, field))
                }
                "name" => value.fields.fill(NAME, &mut value.name, reader.read_string(name, field)),
                "supports_multi_az" => value.fields.fill(
                    SUPPORTS_MULTI_AZ,
                    &mut value.supports_multi_az,
                    reader.read_bool(name, field),
                ),
                _ => reader.skip(name),
            }
        }
        value
    }
}
