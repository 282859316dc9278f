//! Version
//!
//! An installable release. Carries a sequence of strings and a timestamp.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{Resource, ResourceBuilder};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const AVAILABLE_UPGRADES: usize = 3;
const DEFAULT: usize = 4;
const ENABLED: usize = 5;
const END_OF_LIFE_TIMESTAMP: usize = 6;
const RAW_ID: usize = 7;
const FIELDS: usize = 8;

/// Values of the 'version' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Version {
    fields: FieldSet,
    id: String,
    href: String,
    available_upgrades: Vec<String>,
    default: bool,
    enabled: bool,
    end_of_life_timestamp: DateTime<FixedOffset>,
    raw_id: String,
}

impl Resource for Version {
    const KIND: &'static str = "Version";
    const LINK_KIND: &'static str = "VersionLink";
    const NIL_KIND: &'static str = "VersionNil";
    const LIST_KIND: &'static str = "VersionList";
    const LIST_LINK_KIND: &'static str = "VersionListLink";
    const LIST_NIL_KIND: &'static str = "VersionListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl Version {
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

    /// Versions this one can be upgraded to, empty if not set
    pub fn available_upgrades(&self) -> &[String] {
        self.get_available_upgrades().unwrap_or_default()
    }

    pub fn get_available_upgrades(&self) -> Option<&[String]> {
        self.fields
            .contains(AVAILABLE_UPGRADES)
            .then_some(self.available_upgrades.as_slice())
    }

    /// Whether this is the default version; sent as `default` on the wire
    pub fn default_flag(&self) -> bool {
        self.get_default_flag().unwrap_or_default()
    }

    pub fn get_default_flag(&self) -> Option<bool> {
        self.fields.contains(DEFAULT).then_some(self.default)
    }

    pub fn enabled(&self) -> bool {
        self.get_enabled().unwrap_or_default()
    }

    pub fn get_enabled(&self) -> Option<bool> {
        self.fields.contains(ENABLED).then_some(self.enabled)
    }

    /// End of life of the version, the Unix epoch if not set
    pub fn end_of_life_timestamp(&self) -> DateTime<FixedOffset> {
        self.get_end_of_life_timestamp().unwrap_or_default()
    }

    pub fn get_end_of_life_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.fields
            .contains(END_OF_LIFE_TIMESTAMP)
            .then_some(self.end_of_life_timestamp)
    }

    /// Version string as reported by the installer, e.g. `4.15.2`
    pub fn raw_id(&self) -> &str {
        self.get_raw_id().unwrap_or_default()
    }

    pub fn get_raw_id(&self) -> Option<&str> {
        self.fields.contains(RAW_ID).then_some(self.raw_id.as_str())
    }
}

/// Builder of [`Version`] values
#[derive(Debug, Clone, Default)]
pub struct VersionBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    available_upgrades: Vec<String>,
    default: bool,
    enabled: bool,
    end_of_life_timestamp: DateTime<FixedOffset>,
    raw_id: String,
}

impl VersionBuilder {
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

    pub fn available_upgrades<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.available_upgrades = values.into_iter().map(Into::into).collect();
        self.fields.insert(FIELDS, AVAILABLE_UPGRADES);
        self
    }

    pub fn default_flag(mut self, value: bool) -> Self {
        self.default = value;
        self.fields.insert(FIELDS, DEFAULT);
        self
    }

    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = value;
        self.fields.insert(FIELDS, ENABLED);
        self
    }

    pub fn end_of_life_timestamp(mut self, value: impl Into<DateTime<FixedOffset>>) -> Self {
        self.end_of_life_timestamp = value.into();
        self.fields.insert(FIELDS, END_OF_LIFE_TIMESTAMP);
        self
    }

    pub fn raw_id(mut self, value: impl Into<String>) -> Self {
        self.raw_id = value.into();
        self.fields.insert(FIELDS, RAW_ID);
        self
    }
}

impl ResourceBuilder for VersionBuilder {
    type Output = Version;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&Version>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.available_upgrades = object.available_upgrades.clone();
        self.default = object.default;
        self.enabled = object.enabled;
        self.end_of_life_timestamp = object.end_of_life_timestamp;
        self.raw_id = object.raw_id.clone();
        self
    }

    fn build(&self) -> Result<Version> {
        Ok(Version {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            available_upgrades: self.available_upgrades.clone(),
            default: self.default,
            enabled: self.enabled,
            end_of_life_timestamp: self.end_of_life_timestamp,
            raw_id: self.raw_id.clone(),
        })
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(self.fields.contains(ID), "id", &self.id)?;
        writer.field(self.fields.contains(HREF), "href", &self.href)?;
        writer.field(
            self.fields.contains(AVAILABLE_UPGRADES),
            "available_upgrades",
            &self.available_upgrades,
        )?;
        writer.field(self.fields.contains(DEFAULT), "default", &self.default)?;
        writer.field(self.fields.contains(ENABLED), "enabled", &self.enabled)?;
        writer.timestamp(
            self.fields.contains(END_OF_LIFE_TIMESTAMP),
            "end_of_life_timestamp",
            &self.end_of_life_timestamp,
        )?;
        writer.field(self.fields.contains(RAW_ID), "raw_id", &self.raw_id)?;
        writer.end()
    }
}

impl ReadResource for Version {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = Version {
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
                "available_upgrades" => value.fields.fill(
                    AVAILABLE_UPGRADES,
                    &mut value.available_upgrades,
                    reader.read_strings(name, field),
                ),
                "default" => {
                    value.fields.fill(DEFAULT, &mut value.default, reader.read_bool(name, field))
                }
                "enabled" => {
                    value.fields.fill(ENABLED, &mut value.enabled, reader.read_bool(name, field))
                }
                "end_of_life_timestamp" => value.fields.fill(
                    END_OF_LIFE_TIMESTAMP,
                    &mut value.end_of_life_timestamp,
                    reader.read_timestamp(name, field),
                ),
                "raw_id" => {
                    value.fields.fill(RAW_ID, &mut value.raw_id, reader.read_string(name, field))
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
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_round_trip_with_timestamp_and_strings() {
        let version = VersionBuilder::new()
            .id("openshift-v4.15.2")
            .raw_id("4.15.2")
            .available_upgrades(["4.15.3", "4.16.0"])
            .default_flag(true)
            .end_of_life_timestamp(Utc.with_ymd_and_hms(2025, 8, 27, 0, 0, 0).unwrap())
            .build()
            .unwrap();
        let text = marshal_to_string(&version).unwrap();
        assert!(text.contains(r#""end_of_life_timestamp":"2025-08-27T00:00:00Z""#));
        assert!(text.contains(r#""available_upgrades":["4.15.3","4.16.0"]"#));

        let read: Version = unmarshal_str(&text).unwrap();
        assert_eq!(read, version);
        assert_eq!(read.get_enabled(), None);
        assert!(read.default_flag());
    }

    #[test]
    fn test_empty_sequence_is_present() {
        let version = VersionBuilder::new()
            .available_upgrades(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(version.get_available_upgrades(), Some(&[][..]));
        assert_eq!(
            marshal_to_string(&version).unwrap(),
            r#"{"kind":"Version","available_upgrades":[]}"#
        );

        let unset = VersionBuilder::new().build().unwrap();
        assert_eq!(unset.get_available_upgrades(), None);
        assert!(unset.available_upgrades().is_empty());
    }

    #[test]
    fn test_bad_timestamp_keeps_scanning() {
        let err = unmarshal_str::<Version>(
            r#"{"kind":"Version","end_of_life_timestamp":"not a date","raw_id":"4.15.2"}"#,
        )
        .unwrap_err();
        assert_matches!(err, Error::Parse { ref path, .. } if path == "end_of_life_timestamp");

        // The same document read field by field still yields the later fields
        let document: Value = serde_json::from_str(
            r#"{"end_of_life_timestamp":"not a date","raw_id":"4.15.2"}"#,
        )
        .unwrap();
        let mut reader = Reader::new();
        let version = Version::read_fields(&mut reader, document.as_object().unwrap());
        assert_eq!(version.raw_id(), "4.15.2");
        assert_eq!(version.get_end_of_life_timestamp(), None);
        assert!(reader.error().is_some());
    }
}
