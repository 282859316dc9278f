//! Codec Writer
//!
//! Resources are written through [`ObjectWriter`], a thin layer over a serde
//! map serializer. The `kind` entry always comes first; every other entry is
//! written only when its presence bit is set.

use crate::codec::timestamp;
use crate::model::{kind::Resource, List, ListResponse};
use chrono::{DateTime, FixedOffset};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::warn;

/// Streams one JSON object, skipping attributes without a value
pub struct ObjectWriter<S: Serializer> {
    map: S::SerializeMap,
    written: usize,
}

impl<S: Serializer> ObjectWriter<S> {
    /// Open the object and write its `kind`
    pub fn begin(serializer: S, kind: &str) -> Result<Self, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", kind)?;
        Ok(Self { map, written: 1 })
    }

    /// Write `name` if `present`
    pub fn field<V>(&mut self, present: bool, name: &'static str, value: &V) -> Result<(), S::Error>
    where
        V: Serialize + ?Sized,
    {
        if present {
            self.map.serialize_entry(name, value)?;
            self.written += 1;
        }
        Ok(())
    }

    /// Write a timestamp `name` if `present`
    pub fn timestamp(
        &mut self,
        present: bool,
        name: &'static str,
        value: &DateTime<FixedOffset>,
    ) -> Result<(), S::Error> {
        self.field(present, name, &timestamp::format(value))
    }

    /// Write an owned nested value `name` if `present` and the value exists
    pub fn nested<V>(
        &mut self,
        present: bool,
        name: &'static str,
        value: Option<&V>,
    ) -> Result<(), S::Error>
    where
        V: Serialize,
    {
        match (present, value) {
            (true, Some(value)) => self.field(true, name, value),
            (true, None) => {
                warn!(field = name, "Presence bit set without a value, omitting field");
                Ok(())
            }
            (false, _) => Ok(()),
        }
    }

    /// Number of entries written so far, `kind` included
    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the object
    pub fn end(self) -> Result<S::Ok, S::Error> {
        self.map.end()
    }
}

// =============================================================================
// Lists
// =============================================================================

/// Lists held as attributes are written as `{"kind", "href", "items"}` so a
/// link to a list survives a round trip.
impl<T: Resource + Serialize> Serialize for List<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(!self.href.is_empty(), "href", &self.href)?;
        writer.field(true, "items", &self.items)?;
        writer.end()
    }
}

impl<T: Resource + Serialize> Serialize for ListResponse<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, T::LIST_KIND)?;
        writer.field(self.page.is_some(), "page", &self.page)?;
        writer.field(self.size.is_some(), "size", &self.size)?;
        writer.field(self.total.is_some(), "total", &self.total)?;
        writer.nested(self.items.is_some(), "items", self.items.as_ref().map(|list| &list.items))?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::{CloudProvider, CloudProviderBuilder};
    use crate::model::{ListBuilder, ResourceBuilder};
    use serde_json::json;

    struct Sparse {
        name: Option<&'static str>,
        size: Option<i64>,
    }

    impl Serialize for Sparse {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut writer = ObjectWriter::begin(serializer, "Sparse")?;
            writer.field(self.name.is_some(), "name", &self.name)?;
            writer.nested(self.size.is_some(), "size", self.size.as_ref())?;
            // A set bit without a value must be skipped
            writer.nested::<i64>(true, "ghost", None)?;
            assert_eq!(writer.written(), 1 + self.name.is_some() as usize + self.size.is_some() as usize);
            writer.end()
        }
    }

    #[test]
    fn test_every_subset_is_valid_json() {
        for (name, size) in [(None, None), (Some("a"), None), (None, Some(2)), (Some("a"), Some(2))] {
            let text = serde_json::to_string(&Sparse { name, size }).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["kind"], "Sparse");
            assert_eq!(value.get("name").is_some(), name.is_some());
            assert_eq!(value.get("size").is_some(), size.is_some());
            assert!(value.get("ghost").is_none());
        }
    }

    #[test]
    fn test_kind_is_first() {
        let text = serde_json::to_string(&Sparse {
            name: Some("a"),
            size: Some(1),
        })
        .unwrap();
        assert!(text.starts_with(r#"{"kind":"Sparse""#));
    }

    #[test]
    fn test_list_attribute_shape() {
        let list: List<CloudProvider> = ListBuilder::new()
            .href("/api/clusters_mgmt/v1/cloud_providers")
            .link(true)
            .push(CloudProviderBuilder::new().id("aws").link(true))
            .build()
            .unwrap();
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "CloudProviderListLink",
                "href": "/api/clusters_mgmt/v1/cloud_providers",
                "items": [{"kind": "CloudProviderLink", "id": "aws"}]
            })
        );
    }

    #[test]
    fn test_list_response_shape() {
        let list: List<CloudProvider> = ListBuilder::new()
            .push(CloudProviderBuilder::new().id("aws"))
            .build()
            .unwrap();
        let response = ListResponse::new(list).with_page(1).with_total(1);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "CloudProviderList",
                "page": 1,
                "total": 1,
                "items": [{"kind": "CloudProvider", "id": "aws"}]
            })
        );
    }
}
