//! Codec Reader
//!
//! A [`Reader`] walks a parsed JSON document field by field. Problems with a
//! single field (wrong type, malformed timestamp) are recorded in the
//! reader's error slot and scanning goes on; the caller decides what to do
//! with the first recorded error once the whole document has been consumed.
//! Unknown fields are skipped.

use crate::codec::timestamp;
use crate::error::{Error, Result};
use crate::model::field_set::FieldSet;
use crate::model::kind::Resource;
use crate::model::{List, ListResponse};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A type that can be read from the fields of a JSON object
pub trait ReadResource: Sized {
    /// Read `object` into a freshly allocated value
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self;
}

/// Field-by-field reader with a shared error slot
#[derive(Debug, Default)]
pub struct Reader {
    path: Vec<String>,
    error: Option<Error>,
    dropped: usize,
}

impl Reader {
    /// Create a reader with an empty error slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Dotted path of `name` below the object being read
    fn location(&self, name: &str) -> String {
        if self.path.is_empty() {
            return name.to_string();
        }
        let mut location = self.path.join(".");
        if !name.is_empty() {
            location.push('.');
            location.push_str(name);
        }
        location
    }

    /// Record a problem with field `name`. Only the first problem is kept.
    pub fn report_error(&mut self, name: &str, message: impl Into<String>) {
        let path = self.location(name);
        let message = message.into();
        if self.error.is_some() {
            self.dropped += 1;
            debug!(path = %path, message = %message, "Parse error dropped, an earlier one is recorded");
            return;
        }
        debug!(path = %path, message = %message, "Parse error recorded");
        self.error = Some(Error::Parse { path, message });
    }

    /// First recorded error, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Number of errors reported after the first one
    pub fn dropped_errors(&self) -> usize {
        self.dropped
    }

    /// Hand out `value`, or the first recorded error
    pub fn finish<T>(self, value: T) -> Result<T> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }

    /// Skip a field nobody declared
    pub fn skip(&self, name: &str) {
        trace!(field = %self.location(name), "Ignoring unknown field");
    }

    fn mismatch(&mut self, name: &str, expected: &str, found: &Value) {
        self.report_error(
            name,
            format!("expected {}, found {}", expected, type_name(found)),
        );
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    /// Read a `kind` field; true if it names the link kind
    pub fn read_kind(&mut self, name: &str, value: &Value, link_kind: &str) -> bool {
        match value {
            Value::String(text) => text == link_kind,
            Value::Null => false,
            other => {
                self.mismatch(name, "a string", other);
                false
            }
        }
    }

    /// Read a string
    pub fn read_string(&mut self, name: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => {
                self.mismatch(name, "a string", other);
                None
            }
        }
    }

    /// Read a boolean
    pub fn read_bool(&mut self, name: &str, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(flag) => Some(*flag),
            Value::Null => None,
            other => {
                self.mismatch(name, "a boolean", other);
                None
            }
        }
    }

    /// Read an integer
    pub fn read_integer(&mut self, name: &str, value: &Value) -> Option<i64> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Some(integer),
                None => {
                    self.report_error(name, format!("expected an integer, found {}", number));
                    None
                }
            },
            Value::Null => None,
            other => {
                self.mismatch(name, "an integer", other);
                None
            }
        }
    }

    /// Read an RFC 3339 timestamp
    pub fn read_timestamp(&mut self, name: &str, value: &Value) -> Option<DateTime<FixedOffset>> {
        let text = self.read_string(name, value)?;
        match timestamp::parse(&text) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.report_error(name, format!("invalid timestamp '{}': {}", text, e));
                None
            }
        }
    }

    /// Read an opaque value. `null` is a value like any other.
    pub fn read_opaque(&mut self, _name: &str, value: &Value) -> Value {
        value.clone()
    }

    // =========================================================================
    // Collections of scalars
    // =========================================================================

    /// Read an array of strings
    pub fn read_strings(&mut self, name: &str, value: &Value) -> Option<Vec<String>> {
        match value {
            Value::Array(elements) => Some(
                elements
                    .iter()
                    .enumerate()
                    .filter_map(|(index, element)| {
                        self.read_string(&format!("{}[{}]", name, index), element)
                    })
                    .collect(),
            ),
            Value::Null => None,
            other => {
                self.mismatch(name, "an array", other);
                None
            }
        }
    }

    /// Read an object of string values
    pub fn read_string_map(&mut self, name: &str, value: &Value) -> Option<BTreeMap<String, String>> {
        match value {
            Value::Object(entries) => {
                let mut map = BTreeMap::new();
                for (key, element) in entries {
                    if let Some(text) = self.read_string(&format!("{}.{}", name, key), element) {
                        map.insert(key.clone(), text);
                    }
                }
                Some(map)
            }
            Value::Null => None,
            other => {
                self.mismatch(name, "an object", other);
                None
            }
        }
    }

    // =========================================================================
    // Nested values
    // =========================================================================

    /// Read a nested object with its own reader
    pub fn read_object<T: ReadResource>(&mut self, name: &str, value: &Value) -> Option<T> {
        match value {
            Value::Object(object) => {
                self.path.push(name.to_string());
                let read = T::read_fields(self, object);
                self.path.pop();
                Some(read)
            }
            Value::Null => None,
            other => {
                self.mismatch(name, "an object", other);
                None
            }
        }
    }

    /// Read an array of objects, element by element
    pub fn read_array<T: ReadResource>(&mut self, name: &str, value: &Value) -> Option<Vec<T>> {
        match value {
            Value::Array(elements) => Some(
                elements
                    .iter()
                    .enumerate()
                    .filter_map(|(index, element)| {
                        self.read_object(&format!("{}[{}]", name, index), element)
                    })
                    .collect(),
            ),
            Value::Null => None,
            other => {
                self.mismatch(name, "an array", other);
                None
            }
        }
    }

    /// Read a list attribute, either in `{"kind", "href", "items"}` form or
    /// as a bare array of items
    pub fn read_list<T>(&mut self, name: &str, value: &Value) -> Option<List<T>>
    where
        T: Resource + ReadResource,
    {
        match value {
            Value::Object(_) => self.read_object(name, value),
            Value::Array(_) => self.read_array(name, value).map(List::from),
            Value::Null => None,
            other => {
                self.mismatch(name, "an object or array", other);
                None
            }
        }
    }
}

/// Fresh presence set sized for `T`, all bits clear
pub fn fresh_fields<T: Resource>() -> FieldSet {
    FieldSet::with_len(T::FIELD_COUNT)
}

/// Short name of the JSON type of `value`
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Lists
// =============================================================================

impl<T: Resource + ReadResource> ReadResource for List<T> {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut list = List::default();
        for (name, value) in object {
            match name.as_str() {
                "kind" => list.link = reader.read_kind(name, value, T::LIST_LINK_KIND),
                "href" => {
                    if let Some(href) = reader.read_string(name, value) {
                        list.href = href;
                    }
                }
                "items" => {
                    if let Some(items) = reader.read_array(name, value) {
                        list.items = items;
                    }
                }
                _ => reader.skip(name),
            }
        }
        list
    }
}

impl<T: Resource + ReadResource> ReadResource for ListResponse<T> {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut response = ListResponse::default();
        for (name, value) in object {
            match name.as_str() {
                "page" => response.page = reader.read_integer(name, value),
                "size" => response.size = reader.read_integer(name, value),
                "total" => response.total = reader.read_integer(name, value),
                "items" => response.items = reader.read_array(name, value).map(List::from),
                _ => reader.skip(name),
            }
        }
        response
    }
}
