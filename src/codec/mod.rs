//! JSON Codec
//!
//! Writers are the `Serialize` impls of the model types; readers are their
//! [`ReadResource`] impls. The functions here are the entry points used by
//! the transport layer.

pub mod reader;
pub mod timestamp;
pub mod writer;

pub use reader::{ReadResource, Reader};
pub use writer::ObjectWriter;

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::io;

/// Write `value` as JSON
pub fn marshal<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: io::Write,
{
    serde_json::to_writer(writer, value)?;
    Ok(())
}

/// Write `value` as a JSON string
pub fn marshal_to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Write `items` as a JSON array
pub fn marshal_list<T, W>(items: &[T], writer: W) -> Result<()>
where
    T: Serialize,
    W: io::Write,
{
    marshal(items, writer)
}

/// Read a value from a JSON object document
pub fn unmarshal<T: ReadResource, R: io::Read>(source: R) -> Result<T> {
    let document: Value = serde_json::from_reader(source)?;
    unmarshal_value(&document)
}

/// Read a value from JSON text
pub fn unmarshal_str<T: ReadResource>(source: &str) -> Result<T> {
    let document: Value = serde_json::from_str(source)?;
    unmarshal_value(&document)
}

/// Read a value from an already parsed document.
///
/// The whole object is consumed before the first recorded field error, if
/// any, is returned.
pub fn unmarshal_value<T: ReadResource>(document: &Value) -> Result<T> {
    let object = document.as_object().ok_or(Error::UnexpectedDocument {
        expected: "object",
        found: reader::type_name(document),
    })?;
    let mut reader = Reader::new();
    let value = T::read_fields(&mut reader, object);
    reader.finish(value)
}

/// Read values from a JSON array document
pub fn unmarshal_list<T: ReadResource, R: io::Read>(source: R) -> Result<Vec<T>> {
    let document: Value = serde_json::from_reader(source)?;
    unmarshal_list_value(&document)
}

/// Read values from JSON array text
pub fn unmarshal_list_str<T: ReadResource>(source: &str) -> Result<Vec<T>> {
    let document: Value = serde_json::from_str(source)?;
    unmarshal_list_value(&document)
}

/// Read values from an already parsed array document
pub fn unmarshal_list_value<T: ReadResource>(document: &Value) -> Result<Vec<T>> {
    if !document.is_array() {
        return Err(Error::UnexpectedDocument {
            expected: "array",
            found: reader::type_name(document),
        });
    }
    let mut reader = Reader::new();
    let items = reader.read_array("", document).unwrap_or_default();
    reader.finish(items)
}
