//! Resource Builders
//!
//! Builders accumulate attribute values before a resource value is built.
//! Setters consume and return the builder so calls can be chained.

use crate::error::{Error, Result};
use crate::model::kind::Resource;
use serde_json::Value;

/// Mutable accumulator for a resource value
pub trait ResourceBuilder: Default + Clone {
    /// The value produced by [`ResourceBuilder::build`]
    type Output: Resource;

    /// Set the link flag
    fn link(self, value: bool) -> Self;

    /// True if no attribute other than the link flag has been set
    fn is_empty(&self) -> bool;

    /// Reset this builder to the contents of `object`.
    ///
    /// Copying from `None` leaves the builder unchanged.
    fn copy_from(self, object: Option<&Self::Output>) -> Self;

    /// Build the value, building nested builders first.
    ///
    /// The first nested failure is returned as is.
    fn build(&self) -> Result<Self::Output>;
}

/// True if a possibly absent builder is absent or has nothing set
pub fn is_empty<B: ResourceBuilder>(builder: Option<&B>) -> bool {
    builder.map(ResourceBuilder::is_empty).unwrap_or(true)
}

/// Input of an opaque attribute held by a builder.
///
/// Raw text is kept verbatim and only parsed at build time, so a malformed
/// document surfaces as a build error.
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueInput {
    /// Already parsed value
    Parsed(Value),
    /// JSON text to be parsed by `build`
    Raw(String),
}

impl OpaqueInput {
    /// Resolve into a JSON value, naming `attribute` on failure
    pub fn resolve(&self, attribute: &str) -> Result<Value> {
        match self {
            OpaqueInput::Parsed(value) => Ok(value.clone()),
            OpaqueInput::Raw(text) => {
                serde_json::from_str(text).map_err(|source| Error::InvalidAttributeJson {
                    attribute: attribute.to_string(),
                    source,
                })
            }
        }
    }
}

impl Default for OpaqueInput {
    fn default() -> Self {
        OpaqueInput::Parsed(Value::Null)
    }
}

impl From<Value> for OpaqueInput {
    fn from(value: Value) -> Self {
        OpaqueInput::Parsed(value)
    }
}
