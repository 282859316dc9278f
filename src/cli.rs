//! Command Line Operations
//!
//! The operations behind the `clusters-model` binary: read a document,
//! unmarshal it as a given resource kind, and either report the outcome or
//! write the normalized document back out.

use crate::clusters::{CloudProvider, CloudRegion, Cluster, Label, Version};
use crate::codec::{self, ReadResource};
use crate::error::Result;
use crate::incidents::{Event, Incident, User};
use crate::model::Resource;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Resource kinds understood by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    CloudProvider,
    CloudRegion,
    Cluster,
    Event,
    Incident,
    Label,
    User,
    Version,
}

/// Output format of `fmt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Outcome of a successful `check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Wire kind of the value read, or of the list for array documents
    pub kind: &'static str,
    /// Number of values read
    pub count: usize,
}

/// Read the document at `path`, or standard input when there is none
pub fn read_input(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading document");
            fs::read_to_string(path)?
        }
        None => {
            debug!("Reading document from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Unmarshal `document` as `kind` and report what was read.
///
/// With `list` set the document must be an array of values.
pub fn check(kind: ResourceKind, list: bool, document: &Value) -> Result<CheckReport> {
    match kind {
        ResourceKind::CloudProvider => check_as::<CloudProvider>(list, document),
        ResourceKind::CloudRegion => check_as::<CloudRegion>(list, document),
        ResourceKind::Cluster => check_as::<Cluster>(list, document),
        ResourceKind::Event => check_as::<Event>(list, document),
        ResourceKind::Incident => check_as::<Incident>(list, document),
        ResourceKind::Label => check_as::<Label>(list, document),
        ResourceKind::User => check_as::<User>(list, document),
        ResourceKind::Version => check_as::<Version>(list, document),
    }
}

/// Unmarshal `document` as `kind` and marshal it again in `format`.
///
/// Unknown fields are dropped and the `kind` field comes first.
pub fn normalize(
    kind: ResourceKind,
    list: bool,
    document: &Value,
    format: OutputFormat,
) -> Result<String> {
    match kind {
        ResourceKind::CloudProvider => normalize_as::<CloudProvider>(list, document, format),
        ResourceKind::CloudRegion => normalize_as::<CloudRegion>(list, document, format),
        ResourceKind::Cluster => normalize_as::<Cluster>(list, document, format),
        ResourceKind::Event => normalize_as::<Event>(list, document, format),
        ResourceKind::Incident => normalize_as::<Incident>(list, document, format),
        ResourceKind::Label => normalize_as::<Label>(list, document, format),
        ResourceKind::User => normalize_as::<User>(list, document, format),
        ResourceKind::Version => normalize_as::<Version>(list, document, format),
    }
}

fn check_as<T: Resource + ReadResource>(list: bool, document: &Value) -> Result<CheckReport> {
    if list {
        let items: Vec<T> = codec::unmarshal_list_value(document)?;
        return Ok(CheckReport {
            kind: T::LIST_KIND,
            count: items.len(),
        });
    }
    let value: T = codec::unmarshal_value(document)?;
    Ok(CheckReport {
        kind: value.kind(),
        count: 1,
    })
}

fn normalize_as<T>(list: bool, document: &Value, format: OutputFormat) -> Result<String>
where
    T: ReadResource + Serialize,
{
    if list {
        let items: Vec<T> = codec::unmarshal_list_value(document)?;
        render(&items, format)
    } else {
        let value: T = codec::unmarshal_value(document)?;
        render(&value, format)
    }
}

fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_check_reports_kind() {
        let report = check(
            ResourceKind::Cluster,
            false,
            &json!({"kind": "ClusterLink", "id": "123"}),
        )
        .unwrap();
        assert_eq!(report, CheckReport { kind: "ClusterLink", count: 1 });

        let report = check(ResourceKind::Label, true, &json!([{"key": "a"}, {"key": "b"}])).unwrap();
        assert_eq!(report, CheckReport { kind: "LabelList", count: 2 });
    }

    #[test]
    fn test_check_surfaces_parse_error() {
        let err = check(ResourceKind::User, false, &json!({"email": 42})).unwrap_err();
        assert_matches!(err, Error::Parse { ref path, .. } if path == "email");

        let err = check(ResourceKind::User, true, &json!({"email": "x"})).unwrap_err();
        assert_matches!(err, Error::UnexpectedDocument { expected: "array", .. });
    }

    #[test]
    fn test_normalize_drops_unknown_fields() {
        let text = normalize(
            ResourceKind::CloudProvider,
            false,
            &json!({"name": "aws", "kind": "CloudProvider", "extra": [1, 2]}),
            OutputFormat::Json,
        )
        .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"kind": "CloudProvider", "name": "aws"}));
    }

    #[test]
    fn test_normalize_to_yaml() {
        let text = normalize(
            ResourceKind::Label,
            false,
            &json!({"key": "env", "value": "prod"}),
            OutputFormat::Yaml,
        )
        .unwrap();
        assert!(text.contains("kind: Label"));
        assert!(text.contains("key: env"));
    }
}
