//! Clusters Model - Partial Resource Values and JSON Codecs
//!
//! Typed values for the resources of a cluster management API. Every
//! attribute of a value may be absent, and absence is tracked separately
//! from the zero value, so a value can carry exactly the fields a client or
//! server chose to send. A value may also be a link: a reference that
//! carries little more than `id` and `href`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Resource Families                            │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐  │
//! │  │          clusters            │  │          incidents           │  │
//! │  │ Cluster, CloudRegion, ...    │  │ Incident, Event, User        │  │
//! │  └──────────────┬───────────────┘  └──────────────┬───────────────┘  │
//! │                 └────────────────┬────────────────┘                  │
//! ├──────────────────────────────────┼───────────────────────────────────┤
//! │  ┌─────────────────┐  ┌──────────┴──────────┐  ┌──────────────────┐  │
//! │  │   FieldSet      │  │  Builders & Lists   │  │   JSON Codec     │  │
//! │  │ (presence bits) │  │ (ResourceBuilder)   │  │ (reader/writer)  │  │
//! │  └─────────────────┘  └─────────────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`model`]: Presence bits, kinds, builders and lists
//! - [`codec`]: JSON writer and reader
//! - [`clusters`]: Cluster management resources
//! - [`incidents`]: Incident resources with opaque payloads
//! - [`cli`]: Operations behind the command line tool
//! - [`error`]: Error types and handling
//!
//! # Example
//!
//! ```
//! use clusters_model::prelude::*;
//! use clusters_model::clusters::{ClusterBuilder, CloudRegionBuilder};
//!
//! let cluster = ClusterBuilder::new()
//!     .name("mycluster")
//!     .region(CloudRegionBuilder::new().id("us-east-1").link(true))
//!     .build()
//!     .unwrap();
//! assert_eq!(cluster.get_display_name(), None);
//!
//! let text = clusters_model::codec::marshal_to_string(&cluster).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"kind":"Cluster","name":"mycluster","region":{"kind":"CloudRegionLink","id":"us-east-1"}}"#
//! );
//! ```

pub mod cli;
pub mod clusters;
pub mod codec;
pub mod error;
pub mod incidents;
pub mod model;

/// Traits needed to work with resource values and builders
pub mod prelude {
    pub use crate::model::{OptionalList, Resource, ResourceBuilder};
}

// Re-export commonly used types
pub use clusters::{
    CloudProvider, CloudProviderBuilder, CloudRegion, CloudRegionBuilder, Cluster,
    ClusterBuilder, ClusterState, Label, LabelBuilder, Version, VersionBuilder,
};

pub use codec::{marshal, marshal_list, marshal_to_string, unmarshal, unmarshal_list, unmarshal_str};

pub use error::{Error, Result};

pub use incidents::{Event, EventBuilder, Incident, IncidentBuilder, User, UserBuilder};

pub use model::{
    kind_of, kind_tag_of, FieldSet, Kind, List, ListBuilder, ListResponse, OpaqueInput,
    OptionalList, Resource, ResourceBuilder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
