//! Cluster Management Resources
//!
//! Resource types of the cluster management service: clusters and the
//! providers, regions, versions and labels they refer to.

pub mod cloud_provider;
pub mod cloud_region;
pub mod cluster;
pub mod cluster_state;
pub mod label;
pub mod version;

pub use cloud_provider::{CloudProvider, CloudProviderBuilder};
pub use cloud_region::{CloudRegion, CloudRegionBuilder};
pub use cluster::{Cluster, ClusterBuilder};
pub use cluster_state::ClusterState;
pub use label::{Label, LabelBuilder};
pub use version::{Version, VersionBuilder};
