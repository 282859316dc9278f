//! Resource Model
//!
//! Building blocks shared by every resource type:
//! - [`FieldSet`]: per-attribute presence bits
//! - [`Resource`] and [`Kind`]: kind names derived from the link bit
//! - [`ResourceBuilder`]: two-phase construction of immutable values
//! - [`List`], [`ListBuilder`], [`ListResponse`]: collections of values

pub mod builder;
pub mod field_set;
pub mod kind;
pub mod list;

pub use builder::{OpaqueInput, ResourceBuilder};
pub use field_set::FieldSet;
pub use kind::{kind_of, kind_tag_of, Kind, Resource};
pub use list::{List, ListBuilder, ListResponse, OptionalList};
