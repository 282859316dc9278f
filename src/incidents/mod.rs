//! Incident Resources
//!
//! Incidents, their timeline events and the users that create them. Event
//! payloads are opaque JSON documents.

pub mod event;
pub mod incident;
pub mod user;

pub use event::{Event, EventBuilder};
pub use incident::{Incident, IncidentBuilder};
pub use user::{User, UserBuilder};
