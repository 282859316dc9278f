//! Kind Discriminator
//!
//! Every resource and every list is tagged on the wire with a `kind` string.
//! The tag is never stored: it is derived from whether the value is absent
//! and whether its link bit is set.

use crate::model::field_set::FieldSet;
use std::fmt;

/// Three-way kind tag of a resource or a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Absent value
    Nil,
    /// Stub reference carrying identity only
    Link,
    /// Full object
    Full,
}

impl Kind {
    /// Derive the tag from absence and the link flag
    pub fn from_parts(present: bool, link: bool) -> Self {
        match (present, link) {
            (false, _) => Kind::Nil,
            (true, true) => Kind::Link,
            (true, false) => Kind::Full,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Nil => write!(f, "nil"),
            Kind::Link => write!(f, "link"),
            Kind::Full => write!(f, "full"),
        }
    }
}

/// A resource type with presence tracking and kind names.
///
/// Implementors declare their wire names; everything else is derived from
/// the presence bits.
pub trait Resource: Sized {
    /// Kind of a full object, e.g. `Cluster`
    const KIND: &'static str;
    /// Kind of a link, e.g. `ClusterLink`
    const LINK_KIND: &'static str;
    /// Kind of an absent value, e.g. `ClusterNil`
    const NIL_KIND: &'static str;
    /// Kind of a list, e.g. `ClusterList`
    const LIST_KIND: &'static str;
    /// Kind of a link to a list, e.g. `ClusterListLink`
    const LIST_LINK_KIND: &'static str;
    /// Kind of an absent list, e.g. `ClusterListNil`
    const LIST_NIL_KIND: &'static str;
    /// Number of declared attributes, including the link bit, `id` and `href`
    const FIELD_COUNT: usize;

    /// Presence bits of this value
    fn field_set(&self) -> &FieldSet;

    /// True if this value is a link
    fn is_link(&self) -> bool {
        self.field_set().is_link()
    }

    /// Three-way tag of this value
    fn kind_tag(&self) -> Kind {
        Kind::from_parts(true, self.is_link())
    }

    /// Wire name of the kind of this value
    fn kind(&self) -> &'static str {
        if self.is_link() {
            Self::LINK_KIND
        } else {
            Self::KIND
        }
    }

    /// True if no attribute other than the link flag has a value
    fn is_empty(&self) -> bool {
        self.field_set().is_empty()
    }
}

/// Wire name of the kind of a possibly absent value
pub fn kind_of<T: Resource>(value: Option<&T>) -> &'static str {
    match value {
        Some(value) => value.kind(),
        None => T::NIL_KIND,
    }
}

/// Three-way tag of a possibly absent value
pub fn kind_tag_of<T: Resource>(value: Option<&T>) -> Kind {
    match value {
        Some(value) => value.kind_tag(),
        None => Kind::Nil,
    }
}

/// True if a possibly absent value is absent or carries no attribute
pub fn is_empty<T: Resource>(value: Option<&T>) -> bool {
    value.map(Resource::is_empty).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field_set::{ID, LINK};

    #[derive(Default)]
    struct Probe {
        fields: FieldSet,
    }

    impl Resource for Probe {
        const KIND: &'static str = "Probe";
        const LINK_KIND: &'static str = "ProbeLink";
        const NIL_KIND: &'static str = "ProbeNil";
        const LIST_KIND: &'static str = "ProbeList";
        const LIST_LINK_KIND: &'static str = "ProbeListLink";
        const LIST_NIL_KIND: &'static str = "ProbeListNil";
        const FIELD_COUNT: usize = 3;

        fn field_set(&self) -> &FieldSet {
            &self.fields
        }
    }

    #[test]
    fn test_kind_from_parts() {
        assert_eq!(Kind::from_parts(false, false), Kind::Nil);
        assert_eq!(Kind::from_parts(false, true), Kind::Nil);
        assert_eq!(Kind::from_parts(true, true), Kind::Link);
        assert_eq!(Kind::from_parts(true, false), Kind::Full);
    }

    #[test]
    fn test_kind_names() {
        let mut probe = Probe::default();
        assert_eq!(probe.kind(), "Probe");
        assert_eq!(probe.kind_tag(), Kind::Full);

        probe.fields.insert(Probe::FIELD_COUNT, LINK);
        assert_eq!(probe.kind(), "ProbeLink");
        assert_eq!(kind_tag_of(Some(&probe)), Kind::Link);

        assert_eq!(kind_of::<Probe>(None), "ProbeNil");
        assert_eq!(kind_tag_of::<Probe>(None), Kind::Nil);
    }

    #[test]
    fn test_is_empty() {
        let mut probe = Probe::default();
        probe.fields.insert(Probe::FIELD_COUNT, LINK);
        assert!(is_empty(Some(&probe)));
        assert!(is_empty::<Probe>(None));

        probe.fields.insert(Probe::FIELD_COUNT, ID);
        assert!(!is_empty(Some(&probe)));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Link.to_string(), "link");
    }
}
