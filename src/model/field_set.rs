//! Attribute Presence Set
//!
//! Ordered bit-vector with one bit per declared attribute of a resource type.
//! A set bit means the attribute was explicitly assigned, even when the
//! assigned value is the zero value of its type.

use std::fmt;

/// Bit reserved for the "this value is a link" flag.
pub const LINK: usize = 0;

/// Bit of the `id` attribute, shared by every resource type.
pub const ID: usize = 1;

/// Bit of the `href` attribute, shared by every resource type.
pub const HREF: usize = 2;

/// Presence bits of a resource value or builder.
///
/// The storage is allocated lazily: a default `FieldSet` holds no bits at all
/// and behaves as if every bit were clear. Equality compares the set bits
/// only, so an unallocated set equals an allocated set with every bit clear.
#[derive(Clone, Default)]
pub struct FieldSet {
    bits: Vec<bool>,
}

impl FieldSet {
    /// Create a set sized for `len` attributes, all clear
    pub fn with_len(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Number of allocated bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if storage has been allocated
    pub fn is_allocated(&self) -> bool {
        !self.bits.is_empty()
    }

    /// Allocate `len` clear bits if the set has not been allocated yet
    pub fn allocate(&mut self, len: usize) {
        if self.bits.is_empty() {
            self.bits = vec![false; len];
        }
    }

    /// Check whether bit `index` is set
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Set or clear bit `index`, allocating `len` bits first if needed.
    ///
    /// The set grows past `len` when `index` does not fit, so a set never
    /// silently drops an assignment.
    pub fn mark(&mut self, len: usize, index: usize, present: bool) {
        self.allocate(len);
        if index >= self.bits.len() {
            if !present {
                return;
            }
            self.bits.resize(index + 1, false);
        }
        self.bits[index] = present;
    }

    /// Shorthand for `mark(len, index, true)`
    pub fn insert(&mut self, len: usize, index: usize) {
        self.mark(len, index, true);
    }

    /// Store `value` in `slot` and set bit `index`, if there is a value
    pub fn fill<T>(&mut self, index: usize, slot: &mut T, value: Option<T>) {
        if let Some(value) = value {
            *slot = value;
            self.mark(self.len(), index, true);
        }
    }

    /// Clear bit `index`
    pub fn remove(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = false;
        }
    }

    /// True if the link bit is set
    pub fn is_link(&self) -> bool {
        self.contains(LINK)
    }

    /// True if no bit other than the link bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.iter().skip(LINK + 1).all(|bit| !bit)
    }

    /// Indexes of the set bits, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, bit)| bit.then_some(index))
    }
}

impl PartialEq for FieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for FieldSet {}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unallocated_and_empty() {
        let set = FieldSet::default();
        assert!(!set.is_allocated());
        assert!(set.is_empty());
        assert!(!set.is_link());
        assert!(!set.contains(ID));
    }

    #[test]
    fn test_mark_allocates_lazily() {
        let mut set = FieldSet::default();
        set.insert(4, ID);
        assert_eq!(set.len(), 4);
        assert!(set.contains(ID));
        assert!(!set.is_empty());
    }

    #[test]
    fn test_link_bit_does_not_count_as_content() {
        let mut set = FieldSet::default();
        set.insert(3, LINK);
        assert!(set.is_link());
        assert!(set.is_empty());
    }

    #[test]
    fn test_mark_grows_past_declared_len() {
        let mut set = FieldSet::with_len(2);
        set.insert(2, 5);
        assert!(set.contains(5));
        assert_eq!(set.len(), 6);

        // Clearing an unallocated position is a no-op
        set.mark(2, 9, false);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_fill_sets_slot_and_bit() {
        let mut set = FieldSet::with_len(4);
        let mut slot = String::new();
        set.fill(3, &mut slot, None);
        assert!(!set.contains(3));

        set.fill(3, &mut slot, Some(String::new()));
        assert!(set.contains(3));
        assert_eq!(slot, "");
    }

    #[test]
    fn test_remove_clears_bit() {
        let mut set = FieldSet::with_len(4);
        set.insert(4, HREF);
        set.remove(HREF);
        assert!(!set.contains(HREF));
        set.remove(42);
    }

    #[test]
    fn test_equality_ignores_allocation() {
        let unallocated = FieldSet::default();
        let allocated = FieldSet::with_len(8);
        assert_eq!(unallocated, allocated);

        let mut a = FieldSet::with_len(3);
        a.insert(3, ID);
        let mut b = FieldSet::with_len(10);
        b.insert(10, ID);
        assert_eq!(a, b);

        b.insert(10, 7);
        assert_ne!(a, b);
    }

    #[test]
    fn test_iter_and_debug() {
        let mut set = FieldSet::with_len(5);
        set.insert(5, LINK);
        set.insert(5, 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(format!("{:?}", set), "{0, 3}");
    }
}
