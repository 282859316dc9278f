//! Collections of resource values
//!
//! A [`List`] is an ordered sequence of built values plus the href and link
//! flag of the list itself. Accessors never panic: out-of-range lookups give
//! `None`, and [`OptionalList`] extends the same guarantees to absent lists.

use crate::error::Result;
use crate::model::builder::ResourceBuilder;
use crate::model::kind::{Kind, Resource};
use std::slice;

// =============================================================================
// List
// =============================================================================

/// Ordered sequence of resource values
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    pub(crate) href: String,
    pub(crate) link: bool,
    pub(crate) items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            href: String::new(),
            link: false,
            items: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

impl<T: Resource> List<T> {
    /// Wire name of the kind of this list
    pub fn kind(&self) -> &'static str {
        if self.link {
            T::LIST_LINK_KIND
        } else {
            T::LIST_KIND
        }
    }

    /// Three-way tag of this list
    pub fn kind_tag(&self) -> Kind {
        Kind::from_parts(true, self.link)
    }
}

impl<T> List<T> {
    /// True if this is a link to a list
    pub fn is_link(&self) -> bool {
        self.link
    }

    /// Link to the list, empty if unknown
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Link to the list, `None` if unknown
    pub fn get_href(&self) -> Option<&str> {
        (!self.href.is_empty()).then_some(self.href.as_str())
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, `None` if out of range
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate over the items in order
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Run `f` for each item in order, stopping as soon as it returns false
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        for item in &self.items {
            if !f(item) {
                break;
            }
        }
    }

    /// Run `f` for each index and item in order, stopping as soon as it
    /// returns false
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        for (index, item) in self.items.iter().enumerate() {
            if !f(index, item) {
                break;
            }
        }
    }
}

impl<T: Clone> List<T> {
    /// Copy of the items; changes to it do not affect the list.
    ///
    /// Prefer [`List::each`] or [`List::iter`] when no copy is needed.
    pub fn slice(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// =============================================================================
// Absent lists
// =============================================================================

/// List accessors that are safe on an absent list.
///
/// An absent list has length zero, no items, an empty slice, and the `Nil`
/// kind.
pub trait OptionalList<T> {
    /// Wire name of the kind, `<Type>ListNil` when absent
    fn kind(&self) -> &'static str;
    /// Three-way tag, `Nil` when absent
    fn kind_tag(&self) -> Kind;
    /// True if present and a link
    fn is_link(&self) -> bool;
    /// Link to the list, empty when absent
    fn href(&self) -> &str;
    /// Number of items, zero when absent
    fn len(&self) -> usize;
    /// True if absent or without items
    fn is_empty(&self) -> bool;
    /// Item at `index`, `None` when absent or out of range
    fn get(&self, index: usize) -> Option<&T>;
    /// Copy of the items, empty when absent
    fn slice(&self) -> Vec<T>;
    /// Ordered traversal stopping when `f` returns false; no-op when absent
    fn each<F: FnMut(&T) -> bool>(&self, f: F);
    /// Ordered traversal with index stopping when `f` returns false; no-op
    /// when absent
    fn range<F: FnMut(usize, &T) -> bool>(&self, f: F);
}

impl<'a, T: Resource + Clone> OptionalList<T> for Option<&'a List<T>> {
    fn kind(&self) -> &'static str {
        match self {
            Some(list) => list.kind(),
            None => T::LIST_NIL_KIND,
        }
    }

    fn kind_tag(&self) -> Kind {
        match self {
            Some(list) => list.kind_tag(),
            None => Kind::Nil,
        }
    }

    fn is_link(&self) -> bool {
        self.map(List::is_link).unwrap_or(false)
    }

    fn href(&self) -> &str {
        match self {
            Some(list) => list.href(),
            None => "",
        }
    }

    fn len(&self) -> usize {
        self.map(List::len).unwrap_or(0)
    }

    fn is_empty(&self) -> bool {
        self.map(List::is_empty).unwrap_or(true)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.and_then(|list| list.get(index))
    }

    fn slice(&self) -> Vec<T> {
        self.map(List::slice).unwrap_or_default()
    }

    fn each<F: FnMut(&T) -> bool>(&self, f: F) {
        if let Some(list) = self {
            list.each(f);
        }
    }

    fn range<F: FnMut(usize, &T) -> bool>(&self, f: F) {
        if let Some(list) = self {
            list.range(f);
        }
    }
}

// =============================================================================
// List Builder
// =============================================================================

/// Builder of a [`List`] from item builders
#[derive(Debug, Clone)]
pub struct ListBuilder<B> {
    href: String,
    link: bool,
    items: Vec<B>,
}

impl<B> Default for ListBuilder<B> {
    fn default() -> Self {
        Self {
            href: String::new(),
            link: false,
            items: Vec::new(),
        }
    }
}

impl<B: ResourceBuilder> ListBuilder<B> {
    /// Create an empty list builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the item builders
    pub fn items(mut self, items: impl IntoIterator<Item = B>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Append an item builder
    pub fn push(mut self, item: B) -> Self {
        self.items.push(item);
        self
    }

    /// Set the link flag
    pub fn link(mut self, value: bool) -> Self {
        self.link = value;
        self
    }

    /// Set the link to the list
    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self
    }

    /// True if the builder has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reset this builder to the contents of `list`; `None` is a no-op
    pub fn copy_from(mut self, list: Option<&List<B::Output>>) -> Self {
        let Some(list) = list else {
            return self;
        };
        self.href = list.href.clone();
        self.link = list.link;
        self.items = list
            .items
            .iter()
            .map(|item| B::default().copy_from(Some(item)))
            .collect();
        self
    }

    /// Build every item in order, stopping at the first failure
    pub fn build(&self) -> Result<List<B::Output>> {
        let items = self
            .items
            .iter()
            .map(ResourceBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(List {
            href: self.href.clone(),
            link: self.link,
            items,
        })
    }
}

// =============================================================================
// List Response
// =============================================================================

/// A page of items as returned by a list request.
///
/// `page`, `size` and `total` are present only when the server sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub(crate) page: Option<i64>,
    pub(crate) size: Option<i64>,
    pub(crate) total: Option<i64>,
    pub(crate) items: Option<List<T>>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            page: None,
            size: None,
            total: None,
            items: None,
        }
    }
}

impl<T> ListResponse<T> {
    /// Create a response holding `items`
    pub fn new(items: List<T>) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// Set the page number
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the total number of items across all pages
    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Page number
    pub fn page(&self) -> Option<i64> {
        self.page
    }

    /// Number of items in this page
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// Total number of items across all pages
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    /// Items of this page, `None` if the server sent none
    pub fn items(&self) -> Option<&List<T>> {
        self.items.as_ref()
    }

    /// Take the items out of the response
    pub fn into_items(self) -> Option<List<T>> {
        self.items
    }
}
