//! Cache tag type.
//!
//! This module defines the strong type for cache-line tags to prevent
//! accidental mixing of tags with raw addresses or set indices. A tag is the
//! portion of an address above the set-index and block-offset bits; two tags
//! compare only by value equality, and no ordering is defined.
//!
//! There is no reserved "invalid" tag value. Operations that may or may not
//! produce a tag (eviction reporting) use `Option<Tag>` instead, so every
//! `u64` is a legal tag.

use std::fmt;

/// An address tag stored in a cache set.
///
/// Tags are produced by [`Geometry::split`](crate::cache::geometry::Geometry::split)
/// and identify a cache line within one set of one cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag(pub u64);

impl Tag {
    /// Creates a new tag from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `tag` - The raw tag bits.
    #[inline(always)]
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }

    /// Returns the raw tag bits.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
