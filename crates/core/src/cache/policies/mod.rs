//! Replacement-policy cache sets.
//!
//! Each type in this module models one associative set of a single cache
//! level: a fixed-capacity collection of tags plus whatever metadata its
//! eviction rule needs.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Random`: Uniform random victim.
//! - `Lfu`: Least Frequently Used.
//! - `Lip`: LRU Insertion Policy.
//! - `Srrip`: Static Re-reference Interval Prediction.

/// Least Recently Used replacement set.
pub mod lru;

/// Random replacement set.
pub mod random;

/// Least Frequently Used replacement set.
pub mod lfu;

/// LRU Insertion Policy replacement set.
pub mod lip;

/// Static RRIP replacement set.
pub mod srrip;

pub use lfu::LfuSet;
pub use lip::LipSet;
pub use lru::LruSet;
pub use random::RandomSet;
pub use srrip::SrripSet;

use crate::common::Tag;

/// Associativity a set starts with before the enclosing hierarchy
/// reconfigures it.
pub const DEFAULT_WAYS: usize = 8;

/// Contract shared by every replacement-policy set.
///
/// All variants hold at most `associativity` resident entries with unique
/// tags. A zero-way set stores nothing: `replace` is a no-op that reports no
/// eviction.
pub trait PolicySet: Default {
    /// Probes the set for a tag.
    ///
    /// Returns `true` iff the tag is resident. This is the only point where
    /// a hit is registered, and the only point where hit side effects run:
    /// LRU and LIP promote the entry to most-recently-used, LFU increments
    /// its frequency, SRRIP resets its re-reference value, Random does
    /// nothing.
    fn find(&mut self, tag: Tag) -> bool;

    /// Inserts a tag that is known not to be resident.
    ///
    /// With spare capacity the entry is added with the policy's new-entry
    /// metadata and `None` is returned. On a full set the policy selects
    /// exactly one victim, the new entry takes its place, and the victim's
    /// tag is returned. Callers only invoke this after `find` reported a
    /// miss.
    fn replace(&mut self, tag: Tag) -> Option<Tag>;

    /// Removes the entry matching `tag` if present; no-op otherwise.
    ///
    /// Used to enforce inclusion between levels. Never reports an eviction.
    fn delete_if_present(&mut self, tag: Tag);

    /// Reconfigures the capacity and clears every resident entry.
    ///
    /// This is a destructive reset, not a content-preserving resize.
    fn set_associativity(&mut self, ways: usize);

    /// Returns the configured capacity.
    fn associativity(&self) -> usize;

    /// Returns the number of currently resident entries.
    fn occupancy(&self) -> usize;

    /// Returns the policy name for configuration dumps.
    fn name(&self) -> &'static str;
}
