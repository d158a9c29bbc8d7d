//! Least Recently Used (LRU) replacement set.
//!
//! The set keeps its tags ordered by recency: index 0 is the least recently
//! used entry, the last index the most recently used. A hit moves the tag to
//! the MRU end; an insertion into a full set evicts the LRU end and appends
//! the new tag at the MRU end.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `find()`: O(W) where W is the associativity
//!   - `replace()`: O(W)
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than set capacity (thrashing)

use super::{DEFAULT_WAYS, PolicySet};
use crate::common::Tag;

/// LRU set state.
#[derive(Clone, Debug)]
pub struct LruSet {
    /// Resident tags ordered front-to-back from LRU to MRU.
    tags: Vec<Tag>,
    /// Configured capacity of the set.
    ways: usize,
}

impl LruSet {
    /// Creates an empty LRU set with the given associativity.
    pub fn new(ways: usize) -> Self {
        Self {
            tags: Vec::with_capacity(ways),
            ways,
        }
    }
}

impl Default for LruSet {
    fn default() -> Self {
        Self::new(DEFAULT_WAYS)
    }
}

impl PolicySet for LruSet {
    /// Probes for the tag; on a hit the tag moves to the MRU end.
    fn find(&mut self, tag: Tag) -> bool {
        if let Some(pos) = self.tags.iter().position(|&t| t == tag) {
            self.tags.remove(pos);
            self.tags.push(tag);
            return true;
        }
        false
    }

    /// Inserts at the MRU end, evicting the LRU entry when full.
    fn replace(&mut self, tag: Tag) -> Option<Tag> {
        if self.ways == 0 {
            return None;
        }

        let mut evicted = None;
        if self.tags.len() >= self.ways {
            evicted = Some(self.tags.remove(0));
        }
        self.tags.push(tag);
        evicted
    }

    fn delete_if_present(&mut self, tag: Tag) {
        if let Some(pos) = self.tags.iter().position(|&t| t == tag) {
            self.tags.remove(pos);
        }
    }

    fn set_associativity(&mut self, ways: usize) {
        self.ways = ways;
        self.tags.clear();
    }

    fn associativity(&self) -> usize {
        self.ways
    }

    fn occupancy(&self) -> usize {
        self.tags.len()
    }

    fn name(&self) -> &'static str {
        "LRU"
    }
}
