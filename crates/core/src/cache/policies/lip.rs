//! LRU Insertion Policy (LIP) replacement set.
//!
//! LIP keeps the same recency order as LRU and evicts the same victim, but
//! inserts new lines at the least-recently-used end instead of the
//! most-recently-used end. A freshly inserted line is therefore the next
//! eviction candidate unless it is hit at least once, which protects the set
//! against thrashing by large scans.

use super::{DEFAULT_WAYS, PolicySet};
use crate::common::Tag;

/// LIP set state.
#[derive(Clone, Debug)]
pub struct LipSet {
    /// Resident tags ordered front-to-back from LRU to MRU.
    tags: Vec<Tag>,
    /// Configured capacity of the set.
    ways: usize,
}

impl LipSet {
    /// Creates an empty LIP set with the given associativity.
    pub fn new(ways: usize) -> Self {
        Self {
            tags: Vec::with_capacity(ways),
            ways,
        }
    }
}

impl Default for LipSet {
    fn default() -> Self {
        Self::new(DEFAULT_WAYS)
    }
}

impl PolicySet for LipSet {
    /// Probes for the tag; on a hit the tag moves to the MRU end, exactly as
    /// under LRU.
    fn find(&mut self, tag: Tag) -> bool {
        if let Some(pos) = self.tags.iter().position(|&t| t == tag) {
            self.tags.remove(pos);
            self.tags.push(tag);
            return true;
        }
        false
    }

    /// Evicts the LRU entry when full, then inserts the new tag at the LRU
    /// end rather than the MRU end.
    fn replace(&mut self, tag: Tag) -> Option<Tag> {
        if self.ways == 0 {
            return None;
        }

        let mut evicted = None;
        if self.tags.len() >= self.ways {
            evicted = Some(self.tags.remove(0));
        }
        self.tags.insert(0, tag);
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
        "LIP"
    }
}
