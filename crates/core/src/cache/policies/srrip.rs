//! Static Re-reference Interval Prediction (SRRIP) replacement set.
//!
//! Each resident entry carries a re-reference prediction value (RRPV):
//! 0 means "likely re-referenced soon", `rmax` means "likely never". New
//! entries start at `rmax - 1`; a hit resets the entry to 0. Eviction scans
//! for an entry at `rmax`; if none exists, every entry ages by one and the
//! scan repeats until a victim qualifies. The first entry found at `rmax`
//! wins, and the aging loop is part of the observable behavior.
//!
//! `rmax` is `2^associativity - 1`, saturating at `u64::MAX` for
//! associativities of 64 and above.

use super::{DEFAULT_WAYS, PolicySet};
use crate::common::Tag;

/// One resident line: tag plus its re-reference prediction value.
#[derive(Clone, Copy, Debug)]
struct Entry {
    tag: Tag,
    rrpv: u64,
}

/// SRRIP set state.
#[derive(Clone, Debug)]
pub struct SrripSet {
    /// Resident entries in insertion order; replacement happens in place.
    entries: Vec<Entry>,
    /// Configured capacity of the set.
    ways: usize,
    /// Maximum RRPV: `2^ways - 1`.
    rmax: u64,
}

impl SrripSet {
    /// Creates an empty SRRIP set with the given associativity.
    pub fn new(ways: usize) -> Self {
        Self {
            entries: Vec::with_capacity(ways),
            ways,
            rmax: Self::rmax_for(ways),
        }
    }

    /// Computes `2^ways - 1`, saturating for shifts that would overflow.
    fn rmax_for(ways: usize) -> u64 {
        if ways == 0 {
            0
        } else if ways >= 64 {
            u64::MAX
        } else {
            (1u64 << ways) - 1
        }
    }

    /// RRPV assigned to freshly inserted entries.
    fn initial_rrpv(&self) -> u64 {
        self.rmax.saturating_sub(1)
    }
}

impl Default for SrripSet {
    fn default() -> Self {
        Self::new(DEFAULT_WAYS)
    }
}

impl PolicySet for SrripSet {
    /// Probes for the tag; on a hit the entry's RRPV resets to 0.
    fn find(&mut self, tag: Tag) -> bool {
        for entry in &mut self.entries {
            if entry.tag == tag {
                entry.rrpv = 0;
                return true;
            }
        }
        false
    }

    /// Inserts with RRPV `rmax - 1`; when full, ages entries until one
    /// reaches `rmax` and replaces the first such entry.
    fn replace(&mut self, tag: Tag) -> Option<Tag> {
        if self.ways == 0 {
            return None;
        }

        if self.entries.len() < self.ways {
            self.entries.push(Entry {
                tag,
                rrpv: self.initial_rrpv(),
            });
            return None;
        }

        let victim_index = loop {
            if let Some(i) = self.entries.iter().position(|e| e.rrpv == self.rmax) {
                break i;
            }
            // No candidate yet: age everything forward and rescan. Entries
            // start at rmax - 1, so the loop terminates.
            for entry in &mut self.entries {
                entry.rrpv += 1;
            }
        };

        let evicted = self.entries[victim_index].tag;
        self.entries[victim_index] = Entry {
            tag,
            rrpv: self.initial_rrpv(),
        };
        Some(evicted)
    }

    fn delete_if_present(&mut self, tag: Tag) {
        if let Some(pos) = self.entries.iter().position(|e| e.tag == tag) {
            self.entries.remove(pos);
        }
    }

    fn set_associativity(&mut self, ways: usize) {
        self.ways = ways;
        self.rmax = Self::rmax_for(ways);
        self.entries.clear();
    }

    fn associativity(&self) -> usize {
        self.ways
    }

    fn occupancy(&self) -> usize {
        self.entries.len()
    }

    fn name(&self) -> &'static str {
        "SRRIP"
    }
}
