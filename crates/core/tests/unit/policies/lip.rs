//! LRU Insertion Policy Tests.
//!
//! LIP orders and evicts exactly like LRU but inserts new tags at the LRU
//! end: a freshly inserted line that is never hit is the next victim, even
//! ahead of much older lines that were hit once.

use cachesim_core::cache::policies::{LipSet, PolicySet};
use cachesim_core::common::Tag;

// ══════════════════════════════════════════════════════════
// 1. LRU-End Insertion
// ══════════════════════════════════════════════════════════

/// A freshly-inserted-but-never-hit tag is evicted before an older tag that
/// was hit.
#[test]
fn fresh_unhit_tag_evicted_before_older_hit_tag() {
    let mut set = LipSet::new(2);

    assert_eq!(set.replace(Tag::new(1)), None);
    // Protect 1 by hitting it; it moves to the MRU end.
    assert!(set.find(Tag::new(1)));

    // 2 arrives at the LRU end and is never hit.
    assert_eq!(set.replace(Tag::new(2)), None);

    // 2 goes first, despite being the younger line.
    assert_eq!(set.replace(Tag::new(3)), Some(Tag::new(2)));
    assert!(set.find(Tag::new(1)));
}

/// With no hits at all, each insertion into a full set evicts the previous
/// insertion: the LRU slot churns while old residents survive.
#[test]
fn unhit_insertions_churn_lru_slot() {
    let mut set = LipSet::new(2);

    assert_eq!(set.replace(Tag::new(1)), None);
    assert_eq!(set.replace(Tag::new(2)), None);

    // [2 (LRU), 1 (MRU)]: 2 is the next victim.
    assert_eq!(set.replace(Tag::new(3)), Some(Tag::new(2)));
    // 3 took the LRU slot; 1 still survives.
    assert_eq!(set.replace(Tag::new(4)), Some(Tag::new(3)));
    assert!(set.find(Tag::new(1)));
}

// ══════════════════════════════════════════════════════════
// 2. Hit Behavior Matches LRU
// ══════════════════════════════════════════════════════════

/// A hit on an LRU-end entry promotes it to the MRU end, exactly as in LRU.
#[test]
fn hit_promotes_like_lru() {
    let mut set = LipSet::new(2);

    assert_eq!(set.replace(Tag::new(1)), None);
    assert_eq!(set.replace(Tag::new(2)), None);

    // Promote the fresh line; the once-MRU line 1 becomes the victim.
    assert!(set.find(Tag::new(2)));
    assert_eq!(set.replace(Tag::new(3)), Some(Tag::new(1)));
}
