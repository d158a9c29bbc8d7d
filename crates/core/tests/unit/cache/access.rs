//! Access Path Tests.
//!
//! Verifies the two-level lookup order, latency accounting, per-kind
//! counters, and the store-allocation policy. The reference geometry is the
//! default hierarchy: L1 32 KiB / 64 B / 8-way (64 sets), L2 256 KiB / 64 B /
//! 8-way (512 sets), latencies 1/15/250.

use pretty_assertions::assert_eq;

use cachesim_core::TwoLevelCache;
use cachesim_core::cache::policies::LruSet;
use cachesim_core::common::AccessKind;
use cachesim_core::config::{HierarchyConfig, StoreAllocation};

/// Builds the default reference hierarchy.
fn reference_cache() -> TwoLevelCache<LruSet> {
    TwoLevelCache::new(&HierarchyConfig::default()).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Reference Scenario
// ══════════════════════════════════════════════════════════

/// The default geometry derives 64 L1 sets and 512 L2 sets.
#[test]
fn reference_geometry() {
    let cache = reference_cache();
    assert_eq!(cache.l1_num_sets(), 64);
    assert_eq!(cache.l2_num_sets(), 512);
    assert_eq!(cache.l1_associativity(), 8);
    assert_eq!(cache.l2_associativity(), 8);
    assert_eq!(cache.l1_line_shift(), 6);
}

/// First access to an address misses both levels (1 + 15 + 250 = 266
/// cycles); the second access hits L1 (1 cycle).
#[test]
fn cold_miss_then_l1_hit() {
    let mut cache = reference_cache();

    assert_eq!(cache.access(0xdead_b000, AccessKind::Load), 266);
    assert_eq!(cache.access(0xdead_b000, AccessKind::Load), 1);

    let stats = cache.stats();
    assert_eq!(stats.l1_load_misses, 1);
    assert_eq!(stats.l1_load_hits, 1);
    assert_eq!(stats.l2_load_misses, 1);
    assert_eq!(stats.l2_load_hits, 0);
}

/// A different offset within the same block hits L1.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = reference_cache();

    cache.access(0x1000, AccessKind::Load);
    assert_eq!(cache.access(0x1000 + 32, AccessKind::Load), 1);
}

/// An address resident only in L2 costs the L1 probe plus the L2 hit
/// latency (1 + 15 = 16 cycles).
#[test]
fn l2_hit_costs_both_probes() {
    // L1 64 B blocks, L2 128 B blocks: two L1 lines share one L2 block, so
    // the second line misses L1 but hits L2.
    let mut config = HierarchyConfig::default();
    config.l2.line_bytes = 128;
    let mut cache = TwoLevelCache::<LruSet>::new(&config).unwrap();

    assert_eq!(cache.access(0x2000, AccessKind::Load), 266);
    assert_eq!(cache.access(0x2040, AccessKind::Load), 16);

    let stats = cache.stats();
    assert_eq!(stats.l1_load_misses, 2);
    assert_eq!(stats.l2_load_hits, 1);
    assert_eq!(stats.l2_load_misses, 1);
}

/// Custom latencies flow through unchanged.
#[test]
fn custom_latencies() {
    let mut config = HierarchyConfig::default();
    config.latencies.l1_hit = 2;
    config.latencies.l2_hit = 20;
    config.latencies.l2_miss = 100;
    let mut cache = TwoLevelCache::<LruSet>::new(&config).unwrap();

    assert_eq!(cache.access(0x40, AccessKind::Store), 122);
    assert_eq!(cache.access(0x40, AccessKind::Store), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Store Allocation
// ══════════════════════════════════════════════════════════

/// Under write-allocate (the default), a store miss installs the line in L1.
#[test]
fn store_allocate_installs_in_l1() {
    let mut cache = reference_cache();

    cache.access(0x3000, AccessKind::Store);
    assert_eq!(cache.access(0x3000, AccessKind::Store), 1);

    let stats = cache.stats();
    assert_eq!(stats.l1_store_hits, 1);
    assert_eq!(stats.l1_store_misses, 1);
}

/// Under no-write-allocate, a store miss leaves L1 untouched but still
/// registers an L2 access; a later load of the line hits L2, not L1.
#[test]
fn store_no_allocate_skips_l1_but_reaches_l2() {
    let mut config = HierarchyConfig::default();
    config.store_allocation = StoreAllocation::NoAllocate;
    let mut cache = TwoLevelCache::<LruSet>::new(&config).unwrap();

    assert_eq!(cache.access(0x5000, AccessKind::Store), 266);
    // The store populated L2 only: a second store misses L1 again and hits L2.
    assert_eq!(cache.access(0x5000, AccessKind::Store), 16);

    let stats = cache.stats();
    assert_eq!(stats.l1_store_misses, 2);
    assert_eq!(stats.l1_store_hits, 0);
    assert_eq!(stats.l2_store_misses, 1);
    assert_eq!(stats.l2_store_hits, 1);

    // Loads still allocate normally.
    assert_eq!(cache.access(0x5000, AccessKind::Load), 16);
    assert_eq!(cache.access(0x5000, AccessKind::Load), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Counter Consistency
// ══════════════════════════════════════════════════════════

/// A fresh hierarchy reports all-zero counters.
#[test]
fn empty_input_all_zero() {
    let cache = reference_cache();
    let stats = cache.stats();

    for kind in AccessKind::ALL {
        assert_eq!(stats.l1_accesses(kind), 0);
        assert_eq!(stats.l2_accesses(kind), 0);
    }
    assert_eq!(stats.l1_total_accesses(), 0);
    assert_eq!(stats.l2_total_accesses(), 0);
}

/// L2 sees exactly the L1 misses: every L1 miss of either kind produces one
/// L2 access of the same kind.
#[test]
fn l2_accesses_equal_l1_misses() {
    let mut cache = reference_cache();

    for i in 0..100u64 {
        let kind = if i % 3 == 0 { AccessKind::Store } else { AccessKind::Load };
        cache.access(i * 40, kind);
    }

    let stats = cache.stats();
    for kind in AccessKind::ALL {
        assert_eq!(stats.l2_accesses(kind), stats.l1_misses(kind));
    }
    assert_eq!(stats.l1_total_accesses(), 100);
}

// ══════════════════════════════════════════════════════════
// 4. Degenerate Geometry
// ══════════════════════════════════════════════════════════

/// A zero-way L1 never hits but never faults; every access falls through to
/// L2, which behaves normally.
#[test]
fn zero_way_l1_never_hits() {
    let mut config = HierarchyConfig::default();
    config.l1.ways = 0;
    let mut cache = TwoLevelCache::<LruSet>::new(&config).unwrap();

    assert_eq!(cache.access(0x9000, AccessKind::Load), 266);
    assert_eq!(cache.access(0x9000, AccessKind::Load), 16);
    assert_eq!(cache.access(0x9000, AccessKind::Load), 16);

    let stats = cache.stats();
    assert_eq!(stats.l1_load_hits, 0);
    assert_eq!(stats.l1_load_misses, 3);
    assert_eq!(stats.l2_load_hits, 2);
}

// ══════════════════════════════════════════════════════════
// 5. Reports
// ══════════════════════════════════════════════════════════

/// The configuration dump names the label, policy, flags, and geometry.
#[test]
fn describe_mentions_configuration() {
    let cache = reference_cache();
    let dump = cache.describe("  ");

    assert!(dump.contains("data-cache"));
    assert!(dump.contains("LRU"));
    assert!(dump.contains("Store_allocation: Yes"));
    assert!(dump.contains("L2_inclusive: Yes"));
    assert!(dump.contains("Size(KB):          32"));
}

/// The statistics report is zero-safe and carries every counter line.
#[test]
fn stats_report_renders_without_accesses() {
    let cache = reference_cache();
    let report = cache.stats_report("");

    assert!(report.contains("L1-Load-Hits"));
    assert!(report.contains("L2-Store-Misses"));
    assert!(report.contains("0.00%"));
}
