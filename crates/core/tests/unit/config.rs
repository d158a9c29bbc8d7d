//! Configuration Tests.
//!
//! Verifies the default hierarchy, JSON deserialization with partial
//! documents, and every construction-time validation rule.

use pretty_assertions::assert_eq;

use cachesim_core::common::ConfigError;
use cachesim_core::config::{
    HierarchyConfig, ReplacementPolicy, StoreAllocation,
};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// The default hierarchy is the reference configuration.
#[test]
fn default_is_reference_hierarchy() {
    let config = HierarchyConfig::default();

    assert_eq!(config.l1.size_bytes, 32 * 1024);
    assert_eq!(config.l1.line_bytes, 64);
    assert_eq!(config.l1.ways, 8);
    assert_eq!(config.l1.num_sets(), 64);

    assert_eq!(config.l2.size_bytes, 256 * 1024);
    assert_eq!(config.l2.num_sets(), 512);

    assert_eq!(config.policy, ReplacementPolicy::Lru);
    assert_eq!(config.latencies.l1_hit, 1);
    assert_eq!(config.latencies.l2_hit, 15);
    assert_eq!(config.latencies.l2_miss, 250);
    assert!(config.inclusive);
    assert_eq!(config.store_allocation, StoreAllocation::Allocate);
    assert_eq!(config.prefetch_lines, 0);

    assert!(config.validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. JSON Loading
// ══════════════════════════════════════════════════════════

/// An empty JSON object produces the full default configuration.
#[test]
fn empty_json_is_default() {
    let config: HierarchyConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.l1.size_bytes, 32 * 1024);
    assert_eq!(config.policy, ReplacementPolicy::Lru);
    assert!(config.inclusive);
}

/// Partial documents only override what they mention.
#[test]
fn partial_json_overrides() {
    let config: HierarchyConfig = serde_json::from_str(
        r#"{
            "policy": "LFU",
            "l2": { "size_bytes": 1048576 },
            "store_allocation": "NoAllocate",
            "inclusive": false
        }"#,
    )
    .unwrap();

    assert_eq!(config.policy, ReplacementPolicy::Lfu);
    assert_eq!(config.l2.size_bytes, 1024 * 1024);
    // Unmentioned level fields keep their defaults.
    assert_eq!(config.l2.line_bytes, 64);
    assert_eq!(config.store_allocation, StoreAllocation::NoAllocate);
    assert!(!config.inclusive);
}

/// Policy names accept both the uppercase and capitalized spellings.
#[test]
fn policy_spellings() {
    for (text, expected) in [
        ("\"LRU\"", ReplacementPolicy::Lru),
        ("\"Lru\"", ReplacementPolicy::Lru),
        ("\"RANDOM\"", ReplacementPolicy::Random),
        ("\"LFU\"", ReplacementPolicy::Lfu),
        ("\"LIP\"", ReplacementPolicy::Lip),
        ("\"SRRIP\"", ReplacementPolicy::Srrip),
        ("\"Srrip\"", ReplacementPolicy::Srrip),
    ] {
        let policy: ReplacementPolicy = serde_json::from_str(text).unwrap();
        assert_eq!(policy, expected, "spelling {text}");
    }
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

/// Non-power-of-two block sizes are rejected.
#[test]
fn rejects_non_power_of_two_block() {
    let mut config = HierarchyConfig::default();
    config.l1.line_bytes = 48;

    assert_eq!(
        config.validate(),
        Err(ConfigError::BlockSizeNotPowerOfTwo {
            level: "L1",
            size: 48
        })
    );
}

/// Non-power-of-two derived set counts are rejected.
#[test]
fn rejects_non_power_of_two_set_count() {
    let mut config = HierarchyConfig::default();
    // 384 / (2 * 64) = 3 sets.
    config.l1.size_bytes = 384;
    config.l1.ways = 2;

    assert_eq!(
        config.validate(),
        Err(ConfigError::SetCountNotPowerOfTwo {
            level: "L1",
            sets: 3,
            size: 384,
            block: 64,
            ways: 2
        })
    );
}

/// A level smaller than one set derives zero sets and is rejected.
#[test]
fn rejects_zero_sets() {
    let mut config = HierarchyConfig::default();
    config.l2.size_bytes = 256; // 256 / (8 * 64) = 0 sets
    config.l1.size_bytes = 256;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::SetCountNotPowerOfTwo { sets: 0, .. })
    ));
}

/// L1 larger than L2 is rejected.
#[test]
fn rejects_l1_larger_than_l2() {
    let mut config = HierarchyConfig::default();
    config.l2.size_bytes = 16 * 1024;

    assert_eq!(
        config.validate(),
        Err(ConfigError::LevelSizeInverted {
            l1: 32 * 1024,
            l2: 16 * 1024
        })
    );
}

/// An L1 block wider than the L2 block is rejected.
#[test]
fn rejects_l1_block_wider_than_l2() {
    let mut config = HierarchyConfig::default();
    config.l1.line_bytes = 128;
    // Keep the L1 set count a power of two: 32 KiB / (8 * 128) = 32 sets.

    assert_eq!(
        config.validate(),
        Err(ConfigError::BlockSizeInverted { l1: 128, l2: 64 })
    );
}

/// Zero ways degenerate to a single set and pass validation; the level just
/// never holds anything.
#[test]
fn zero_ways_is_valid() {
    let mut config = HierarchyConfig::default();
    config.l1.ways = 0;

    assert_eq!(config.l1.num_sets(), 1);
    assert!(config.validate().is_ok());
}

/// Error messages carry the offending numbers.
#[test]
fn error_messages_name_the_violation() {
    let err = ConfigError::BlockSizeNotPowerOfTwo {
        level: "L2",
        size: 96,
    };
    assert_eq!(err.to_string(), "L2 block size 96 is not a power of two");
}
