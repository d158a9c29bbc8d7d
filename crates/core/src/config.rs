//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulated hierarchy. It provides:
//! 1. **Defaults:** Baseline geometry and latency constants.
//! 2. **Structures:** Hierarchical config for levels, latencies, and policy flags.
//! 3. **Enums:** Replacement policy and store-allocation strategy types.
//! 4. **Validation:** The construction-time geometry invariants.
//!
//! Configuration is supplied via JSON (`serde_json`) or built in code with
//! `HierarchyConfig::default()`. One `HierarchyConfig` describes one simulated
//! execution context; callers modeling several contexts construct one
//! hierarchy per context.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hierarchy when a field is not explicitly
/// present in the supplied JSON.
mod defaults {
    /// Default L1 data cache size in bytes (32 KiB).
    pub const L1_SIZE: usize = 32 * 1024;

    /// Default L2 cache size in bytes (256 KiB).
    pub const L2_SIZE: usize = 256 * 1024;

    /// Default cache block (line) size in bytes.
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE: usize = 64;

    /// Default associativity for both levels (8 ways).
    pub const WAYS: usize = 8;

    /// Default L1 hit latency in cycles.
    pub const L1_HIT_LATENCY: u64 = 1;

    /// Default L2 hit latency in cycles.
    pub const L2_HIT_LATENCY: u64 = 15;

    /// Default L2 miss (memory) latency in cycles.
    pub const L2_MISS_LATENCY: u64 = 250;

    /// Default L2 prefetch distance in lines (0 disables the reserved hook).
    pub const PREFETCH_LINES: u32 = 0;

    /// Default hierarchy label used in the configuration dump.
    pub const LABEL: &str = "data-cache";
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which resident line to evict when a
/// new line must be installed in a full cache set. The same policy governs
/// both levels of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru")]
    Lru,

    /// Random replacement policy.
    ///
    /// Evicts a pseudo-randomly selected resident line.
    #[serde(alias = "Random")]
    Random,

    /// Least Frequently Used replacement policy.
    ///
    /// Evicts the line with the fewest recorded hits; ties go to the
    /// earliest-inserted line.
    #[serde(alias = "Lfu")]
    Lfu,

    /// LRU Insertion Policy.
    ///
    /// Evicts like LRU but inserts new lines at the least-recently-used end,
    /// so a line must be hit once before it is protected.
    #[serde(alias = "Lip")]
    Lip,

    /// Static Re-Reference Interval Prediction policy.
    ///
    /// Tracks a re-reference prediction value per line; evicts lines
    /// predicted to be re-referenced furthest in the future.
    #[serde(alias = "Srrip")]
    Srrip,
}

/// Cache allocation strategy for stores that miss in L1.
///
/// Loads always allocate on an L1 miss; this flag only governs stores.
/// Either way the L2 lookup still happens on every L1 miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum StoreAllocation {
    /// Stores that miss in L1 bring the line into L1 (write-allocate).
    #[default]
    Allocate,

    /// Stores that miss in L1 leave L1 untouched (no-write-allocate).
    NoAllocate,
}

/// Geometry of a single cache level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// Total level size in bytes
    #[serde(default = "LevelConfig::default_size")]
    pub size_bytes: usize,

    /// Cache block (line) size in bytes
    #[serde(default = "LevelConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways per set)
    #[serde(default = "LevelConfig::default_ways")]
    pub ways: usize,
}

impl LevelConfig {
    /// Returns the default level size in bytes.
    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_line() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the number of sets this geometry derives.
    ///
    /// The set count is `size / (ways * line)`. A zero-way level cannot hold
    /// anything; it is mapped to a single, permanently empty set so that
    /// address splitting stays well defined without dividing by zero.
    pub fn num_sets(&self) -> usize {
        if self.ways == 0 {
            1
        } else {
            self.size_bytes / (self.ways * self.line_bytes)
        }
    }
}

impl Default for LevelConfig {
    /// Creates the default (L1-shaped) level geometry.
    fn default() -> Self {
        Self {
            size_bytes: defaults::L1_SIZE,
            line_bytes: defaults::BLOCK_SIZE,
            ways: defaults::WAYS,
        }
    }
}

/// Access latencies charged by the hierarchy, in cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// Cycles charged for every access (the L1 probe)
    #[serde(default = "LatencyConfig::default_l1_hit")]
    pub l1_hit: u64,

    /// Additional cycles charged when the access reaches L2
    #[serde(default = "LatencyConfig::default_l2_hit")]
    pub l2_hit: u64,

    /// Additional cycles charged when the access misses L2
    #[serde(default = "LatencyConfig::default_l2_miss")]
    pub l2_miss: u64,
}

impl LatencyConfig {
    /// Returns the default L1 hit latency in cycles.
    fn default_l1_hit() -> u64 {
        defaults::L1_HIT_LATENCY
    }

    /// Returns the default L2 hit latency in cycles.
    fn default_l2_hit() -> u64 {
        defaults::L2_HIT_LATENCY
    }

    /// Returns the default L2 miss latency in cycles.
    fn default_l2_miss() -> u64 {
        defaults::L2_MISS_LATENCY
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            l1_hit: defaults::L1_HIT_LATENCY,
            l2_hit: defaults::L2_HIT_LATENCY,
            l2_miss: defaults::L2_MISS_LATENCY,
        }
    }
}

/// Root configuration for one two-level hierarchy.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let config = HierarchyConfig::default();
/// assert_eq!(config.l1.size_bytes, 32 * 1024);
/// assert_eq!(config.l2.num_sets(), 512);
/// assert!(config.inclusive);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{HierarchyConfig, ReplacementPolicy, StoreAllocation};
///
/// let json = r#"{
///     "label": "replay-l2-srrip",
///     "l1": { "size_bytes": 32768, "line_bytes": 64, "ways": 8 },
///     "l2": { "size_bytes": 1048576, "line_bytes": 128, "ways": 16 },
///     "policy": "SRRIP",
///     "latencies": { "l1_hit": 1, "l2_hit": 15, "l2_miss": 250 },
///     "inclusive": true,
///     "store_allocation": "NoAllocate",
///     "prefetch_lines": 0
/// }"#;
///
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Srrip);
/// assert_eq!(config.store_allocation, StoreAllocation::NoAllocate);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    /// Human-readable label for reports
    #[serde(default = "HierarchyConfig::default_label")]
    pub label: String,

    /// L1 data cache geometry
    #[serde(default)]
    pub l1: LevelConfig,

    /// L2 cache geometry
    #[serde(default = "HierarchyConfig::default_l2")]
    pub l2: LevelConfig,

    /// Replacement policy used by both levels
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Access latencies in cycles
    #[serde(default)]
    pub latencies: LatencyConfig,

    /// Whether L2 must contain everything resident in L1
    #[serde(default = "HierarchyConfig::default_inclusive")]
    pub inclusive: bool,

    /// Whether stores allocate into L1 on a miss
    #[serde(default)]
    pub store_allocation: StoreAllocation,

    /// L2 prefetch distance in lines; reserved, not consulted by the access path
    #[serde(default = "HierarchyConfig::default_prefetch_lines")]
    pub prefetch_lines: u32,
}

impl HierarchyConfig {
    /// Returns the default hierarchy label.
    fn default_label() -> String {
        defaults::LABEL.to_string()
    }

    /// Returns the default L2 geometry.
    fn default_l2() -> LevelConfig {
        LevelConfig {
            size_bytes: defaults::L2_SIZE,
            line_bytes: defaults::BLOCK_SIZE,
            ways: defaults::WAYS,
        }
    }

    /// Inclusion defaults to on, matching the reference hierarchy.
    fn default_inclusive() -> bool {
        true
    }

    /// Returns the default (disabled) prefetch distance.
    fn default_prefetch_lines() -> u32 {
        defaults::PREFETCH_LINES
    }

    /// Checks the construction-time geometry invariants.
    ///
    /// Block sizes and derived set counts must be powers of two for both
    /// levels, L1 must not be larger than L2, and the L1 block must not be
    /// larger than the L2 block.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, cfg) in [("L1", &self.l1), ("L2", &self.l2)] {
            if !cfg.line_bytes.is_power_of_two() {
                return Err(ConfigError::BlockSizeNotPowerOfTwo {
                    level,
                    size: cfg.line_bytes,
                });
            }
            let sets = cfg.num_sets();
            if !sets.is_power_of_two() {
                return Err(ConfigError::SetCountNotPowerOfTwo {
                    level,
                    sets,
                    size: cfg.size_bytes,
                    block: cfg.line_bytes,
                    ways: cfg.ways,
                });
            }
        }

        if self.l1.size_bytes > self.l2.size_bytes {
            return Err(ConfigError::LevelSizeInverted {
                l1: self.l1.size_bytes,
                l2: self.l2.size_bytes,
            });
        }
        if self.l1.line_bytes > self.l2.line_bytes {
            return Err(ConfigError::BlockSizeInverted {
                l1: self.l1.line_bytes,
                l2: self.l2.line_bytes,
            });
        }

        Ok(())
    }
}

impl Default for HierarchyConfig {
    /// Creates the reference configuration: 32 KiB / 256 KiB, 64-byte blocks,
    /// 8-way, LRU, inclusive, store-allocate, latencies 1/15/250.
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            l1: LevelConfig::default(),
            l2: Self::default_l2(),
            policy: ReplacementPolicy::default(),
            latencies: LatencyConfig::default(),
            inclusive: true,
            store_allocation: StoreAllocation::default(),
            prefetch_lines: defaults::PREFETCH_LINES,
        }
    }
}
