//! Two-level set-associative cache hierarchy.
//!
//! This module implements the simulator's engine: a configurable L1/L2
//! hierarchy generic over the replacement policy. It models hits, misses,
//! inclusive back-invalidation, and per-access latency in cycles.
//!
//! The policy is selected at compile time through the type parameter, the
//! same shape as the reference engine; runtime selection from a
//! configuration lives at the dispatch seam in [`crate::replay::run_trace`].

/// Address decomposition for one cache level.
pub mod geometry;

/// Replacement-policy set implementations (LRU, Random, LFU, LIP, SRRIP).
pub mod policies;

use std::fmt::Write as _;

use tracing::{info, trace};

use self::geometry::Geometry;
use self::policies::PolicySet;
use crate::common::{AccessKind, ConfigError, Tag};
use crate::config::{HierarchyConfig, LevelConfig, StoreAllocation};
use crate::stats::CacheStats;

/// One cache level: its sets plus the geometry they are indexed by.
#[derive(Clone, Debug)]
struct Level<S> {
    sets: Vec<S>,
    geometry: Geometry,
    size_bytes: usize,
    line_bytes: usize,
    ways: usize,
}

impl<S: PolicySet> Level<S> {
    /// Builds a level from a validated configuration: one default set per
    /// derived set index, each reset to the configured associativity.
    fn new(config: &LevelConfig) -> Self {
        let geometry = Geometry::new(config);
        let mut sets: Vec<S> = (0..geometry.num_sets()).map(|_| S::default()).collect();
        for set in &mut sets {
            set.set_associativity(config.ways);
        }
        Self {
            sets,
            geometry,
            size_bytes: config.size_bytes,
            line_bytes: config.line_bytes,
            ways: config.ways,
        }
    }
}

/// A two-level cache hierarchy generic over the replacement policy.
///
/// One instance models one simulated execution context. Counters accumulate
/// monotonically over the instance's lifetime; nothing is shared between
/// instances.
///
/// # Examples
///
/// ```
/// use cachesim_core::TwoLevelCache;
/// use cachesim_core::cache::policies::LruSet;
/// use cachesim_core::common::AccessKind;
/// use cachesim_core::config::HierarchyConfig;
///
/// let config = HierarchyConfig::default();
/// let mut cache = TwoLevelCache::<LruSet>::new(&config).unwrap();
///
/// // Cold access misses both levels: 1 + 15 + 250 cycles.
/// assert_eq!(cache.access(0x1000, AccessKind::Load), 266);
/// // The line is now resident in L1.
/// assert_eq!(cache.access(0x1000, AccessKind::Load), 1);
/// ```
pub struct TwoLevelCache<S> {
    label: String,
    l1: Level<S>,
    l2: Level<S>,

    l1_hit_latency: u64,
    l2_hit_latency: u64,
    l2_miss_latency: u64,

    inclusive: bool,
    store_allocation: StoreAllocation,
    /// Reserved prefetch distance; accepted and reported, never consulted.
    prefetch_lines: u32,

    stats: CacheStats,
}

impl<S: PolicySet> TwoLevelCache<S> {
    /// Constructs a hierarchy from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a block size or derived set count is
    /// not a power of two, or when L1 exceeds L2 in size or block size. No
    /// instance exists after a validation failure.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let l1 = Level::new(&config.l1);
        let l2 = Level::new(&config.l2);

        info!(
            label = %config.label,
            l1_sets = l1.geometry.num_sets(),
            l2_sets = l2.geometry.num_sets(),
            policy = l1.sets.first().map_or("?", |s: &S| s.name()),
            inclusive = config.inclusive,
            "constructed cache hierarchy"
        );

        Ok(Self {
            label: config.label.clone(),
            l1,
            l2,
            l1_hit_latency: config.latencies.l1_hit,
            l2_hit_latency: config.latencies.l2_hit,
            l2_miss_latency: config.latencies.l2_miss,
            inclusive: config.inclusive,
            store_allocation: config.store_allocation,
            prefetch_lines: config.prefetch_lines,
            stats: CacheStats::default(),
        })
    }

    /// Simulates one memory reference and returns the cycles it took.
    ///
    /// L1 is probed on every access. On an L1 miss the line is allocated
    /// into L1 (loads always; stores only under [`StoreAllocation::Allocate`])
    /// and L2 is probed. On an L2 miss the line is always allocated into L2;
    /// if that evicts a line and the hierarchy is inclusive, every L1 line
    /// covered by the evicted L2 block is invalidated.
    ///
    /// Hit/miss counters for both levels advance as a side effect. This
    /// method never fails; degenerate geometries simply never hit.
    pub fn access(&mut self, addr: u64, kind: AccessKind) -> u64 {
        // L1 first.
        let (l1_tag, l1_index) = self.l1.geometry.split(addr);
        let l1_hit = self.l1.sets[l1_index].find(l1_tag);
        self.stats.record_l1(kind, l1_hit);
        let mut cycles = self.l1_hit_latency;

        if l1_hit {
            return cycles;
        }

        // On a miss, loads always allocate, stores only under write-allocate.
        // The L1 eviction (if any) is not inclusion-relevant and is dropped.
        if kind == AccessKind::Load || self.store_allocation == StoreAllocation::Allocate {
            let _ = self.l1.sets[l1_index].replace(l1_tag);
        }

        // L2 is consulted on every L1 miss, allocation decision or not.
        let (l2_tag, l2_index) = self.l2.geometry.split(addr);
        let l2_hit = self.l2.sets[l2_index].find(l2_tag);
        self.stats.record_l2(kind, l2_hit);
        cycles += self.l2_hit_latency;

        if l2_hit {
            return cycles;
        }

        // L2 allocates loads and stores alike.
        let replaced = self.l2.sets[l2_index].replace(l2_tag);
        cycles += self.l2_miss_latency;

        if let Some(victim) = replaced {
            trace!(victim = %victim, set = l2_index, "L2 eviction");
            if self.inclusive {
                self.invalidate_l1_lines(victim, l2_index);
            }
        }

        cycles
    }

    /// Removes from L1 every line covered by an evicted L2 block.
    ///
    /// The evicted block's base address is reconstructed from its tag and set
    /// index, then each L1-block-sized slice of it is split against L1
    /// geometry and deleted if resident.
    fn invalidate_l1_lines(&mut self, victim: Tag, l2_index: usize) {
        let base = self.l2.geometry.block_addr(victim, l2_index);
        for offset in (0..self.l2.line_bytes).step_by(self.l1.line_bytes) {
            let covered = base | offset as u64;
            let (l1_tag, l1_index) = self.l1.geometry.split(covered);
            trace!(addr = covered, "inclusion invalidation");
            self.l1.sets[l1_index].delete_if_present(l1_tag);
        }
    }

    /// Returns the accumulated hit/miss counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Returns the hierarchy's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of L1 sets.
    pub fn l1_num_sets(&self) -> usize {
        self.l1.geometry.num_sets()
    }

    /// Returns the number of L2 sets.
    pub fn l2_num_sets(&self) -> usize {
        self.l2.geometry.num_sets()
    }

    /// Returns the L1 size in bytes.
    pub fn l1_size(&self) -> usize {
        self.l1.size_bytes
    }

    /// Returns the L2 size in bytes.
    pub fn l2_size(&self) -> usize {
        self.l2.size_bytes
    }

    /// Returns the L1 block size in bytes.
    pub fn l1_block_size(&self) -> usize {
        self.l1.line_bytes
    }

    /// Returns the L2 block size in bytes.
    pub fn l2_block_size(&self) -> usize {
        self.l2.line_bytes
    }

    /// Returns the L1 associativity.
    pub fn l1_associativity(&self) -> usize {
        self.l1.ways
    }

    /// Returns the L2 associativity.
    pub fn l2_associativity(&self) -> usize {
        self.l2.ways
    }

    /// Returns the number of L1 block-offset bits.
    pub fn l1_line_shift(&self) -> u32 {
        self.l1.geometry.line_shift()
    }

    /// Returns the number of L2 block-offset bits.
    pub fn l2_line_shift(&self) -> u32 {
        self.l2.geometry.line_shift()
    }

    /// Returns whether the hierarchy enforces inclusion.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Returns the configured store-allocation strategy.
    pub fn store_allocation(&self) -> StoreAllocation {
        self.store_allocation
    }

    /// Returns the reserved prefetch distance.
    pub fn prefetch_lines(&self) -> u32 {
        self.prefetch_lines
    }

    /// Returns the resident-entry count of one L1 set.
    ///
    /// Diagnostic accessor used by tests to check occupancy bounds.
    pub fn l1_set_occupancy(&self, index: usize) -> usize {
        self.l1.sets[index].occupancy()
    }

    /// Returns the resident-entry count of one L2 set.
    ///
    /// Diagnostic accessor used by tests to check occupancy bounds.
    pub fn l2_set_occupancy(&self, index: usize) -> usize {
        self.l2.sets[index].occupancy()
    }

    /// Probes L1 for an address without touching counters or policy state
    /// beyond the policy's hit side effect.
    ///
    /// Diagnostic accessor used by inclusion tests; the replay path never
    /// calls it.
    pub fn l1_contains(&mut self, addr: u64) -> bool {
        let (tag, index) = self.l1.geometry.split(addr);
        self.l1.sets[index].find(tag)
    }

    /// Renders a configuration dump: label, geometry, policy, latencies, and
    /// the inclusion/store-allocation flags.
    pub fn describe(&self, prefix: &str) -> String {
        let mut out = String::new();
        let policy = self.l1.sets.first().map_or("?", |s| s.name());

        let _ = writeln!(out, "{prefix}--------");
        let _ = writeln!(out, "{prefix}{}", self.label);
        let _ = writeln!(out, "{prefix}--------");
        let _ = writeln!(out, "{prefix}  L1-Data Cache:");
        let _ = writeln!(out, "{prefix}    Size(KB):       {:>5}", self.l1.size_bytes / 1024);
        let _ = writeln!(out, "{prefix}    Block Size(B):  {:>5}", self.l1.line_bytes);
        let _ = writeln!(out, "{prefix}    Associativity:  {:>5}", self.l1.ways);
        let _ = writeln!(out, "{prefix}");
        let _ = writeln!(out, "{prefix}  L2-Data Cache:");
        let _ = writeln!(out, "{prefix}    Size(KB):       {:>5}", self.l2.size_bytes / 1024);
        let _ = writeln!(out, "{prefix}    Block Size(B):  {:>5}", self.l2.line_bytes);
        let _ = writeln!(out, "{prefix}    Associativity:  {:>5}", self.l2.ways);
        let _ = writeln!(out, "{prefix}");
        let _ = writeln!(
            out,
            "{prefix}Latencies: {:>4} {:>4} {:>4}",
            self.l1_hit_latency, self.l2_hit_latency, self.l2_miss_latency
        );
        let _ = writeln!(
            out,
            "{prefix}L1-Sets: {:>4} - {} - assoc: {:>3}",
            self.l1_num_sets(),
            policy,
            self.l1.ways
        );
        let _ = writeln!(
            out,
            "{prefix}L2-Sets: {:>4} - {} - assoc: {:>3}",
            self.l2_num_sets(),
            policy,
            self.l2.ways
        );
        let _ = writeln!(
            out,
            "{prefix}Store_allocation: {}",
            if self.store_allocation == StoreAllocation::Allocate { "Yes" } else { "No" }
        );
        let _ = writeln!(
            out,
            "{prefix}L2_inclusive: {}",
            if self.inclusive { "Yes" } else { "No" }
        );
        out
    }

    /// Renders the statistics report: per-kind and total hits, misses, and
    /// accesses for both levels, with zero-safe percentages.
    pub fn stats_report(&self, prefix: &str) -> String {
        let mut out = String::new();

        let pct = |part: u64, total: u64| {
            if total == 0 { 0.0 } else { 100.0 * part as f64 / total as f64 }
        };

        let level = |out: &mut String,
                         name: &str,
                         hits: &dyn Fn(AccessKind) -> u64,
                         misses: &dyn Fn(AccessKind) -> u64,
                         total_hits: u64,
                         total_misses: u64| {
            let _ = writeln!(out, "{prefix}{name} Cache Stats:");
            for kind in AccessKind::ALL {
                let h = hits(kind);
                let m = misses(kind);
                let a = h + m;
                let _ = writeln!(
                    out,
                    "{prefix}{name}-{kind}-Hits:      {h:>12}  {:>6.2}%",
                    pct(h, a)
                );
                let _ = writeln!(
                    out,
                    "{prefix}{name}-{kind}-Misses:    {m:>12}  {:>6.2}%",
                    pct(m, a)
                );
                let _ = writeln!(out, "{prefix}{name}-{kind}-Accesses:  {a:>12}");
                let _ = writeln!(out, "{prefix}");
            }
            let total = total_hits + total_misses;
            let _ = writeln!(
                out,
                "{prefix}{name}-Total-Hits:      {total_hits:>12}  {:>6.2}%",
                pct(total_hits, total)
            );
            let _ = writeln!(
                out,
                "{prefix}{name}-Total-Misses:    {total_misses:>12}  {:>6.2}%",
                pct(total_misses, total)
            );
            let _ = writeln!(out, "{prefix}{name}-Total-Accesses:  {total:>12}");
            let _ = writeln!(out, "{prefix}");
        };

        level(
            &mut out,
            "L1",
            &|k| self.stats.l1_hits(k),
            &|k| self.stats.l1_misses(k),
            self.stats.l1_total_hits(),
            self.stats.l1_total_misses(),
        );
        level(
            &mut out,
            "L2",
            &|k| self.stats.l2_hits(k),
            &|k| self.stats.l2_misses(k),
            self.stats.l2_total_hits(),
            self.stats.l2_total_misses(),
        );

        out
    }
}

impl<S: PolicySet + std::fmt::Debug> std::fmt::Debug for TwoLevelCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoLevelCache")
            .field("label", &self.label)
            .field("l1_sets", &self.l1.geometry.num_sets())
            .field("l2_sets", &self.l2.geometry.num_sets())
            .field("inclusive", &self.inclusive)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
