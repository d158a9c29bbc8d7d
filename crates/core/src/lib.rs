//! Two-level cache hierarchy simulator library.
//!
//! This crate implements a functional simulator of a two-level set-associative
//! data-cache hierarchy with the following:
//! 1. **Policy sets:** Five interchangeable replacement policies (LRU, Random, LFU, LIP, SRRIP).
//! 2. **Hierarchy:** Address splitting, L1/L2 orchestration, and inclusive back-invalidation.
//! 3. **Statistics:** Per-access-kind hit/miss counters and human-readable reports.
//! 4. **Replay:** A text-trace parser and replay driver with config-driven policy dispatch.
//!
//! The instrumentation layer that observes a real program and produces the
//! address stream is an external collaborator; this crate only consumes the
//! stream, one `(address, access kind)` pair at a time.

/// Common types (tags, access kinds, error definitions).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Cache hierarchy (geometry, replacement-policy sets, two-level orchestration).
pub mod cache;
/// Hit/miss statistics collection.
pub mod stats;
/// Trace parsing and replay driving.
pub mod replay;

/// Hierarchy configuration root; use `HierarchyConfig::default()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Main simulator type; generic over the replacement-policy set.
pub use crate::cache::TwoLevelCache;
/// Replay entry point; selects the policy variant from the configuration.
pub use crate::replay::run_trace;
