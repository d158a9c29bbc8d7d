//! Trace parsing and replay driving.
//!
//! This module consumes the address streams the instrumentation side of the
//! tool produces. It performs:
//! 1. **Parsing:** One `(kind, address)` event per text line.
//! 2. **Replay:** Feeding every event to a hierarchy and accumulating cycles.
//! 3. **Dispatch:** Selecting the replacement-policy variant named by the
//!    configuration and monomorphizing the engine for it.
//!
//! # Trace format
//!
//! One event per line: an access-kind token followed by a hexadecimal
//! address. `l` or `r` means load, `s` or `w` means store, case-insensitive;
//! the `0x` prefix is optional. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! # warmup
//! L 0x7f2a4b20
//! S 7f2a4b28
//! ```

use std::io::BufRead;

use tracing::debug;

use crate::cache::TwoLevelCache;
use crate::cache::policies::{LfuSet, LipSet, LruSet, PolicySet, RandomSet, SrripSet};
use crate::common::{AccessKind, EngineError, TraceError};
use crate::config::{HierarchyConfig, ReplacementPolicy};
use crate::stats::CacheStats;

/// One memory reference from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Whether the reference was a load or a store.
    pub kind: AccessKind,
    /// The referenced byte address.
    pub addr: u64,
}

impl TraceEvent {
    /// Parses one trace line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    ///
    /// # Arguments
    ///
    /// * `line` - The raw line text.
    /// * `number` - One-based line number, used in error values.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] naming the line when the kind token or the
    /// address cannot be parsed.
    pub fn parse(line: &str, number: usize) -> Result<Option<Self>, TraceError> {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let mut fields = text.split_whitespace();
        // split_whitespace on non-empty trimmed text yields at least one field.
        let Some(kind_token) = fields.next() else {
            return Ok(None);
        };
        let kind = match kind_token.to_ascii_lowercase().as_str() {
            "l" | "r" => AccessKind::Load,
            "s" | "w" => AccessKind::Store,
            _ => {
                return Err(TraceError::BadKind {
                    line: number,
                    token: kind_token.to_string(),
                });
            }
        };

        let Some(addr_token) = fields.next() else {
            return Err(TraceError::MissingAddress { line: number });
        };
        let digits = addr_token
            .strip_prefix("0x")
            .or_else(|| addr_token.strip_prefix("0X"))
            .unwrap_or(addr_token);
        let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
            line: number,
            token: addr_token.to_string(),
        })?;

        Ok(Some(Self { kind, addr }))
    }
}

/// Totals accumulated over one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Number of events replayed.
    pub events: u64,
    /// Total cycles charged across all events.
    pub cycles: u64,
}

/// Replays every event of a trace through a hierarchy.
///
/// # Errors
///
/// Returns the first read or parse failure; events before it have already
/// been applied to the hierarchy.
pub fn replay<S, R>(cache: &mut TwoLevelCache<S>, reader: R) -> Result<ReplaySummary, TraceError>
where
    S: PolicySet,
    R: BufRead,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(event) = TraceEvent::parse(&line, index + 1)? {
            summary.cycles += cache.access(event.addr, event.kind);
            summary.events += 1;
        }
    }

    debug!(events = summary.events, cycles = summary.cycles, "replay finished");
    Ok(summary)
}

/// Outcome of a configured replay run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Event and cycle totals.
    pub summary: ReplaySummary,
    /// Final hit/miss counters.
    pub stats: CacheStats,
    /// Rendered configuration dump.
    pub configuration: String,
    /// Rendered statistics report.
    pub statistics: String,
}

/// Replays a trace under the policy named by the configuration.
///
/// This is the runtime seam over the compile-time policy parameter: each
/// enum variant monomorphizes [`TwoLevelCache`] for its set type.
///
/// # Errors
///
/// Returns an [`EngineError`] for configuration violations or trace
/// failures.
pub fn run_trace<R: BufRead>(
    config: &HierarchyConfig,
    reader: R,
) -> Result<RunReport, EngineError> {
    match config.policy {
        ReplacementPolicy::Lru => run::<LruSet, R>(config, reader),
        ReplacementPolicy::Random => run::<RandomSet, R>(config, reader),
        ReplacementPolicy::Lfu => run::<LfuSet, R>(config, reader),
        ReplacementPolicy::Lip => run::<LipSet, R>(config, reader),
        ReplacementPolicy::Srrip => run::<SrripSet, R>(config, reader),
    }
}

/// Builds the hierarchy for one concrete set type and replays the trace.
fn run<S: PolicySet, R: BufRead>(
    config: &HierarchyConfig,
    reader: R,
) -> Result<RunReport, EngineError> {
    let mut cache = TwoLevelCache::<S>::new(config)?;
    let summary = replay(&mut cache, reader)?;
    Ok(RunReport {
        summary,
        stats: cache.stats().clone(),
        configuration: cache.describe(""),
        statistics: cache.stats_report(""),
    })
}
