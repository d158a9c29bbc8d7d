//! Error definitions for construction and trace handling.
//!
//! All failures in this crate are structural: a hierarchy configuration that
//! violates the geometry invariants, or a trace file that cannot be parsed.
//! The access path itself never fails; every address produces a deterministic
//! result once a hierarchy has been constructed.

use thiserror::Error;

/// Construction-time configuration violations.
///
/// Any of these makes the hierarchy unusable, so construction returns the
/// error instead of an instance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A cache level's block size is not a power of two.
    #[error("{level} block size {size} is not a power of two")]
    BlockSizeNotPowerOfTwo {
        /// Level label ("L1" or "L2").
        level: &'static str,
        /// The offending block size in bytes.
        size: usize,
    },

    /// A cache level's derived set count is not a power of two.
    ///
    /// The set count is `size / (ways * block)`; a zero count (level smaller
    /// than one set) is reported through this variant as well.
    #[error(
        "{level} set count {sets} is not a power of two \
         (size {size}, block {block}, ways {ways})"
    )]
    SetCountNotPowerOfTwo {
        /// Level label ("L1" or "L2").
        level: &'static str,
        /// The derived number of sets.
        sets: usize,
        /// Configured level size in bytes.
        size: usize,
        /// Configured block size in bytes.
        block: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// L1 capacity exceeds L2 capacity.
    #[error("L1 size {l1} exceeds L2 size {l2}")]
    LevelSizeInverted {
        /// L1 size in bytes.
        l1: usize,
        /// L2 size in bytes.
        l2: usize,
    },

    /// L1 block size exceeds L2 block size.
    #[error("L1 block size {l1} exceeds L2 block size {l2}")]
    BlockSizeInverted {
        /// L1 block size in bytes.
        l1: usize,
        /// L2 block size in bytes.
        l2: usize,
    },
}

/// Failures while reading or parsing a memory trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The line had an access-kind token but no address.
    #[error("trace line {line}: missing address")]
    MissingAddress {
        /// One-based line number in the trace.
        line: usize,
    },

    /// The access-kind token was not recognized.
    #[error("trace line {line}: unknown access kind {token:?}")]
    BadKind {
        /// One-based line number in the trace.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The address token was not valid hexadecimal.
    #[error("trace line {line}: bad address {token:?}")]
    BadAddress {
        /// One-based line number in the trace.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The underlying reader failed.
    #[error("trace read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level failure of a configured replay run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The hierarchy configuration was rejected at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
