//! Address decomposition for one cache level.
//!
//! An address splits into three fields: block offset (low bits), set index
//! (middle bits), and tag (remaining high bits). The two levels of a
//! hierarchy generally use different block sizes, so the same address yields
//! different tags and set indices at each level; every access splits the
//! address once per level.

use crate::common::Tag;
use crate::config::LevelConfig;

/// Derived bit-arithmetic parameters of one cache level.
///
/// Both the block size and the set count are validated powers of two before a
/// `Geometry` is built, so the shifts below are exact.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    /// Number of block-offset bits (log2 of the block size).
    line_shift: u32,
    /// Mask applied to extract the set index (set count minus one).
    set_index_mask: u64,
    /// Number of set-index bits (log2 of the set count).
    index_shift: u32,
}

impl Geometry {
    /// Derives the geometry of a validated level configuration.
    pub fn new(config: &LevelConfig) -> Self {
        let num_sets = config.num_sets();
        Self {
            line_shift: config.line_bytes.trailing_zeros(),
            set_index_mask: (num_sets as u64) - 1,
            index_shift: num_sets.trailing_zeros(),
        }
    }

    /// Splits an address into its tag and set index for this level.
    ///
    /// The block-offset bits are dropped first; the set index is the low
    /// bits of what remains; the tag is everything above the set index.
    #[inline]
    pub fn split(&self, addr: u64) -> (Tag, usize) {
        let line = addr >> self.line_shift;
        let set_index = (line & self.set_index_mask) as usize;
        let tag = Tag::new(line >> self.index_shift);
        (tag, set_index)
    }

    /// Reconstructs the base address of the block identified by a tag and
    /// set index. Inverse of [`split`](Self::split) up to the block offset,
    /// which comes back as zero.
    #[inline]
    pub fn block_addr(&self, tag: Tag, set_index: usize) -> u64 {
        ((tag.val() << self.index_shift) | set_index as u64) << self.line_shift
    }

    /// Number of sets at this level.
    pub fn num_sets(&self) -> usize {
        (self.set_index_mask + 1) as usize
    }

    /// Number of block-offset bits.
    pub fn line_shift(&self) -> u32 {
        self.line_shift
    }

    /// Mask applied to extract the set index.
    pub fn set_index_mask(&self) -> u64 {
        self.set_index_mask
    }
}
