/// Alignment skeletons: blocks, junctions and indel features of a CIGAR
///
/// A skeleton is produced by a single left-to-right walk over the CIGAR
/// operations. Match, deletion and insertion operations accumulate into the
/// current block, every skip closes that block and opens a junction, and
/// soft clips are ignored. Coordinates are 1-based and inclusive.
mod threshold;

pub use threshold::ThresholdConfig;

use crate::cigar::CigarOp;

/// Kind of an indel feature inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Deletion,
    Insertion,
}

impl FeatureKind {
    /// SAM letter used in pooled feature labels
    pub fn letter(&self) -> char {
        match self {
            FeatureKind::Deletion => 'D',
            FeatureKind::Insertion => 'I',
        }
    }
}

/// One deletion or insertion, attached to the block it occurs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub kind: FeatureKind,
    /// Ordinal of the owning block
    pub block: usize,
    pub len: u32,
}

/// Reference-consuming run between two junctions (or a sequence edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    /// Sum of M, D and I lengths inside the block
    pub effective_length: u64,
    /// First reference base of the block
    pub ref_start: u64,
    /// Last reference base of the block
    pub ref_stop: u64,
}

/// A skip operation interpreted as a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
    /// Last reference base before the skip
    pub boundary5: u64,
    /// First reference base after the skip
    pub boundary3: u64,
    pub skip: u32,
}

impl Junction {
    /// Number of skipped reference bases derived from the boundaries
    pub fn gap_length(&self) -> u64 {
        self.boundary3 - self.boundary5 - 1
    }
}

/// Decoded structure of one alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSkeleton {
    leftmost: u64,
    blocks: Vec<Block>,
    junctions: Vec<Junction>,
    features: Vec<Feature>,
}

impl AlignmentSkeleton {
    /// Walk the operations of an alignment starting at `leftmost` (1-based).
    ///
    /// The operations are expected to come from [`crate::cigar::parse`], so
    /// soft clips only occur at the ends.
    pub fn walk(leftmost: u64, ops: &[CigarOp]) -> Self {
        debug_assert!(leftmost >= 1, "leftmost position is 1-based");

        let mut blocks = Vec::new();
        let mut junctions = Vec::new();
        let mut features = Vec::new();

        // next reference base to be consumed
        let mut pos = leftmost;
        let mut block_start = pos;
        let mut effective_length = 0u64;

        for op in ops {
            if op.counts_in_block() {
                effective_length += op.len() as u64;
            }
            match *op {
                CigarOp::Match(n) => pos += n as u64,
                CigarOp::Del(n) => {
                    pos += n as u64;
                    features.push(Feature {
                        kind: FeatureKind::Deletion,
                        block: blocks.len(),
                        len: n,
                    });
                }
                CigarOp::Ins(n) => features.push(Feature {
                    kind: FeatureKind::Insertion,
                    block: blocks.len(),
                    len: n,
                }),
                CigarOp::Skip(n) => {
                    blocks.push(Block {
                        index: blocks.len(),
                        effective_length,
                        ref_start: block_start,
                        ref_stop: pos - 1,
                    });
                    junctions.push(Junction {
                        boundary5: pos - 1,
                        boundary3: pos + n as u64,
                        skip: n,
                    });
                    pos += n as u64;
                    block_start = pos;
                    effective_length = 0;
                }
                CigarOp::SoftClip(_) => {}
            }
        }

        blocks.push(Block {
            index: blocks.len(),
            effective_length,
            ref_start: block_start,
            ref_stop: pos - 1,
        });

        Self {
            leftmost,
            blocks,
            junctions,
            features,
        }
    }

    /// Leftmost reference position the skeleton was walked from
    pub fn leftmost(&self) -> u64 {
        self.leftmost
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// All features in encounter order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn n_junctions(&self) -> usize {
        self.junctions.len()
    }

    /// Blocks that are neither first nor last
    pub fn internal_blocks(&self) -> &[Block] {
        if self.blocks.len() <= 2 {
            &[]
        } else {
            &self.blocks[1..self.blocks.len() - 1]
        }
    }

    /// Deletion features in encounter order
    pub fn deletions(&self) -> impl Iterator<Item = &Feature> {
        self.features_of(FeatureKind::Deletion)
    }

    /// Insertion features in encounter order
    pub fn insertions(&self) -> impl Iterator<Item = &Feature> {
        self.features_of(FeatureKind::Insertion)
    }

    pub fn features_of(&self, kind: FeatureKind) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.kind == kind)
    }

    /// Last reference base covered by the alignment
    pub fn last_base(&self) -> u64 {
        self.blocks
            .last()
            .map(|b| b.ref_stop)
            .unwrap_or(self.leftmost - 1)
    }
}

/// Calculate reference length from CIGAR (M + D + N)
pub fn reference_length(ops: &[CigarOp]) -> u64 {
    ops.iter()
        .filter(|op| op.consumes_reference())
        .map(|op| op.len() as u64)
        .sum()
}
