/// CDS range containment and topology allow-list
///
/// An alignment passes when its operation pattern is a recognized junction
/// topology and the reference span `[leftmost, last_base]` lies inside the
/// CDS interval of its segment.
mod filter;

pub use filter::filter_sam;

use crate::cigar::CigarOp;
use crate::error::Error;
use crate::skeleton::reference_length;
use std::collections::HashMap;

/// Coding-sequence interval of one segment (1-based, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdsInterval {
    pub min: u64,
    pub max: u64,
}

impl CdsInterval {
    /// Returns `None` when `min > max`
    pub fn new(min: u64, max: u64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// True if the span `[leftmost, last_base]` lies inside the interval
    pub fn contains(&self, leftmost: u64, last_base: u64) -> bool {
        leftmost >= self.min && last_base <= self.max
    }
}

/// Last reference base covered by an alignment starting at `leftmost`
///
/// # Arguments
/// * `leftmost` - 1-based leftmost reference position
/// * `ops` - Tokenized CIGAR operations
pub fn last_base(leftmost: u64, ops: &[CigarOp]) -> u64 {
    (leftmost + reference_length(ops)).saturating_sub(1)
}

/// Look up the CDS interval of a segment
pub fn interval_for<'a>(
    intervals: &'a HashMap<String, CdsInterval>,
    segment: &str,
) -> Result<&'a CdsInterval, Error> {
    intervals
        .get(segment)
        .ok_or_else(|| Error::MissingReferenceData(format!("no CDS interval for {segment}")))
}

/// Recognized alignment topology
///
/// Grammar: `S? M ([NDI] M)* S?`, with between one and `max_junctions`
/// skip operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub n_junctions: usize,
    pub n_deletions: usize,
    pub n_insertions: usize,
}

impl Topology {
    /// Classify a token sequence or reject it as unrecognized
    pub fn classify(ops: &[CigarOp], max_junctions: usize) -> Result<Self, Error> {
        let unrecognized = || Error::UnrecognizedTopology(crate::cigar::pattern(ops));

        let mut core = ops;
        if let [CigarOp::SoftClip(_), rest @ ..] = core {
            core = rest;
        }
        if let [rest @ .., CigarOp::SoftClip(_)] = core {
            core = rest;
        }

        let mut topology = Self {
            n_junctions: 0,
            n_deletions: 0,
            n_insertions: 0,
        };

        // even positions are matches, odd positions the gaps between them
        if core.len() % 2 == 0 {
            return Err(unrecognized());
        }
        for (i, op) in core.iter().enumerate() {
            match (i % 2, op) {
                (0, CigarOp::Match(_)) => {}
                (1, CigarOp::Skip(_)) => topology.n_junctions += 1,
                (1, CigarOp::Del(_)) => topology.n_deletions += 1,
                (1, CigarOp::Ins(_)) => topology.n_insertions += 1,
                _ => return Err(unrecognized()),
            }
        }

        if topology.n_junctions == 0 || topology.n_junctions > max_junctions {
            return Err(unrecognized());
        }
        Ok(topology)
    }
}
