/// Minimum-length acceptance rules for skeletons
use super::AlignmentSkeleton;

/// Acceptance policy, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Minimum effective length of every block
    pub min_length: u64,
    /// Minimum length of every skipped region
    pub skip_length: u32,
}

impl ThresholdConfig {
    pub fn new(min_length: u64, skip_length: u32) -> Self {
        Self {
            min_length,
            skip_length,
        }
    }

    /// True if every block and every junction meets its minimum
    pub fn accepts(&self, skeleton: &AlignmentSkeleton) -> bool {
        skeleton
            .blocks()
            .iter()
            .all(|b| b.effective_length >= self.min_length)
            && skeleton
                .junctions()
                .iter()
                .all(|j| j.skip >= self.skip_length)
    }
}
