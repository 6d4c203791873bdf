/// Record assembly: skeleton to one fixed-width junction row
use super::GapFamily;
use crate::io::sam::SamLine;
use crate::skeleton::{AlignmentSkeleton, Feature, FeatureKind};
use std::borrow::Cow;

/// Ordinal word of a block, as used in pooled labels
fn block_ordinal(index: usize) -> Cow<'static, str> {
    match index {
        0 => "first".into(),
        1 => "second".into(),
        2 => "third".into(),
        3 => "fourth".into(),
        4 => "fifth".into(),
        n => format!("{}th", n + 1).into(),
    }
}

/// All features of one kind pooled into a label and a length list
///
/// Labels: `1D_firstM` when every feature sits in one block, otherwise
/// `3D_2firstM_1secondM` with a per-block count in block order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledFeatures {
    pub label: String,
    /// Lengths in encounter order
    pub lengths: Vec<u32>,
}

impl PooledFeatures {
    /// Pool the features of `kind`; `None` if there are none
    pub fn pool<'a>(
        features: impl IntoIterator<Item = &'a Feature>,
        kind: FeatureKind,
    ) -> Option<Self> {
        let mut lengths = Vec::new();
        // (block, count) in block order; features arrive left to right
        let mut per_block: Vec<(usize, usize)> = Vec::new();

        for f in features.into_iter().filter(|f| f.kind == kind) {
            lengths.push(f.len);
            match per_block.last_mut() {
                Some((block, count)) if *block == f.block => *count += 1,
                _ => per_block.push((f.block, 1)),
            }
        }

        if lengths.is_empty() {
            return None;
        }

        let mut label = format!("{}{}_", lengths.len(), kind.letter());
        if let [(block, _)] = per_block.as_slice() {
            label.push_str(&format!("{}M", block_ordinal(*block)));
        } else {
            let parts: Vec<String> = per_block
                .iter()
                .map(|(block, count)| format!("{}{}M", count, block_ordinal(*block)))
                .collect();
            label.push_str(&parts.join("_"));
        }

        Some(Self { label, lengths })
    }

    /// Length list rendered as `[2, 3]`
    pub fn lengths_field(&self) -> String {
        let lengths: Vec<String> = self.lengths.iter().map(u32::to_string).collect();
        format!("[{}]", lengths.join(", "))
    }
}

/// One output row of the junction table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionRecord {
    pub sample: String,
    pub segment: String,
    /// `None` for placeholder rows
    pub read_id: Option<String>,
    pub boundary5: Option<u64>,
    /// Start/stop of each internal block; always `family.n_internal_blocks()` long
    pub internal_blocks: Vec<Option<(u64, u64)>>,
    pub boundary3: Option<u64>,
    pub deletions: Option<PooledFeatures>,
    pub insertions: Option<PooledFeatures>,
}

impl JunctionRecord {
    /// Flatten an accepted skeleton into the layout of `family`
    ///
    /// # Arguments
    /// * `sample` - Sample id of the input file
    /// * `rec` - Alignment line the skeleton was walked from
    /// * `skeleton` - Accepted skeleton
    /// * `family` - Gap family that fixes the column layout
    ///
    /// Narrower topologies leave their trailing internal block columns empty;
    /// wider ones are cut to the family width.
    pub fn assemble(
        sample: &str,
        rec: &SamLine,
        skeleton: &AlignmentSkeleton,
        family: GapFamily,
    ) -> Self {
        let n_internal = family.n_internal_blocks();
        let mut internal_blocks: Vec<Option<(u64, u64)>> = skeleton
            .internal_blocks()
            .iter()
            .take(n_internal)
            .map(|b| Some((b.ref_start, b.ref_stop)))
            .collect();
        internal_blocks.resize(n_internal, None);

        Self {
            sample: sample.to_string(),
            segment: rec.segment.to_string(),
            read_id: Some(rec.read_id.to_string()),
            boundary5: skeleton.junctions().first().map(|j| j.boundary5),
            internal_blocks,
            boundary3: skeleton.junctions().last().map(|j| j.boundary3),
            deletions: PooledFeatures::pool(skeleton.features(), FeatureKind::Deletion),
            insertions: PooledFeatures::pool(skeleton.features(), FeatureKind::Insertion),
        }
    }

    /// All-missing row standing in for a sample without alignments
    pub fn placeholder(sample: &str, segment: &str, family: GapFamily) -> Self {
        Self {
            sample: sample.to_string(),
            segment: segment.to_string(),
            read_id: None,
            boundary5: None,
            internal_blocks: vec![None; family.n_internal_blocks()],
            boundary3: None,
            deletions: None,
            insertions: None,
        }
    }

    /// True for rows built by [`JunctionRecord::placeholder`]
    pub fn is_placeholder(&self) -> bool {
        self.read_id.is_none()
    }

    /// Field values in column order; `None` marks a missing value
    pub fn fields(&self) -> Vec<Option<String>> {
        let mut fields = Vec::with_capacity(9 + 2 * self.internal_blocks.len());
        fields.push(Some(self.sample.clone()));
        fields.push(Some(self.segment.clone()));
        fields.push(self.read_id.clone());
        fields.push(self.boundary5.map(|b| b.to_string()));
        for block in &self.internal_blocks {
            fields.push(block.map(|(start, _)| start.to_string()));
            fields.push(block.map(|(_, stop)| stop.to_string()));
        }
        fields.push(self.boundary3.map(|b| b.to_string()));
        for pooled in [&self.deletions, &self.insertions] {
            fields.push(pooled.as_ref().map(|p| p.label.clone()));
            fields.push(pooled.as_ref().map(PooledFeatures::lengths_field));
        }
        fields
    }
}
