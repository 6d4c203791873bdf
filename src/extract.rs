/// Junction extraction over per-sample SAM files
///
/// Every alignment line runs through tokenizer, walker, threshold filter and
/// record assembler. Records of a sample are grouped by segment (sorted by
/// segment id, encounter order within a segment). A sample file without
/// alignment lines yields one placeholder row per selected segment.
use crate::cigar;
use crate::error::Error;
use crate::io::sam::{is_header, SamLine, SamReader};
use crate::junction::{GapFamily, JunctionRecord};
use crate::skeleton::{AlignmentSkeleton, ThresholdConfig};
use crate::stats::{ExtractionStats, Skipped};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Immutable settings shared by all samples of a run
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Segments of interest; alignments to other segments are ignored
    pub segments: BTreeSet<String>,
    pub thresholds: ThresholdConfig,
    pub family: GapFamily,
}

/// Junction rows of one sample file
#[derive(Debug, Clone)]
pub struct SampleJunctions {
    pub sample: String,
    pub records: Vec<JunctionRecord>,
    pub stats: ExtractionStats,
}

/// Sample id of an input file: basename up to the first `.`
pub fn sample_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// Turn one alignment line into a junction record
///
/// Malformed lines are logged at `warn`, threshold rejections at `debug`.
pub fn evaluate_line(
    sample: &str,
    line: &str,
    config: &ExtractionConfig,
) -> Result<JunctionRecord, Skipped> {
    let rec = SamLine::parse(line).map_err(|e| {
        warn!("Sample {}: skipping alignment line: {}", sample, e);
        Skipped::Malformed
    })?;

    if !config.segments.contains(rec.segment) {
        return Err(Skipped::SegmentNotSelected);
    }

    let ops = cigar::parse(rec.cigar).map_err(|e| {
        warn!(
            "Sample {}: skipping read {} ({}): {}",
            sample, rec.read_id, rec.cigar, e
        );
        Skipped::Malformed
    })?;

    let skeleton = AlignmentSkeleton::walk(rec.pos, &ops);
    if skeleton.n_junctions() != config.family.n_junctions() {
        return Err(Skipped::OtherJunctionCount);
    }
    if !config.thresholds.accepts(&skeleton) {
        debug!(
            "Sample {}: read {} ({}) below length thresholds",
            sample, rec.read_id, rec.cigar
        );
        return Err(Skipped::BelowThreshold);
    }

    Ok(JunctionRecord::assemble(sample, &rec, &skeleton, config.family))
}

/// Process one sample file
///
/// # Arguments
/// * `path` - SAM file of the sample (plain or gzip)
/// * `config` - Segments, thresholds and gap family of the run
pub fn process_sample(path: &Path, config: &ExtractionConfig) -> Result<SampleJunctions, Error> {
    let sample = sample_id(path);
    info!("Processing file: {}", path.display());

    let mut reader = SamReader::open(path)?;
    let mut stats = ExtractionStats::new();
    stats.samples = 1;
    let mut by_segment: BTreeMap<String, Vec<JunctionRecord>> = BTreeMap::new();
    let mut header_only = true;

    loop {
        let line = match reader.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.is_record_level() => {
                warn!("Skipping alignment line: {}", e);
                header_only = false;
                stats.record_skipped(Skipped::Malformed);
                continue;
            }
            Err(e) => return Err(e),
        };
        if is_header(line) || line.is_empty() {
            continue;
        }
        header_only = false;

        match evaluate_line(&sample, line, config) {
            Ok(record) => {
                stats.record_accepted();
                by_segment
                    .entry(record.segment.clone())
                    .or_default()
                    .push(record);
            }
            Err(reason) => stats.record_skipped(reason),
        }
    }

    let records: Vec<JunctionRecord> = if header_only {
        debug!("Sample {} has no alignments, writing placeholder rows", sample);
        stats.empty_samples = 1;
        config
            .segments
            .iter()
            .map(|segment| JunctionRecord::placeholder(&sample, segment, config.family))
            .collect()
    } else {
        by_segment.into_values().flatten().collect()
    };

    Ok(SampleJunctions {
        sample,
        records,
        stats,
    })
}

/// Process all sample files in parallel on the current rayon pool
///
/// Results keep the order of `files`. The first I/O error aborts the run.
pub fn extract_samples(
    files: &[PathBuf],
    config: &ExtractionConfig,
) -> Result<Vec<SampleJunctions>, Error> {
    files
        .par_iter()
        .map(|path| process_sample(path, config))
        .collect()
}

/// Merge the per-sample counters of a run
pub fn total_stats(samples: &[SampleJunctions]) -> ExtractionStats {
    let mut total = ExtractionStats::new();
    for sample in samples {
        total.merge(&sample.stats);
    }
    total
}
