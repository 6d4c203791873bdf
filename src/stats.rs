/// Run statistics tracking and reporting
use log::info;

/// Why an alignment line did not produce a junction record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// Unparseable alignment line or CIGAR
    Malformed,
    /// Segment not in the allow-list
    SegmentNotSelected,
    /// Junction count differs from the gap family
    OtherJunctionCount,
    /// A block or skip is shorter than its threshold
    BelowThreshold,
}

/// Counters for an `extractJunctions` run
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Sample files processed
    pub samples: u64,
    /// Samples with no alignment lines (written as placeholder rows)
    pub empty_samples: u64,
    /// Alignment lines read
    pub total_records: u64,
    /// Records written to the junction table
    pub accepted: u64,
    pub malformed: u64,
    pub segment_not_selected: u64,
    pub other_junction_count: u64,
    pub below_threshold: u64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted alignment
    pub fn record_accepted(&mut self) {
        self.total_records += 1;
        self.accepted += 1;
    }

    /// Record an alignment that was skipped
    pub fn record_skipped(&mut self, reason: Skipped) {
        self.total_records += 1;
        match reason {
            Skipped::Malformed => self.malformed += 1,
            Skipped::SegmentNotSelected => self.segment_not_selected += 1,
            Skipped::OtherJunctionCount => self.other_junction_count += 1,
            Skipped::BelowThreshold => self.below_threshold += 1,
        }
    }

    /// Add the counters of another (per-sample) tracker
    pub fn merge(&mut self, other: &Self) {
        self.samples += other.samples;
        self.empty_samples += other.empty_samples;
        self.total_records += other.total_records;
        self.accepted += other.accepted;
        self.malformed += other.malformed;
        self.segment_not_selected += other.segment_not_selected;
        self.other_junction_count += other.other_junction_count;
        self.below_threshold += other.below_threshold;
    }

    /// Get percentage of alignment lines that were accepted
    pub fn accepted_percent(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            100.0 * self.accepted as f64 / self.total_records as f64
        }
    }

    /// Print summary statistics to log
    pub fn print_summary(&self) {
        info!("=== Junction Extraction Summary ===");
        info!(
            "Samples: {} ({} without alignments)",
            self.samples, self.empty_samples
        );
        if self.total_records == 0 {
            info!("No alignment records processed");
            return;
        }

        info!("Alignment records: {}", self.total_records);
        info!(
            "Accepted: {} ({:.2}%)",
            self.accepted,
            self.accepted_percent()
        );
        info!("Segment not selected: {}", self.segment_not_selected);
        info!("Other junction count: {}", self.other_junction_count);
        info!("Below length thresholds: {}", self.below_threshold);
        if self.malformed > 0 {
            info!("Malformed records skipped: {}", self.malformed);
        }
    }
}

/// Counters for a `filterCds` run
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct FilterStats {
    pub header_lines: u64,
    pub total_records: u64,
    pub passed: u64,
    pub malformed: u64,
    pub unrecognized_topology: u64,
    /// Segment has no CDS interval
    pub missing_cds: u64,
    /// Span not contained in the CDS interval
    pub out_of_range: u64,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get percentage of alignment lines that passed
    pub fn passed_percent(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            100.0 * self.passed as f64 / self.total_records as f64
        }
    }

    /// Print summary statistics to log
    pub fn print_summary(&self) {
        info!("=== CDS Filter Summary ===");
        info!("Header lines: {}", self.header_lines);
        if self.total_records == 0 {
            info!("No alignment records processed");
            return;
        }

        info!("Alignment records: {}", self.total_records);
        info!(
            "Inside CDS: {} ({:.2}%)",
            self.passed,
            self.passed_percent()
        );
        info!("Outside CDS: {}", self.out_of_range);
        info!("Unrecognized topology: {}", self.unrecognized_topology);
        info!("No CDS interval for segment: {}", self.missing_cds);
        if self.malformed > 0 {
            info!("Malformed records skipped: {}", self.malformed);
        }
    }
}
