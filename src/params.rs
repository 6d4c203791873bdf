use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::junction::GapFamily;
use crate::skeleton::ThresholdConfig;

// ---------------------------------------------------------------------------
// Run mode enum
// ---------------------------------------------------------------------------

/// `--runMode` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    ExtractJunctions,
    FilterCds,
}

impl std::str::FromStr for RunMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extractJunctions" => Ok(Self::ExtractJunctions),
            "filterCds" => Ok(Self::FilterCds),
            _ => Err(format!(
                "unknown runMode '{s}'; expected 'extractJunctions' or 'filterCds'"
            )),
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtractJunctions => write!(f, "extractJunctions"),
            Self::FilterCds => write!(f, "filterCds"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// dijunc command-line parameters.
///
/// Long option names follow the DI boundary scripts (`--min_length`,
/// `--skip_length`, `--ref_CDS_position`, ...). Short options are single
/// letters only: the scripts' two-letter `-sl` is `-s` here.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dijunc",
    about = "Junction boundaries of split reads on segmented viral genomes",
    version
)]
pub struct Parameters {
    // ── Run ─────────────────────────────────────────────────────────────
    /// Run mode: extractJunctions or filterCds
    #[arg(long = "runMode", default_value = "extractJunctions")]
    pub run_mode: RunMode,

    /// Number of threads (samples processed in parallel)
    #[arg(long = "runThreadN", default_value_t = 1)]
    pub run_thread_n: usize,

    // ── extractJunctions ────────────────────────────────────────────────
    /// Per-sample SAM files (plain or .gz); sample id is the basename up to the first '.'
    pub files: Vec<PathBuf>,

    /// Segments of interest, one id per line
    #[arg(short = 'r', long = "ref")]
    pub segments_file: Option<PathBuf>,

    /// Minimum length of every mapped block
    #[arg(short = 'm', long = "min_length")]
    pub min_length: Option<u64>,

    /// Minimum length of every skipped region
    #[arg(short = 's', long = "skip_length")]
    pub skip_length: Option<u32>,

    /// Junctions per alignment: 1, 2 or 4
    #[arg(short = 'g', long = "gaps", default_value = "1")]
    pub gaps: GapFamily,

    /// Output junction table (CSV)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    // ── filterCds ───────────────────────────────────────────────────────
    /// CDS interval table: segment, CDS start, CDS end (tab-separated)
    #[arg(long = "ref_CDS_position")]
    pub ref_cds_position: Option<PathBuf>,

    /// SAM file to filter
    #[arg(long = "input_sam_file")]
    pub input_sam_file: Option<PathBuf>,

    /// Filtered SAM output
    #[arg(long = "output_sam_file")]
    pub output_sam_file: Option<PathBuf>,

    /// Largest number of skips in a recognized alignment topology
    #[arg(long = "maxJunctions", default_value_t = 4)]
    pub max_junctions: usize,
}

impl Parameters {
    /// Length thresholds of an extraction run.
    pub fn thresholds(&self) -> Result<ThresholdConfig, Error> {
        match (self.min_length, self.skip_length) {
            (Some(min_length), Some(skip_length)) => {
                Ok(ThresholdConfig::new(min_length, skip_length))
            }
            _ => Err(Error::Parameter(
                "--min_length and --skip_length are required when --runMode extractJunctions"
                    .into(),
            )),
        }
    }

    /// Gap family of an extraction run.
    pub fn gap_family(&self) -> GapFamily {
        self.gaps
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        match self.run_mode {
            RunMode::ExtractJunctions => {
                if self.files.is_empty() {
                    return Err(Error::Parameter(
                        "at least one SAM file is required when --runMode extractJunctions"
                            .into(),
                    ));
                }
                if self.segments_file.is_none() {
                    return Err(Error::Parameter(
                        "--ref is required when --runMode extractJunctions".into(),
                    ));
                }
                if self.output.is_none() {
                    return Err(Error::Parameter(
                        "--output is required when --runMode extractJunctions".into(),
                    ));
                }
                self.thresholds()?;
            }
            RunMode::FilterCds => {
                for (value, name) in [
                    (&self.ref_cds_position, "--ref_CDS_position"),
                    (&self.input_sam_file, "--input_sam_file"),
                    (&self.output_sam_file, "--output_sam_file"),
                ] {
                    if value.is_none() {
                        return Err(Error::Parameter(format!(
                            "{name} is required when --runMode filterCds"
                        )));
                    }
                }
                if self.max_junctions == 0 {
                    return Err(Error::Parameter("--maxJunctions must be >= 1".into()));
                }
            }
        }

        // Thread count must be at least 1
        if self.run_thread_n == 0 {
            return Err(Error::Parameter("--runThreadN must be >= 1".into()));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
