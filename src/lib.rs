pub mod cds;
pub mod cigar;
pub mod error;
pub mod extract;
pub mod io;
pub mod junction;
pub mod params;
pub mod skeleton;
pub mod stats;

use log::info;

use crate::extract::ExtractionConfig;
use crate::params::{Parameters, RunMode};

/// Top-level dispatcher. Called from `main()` after CLI parsing.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    params.validate()?;

    info!("dijunc v{}", env!("CARGO_PKG_VERSION"));
    info!("runMode: {}", params.run_mode);
    info!("runThreadN: {}", params.run_thread_n);

    match params.run_mode {
        RunMode::ExtractJunctions => extract_junctions(params),
        RunMode::FilterCds => filter_cds(params),
    }
}

fn extract_junctions(params: &Parameters) -> anyhow::Result<()> {
    let segments_file = params
        .segments_file
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--ref is required"))?;
    let output = params
        .output
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--output is required"))?;

    let config = ExtractionConfig {
        segments: io::reference::load_segments(segments_file)?,
        thresholds: params.thresholds()?,
        family: params.gap_family(),
    };
    info!(
        "Gap family: {}, min_length: {}, skip_length: {}",
        config.family, config.thresholds.min_length, config.thresholds.skip_length
    );
    info!("Sample files: {}", params.files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.run_thread_n)
        .build()?;
    let samples = pool.install(|| extract::extract_samples(&params.files, &config))?;

    junction::write_table(
        output,
        config.family,
        samples.iter().flat_map(|s| s.records.iter()),
    )?;

    extract::total_stats(&samples).print_summary();
    info!("Junction extraction complete!");
    Ok(())
}

fn filter_cds(params: &Parameters) -> anyhow::Result<()> {
    let (Some(cds_file), Some(input), Some(output)) = (
        params.ref_cds_position.as_deref(),
        params.input_sam_file.as_deref(),
        params.output_sam_file.as_deref(),
    ) else {
        anyhow::bail!("--ref_CDS_position, --input_sam_file and --output_sam_file are required");
    };

    let intervals = io::reference::load_cds_intervals(cds_file)?;
    let stats = cds::filter_sam(input, output, &intervals, params.max_junctions)?;

    stats.print_summary();
    info!("CDS filtering complete!");
    Ok(())
}
