/// SAM range filter: keep alignments whose span lies inside the CDS
use super::{interval_for, last_base, CdsInterval, Topology};
use crate::cigar;
use crate::error::Error;
use crate::io::sam::{is_header, SamLine, SamReader};
use crate::stats::FilterStats;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Decide whether one alignment line passes the CDS filter
///
/// Returns `Ok(false)` for a recognized alignment outside the CDS and a
/// record-level error for lines that are excluded for any other reason.
pub fn check_line(
    rec: &SamLine,
    intervals: &HashMap<String, CdsInterval>,
    max_junctions: usize,
) -> Result<bool, Error> {
    let ops = cigar::parse(rec.cigar)?;
    Topology::classify(&ops, max_junctions)?;
    let cds = interval_for(intervals, rec.segment)?;
    Ok(cds.contains(rec.pos, last_base(rec.pos, &ops)))
}

/// Filter a SAM file against CDS intervals
///
/// Header lines are written first in input order, followed by the passing
/// alignment lines grouped by segment (sorted by segment id, input order
/// within a segment). The output file is only created once the whole input
/// has been read.
///
/// # Arguments
/// * `input` - SAM file to filter (plain or gzip)
/// * `output` - Path of the filtered SAM file
/// * `intervals` - CDS interval per segment
/// * `max_junctions` - Largest number of skips in a recognized topology
pub fn filter_sam(
    input: &Path,
    output: &Path,
    intervals: &HashMap<String, CdsInterval>,
    max_junctions: usize,
) -> Result<FilterStats, Error> {
    info!("Filtering {} against CDS intervals", input.display());

    let mut reader = SamReader::open(input)?;
    let mut stats = FilterStats::new();
    let mut headers: Vec<String> = Vec::new();
    let mut passing: BTreeMap<String, Vec<String>> = BTreeMap::new();

    loop {
        let line = match reader.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.is_record_level() => {
                warn!("Skipping alignment line: {}", e);
                stats.total_records += 1;
                stats.malformed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        if is_header(line) {
            stats.header_lines += 1;
            headers.push(line.to_string());
            continue;
        }
        if line.is_empty() {
            continue;
        }
        stats.total_records += 1;

        let rec = match SamLine::parse(line) {
            Ok(rec) => rec,
            Err(e) => {
                warn!(
                    "{}:{}: skipping alignment line: {}",
                    input.display(),
                    reader.line_num(),
                    e
                );
                stats.malformed += 1;
                continue;
            }
        };

        match check_line(&rec, intervals, max_junctions) {
            Ok(true) => {
                stats.passed += 1;
                passing
                    .entry(rec.segment.to_string())
                    .or_default()
                    .push(rec.raw.to_string());
            }
            Ok(false) => stats.out_of_range += 1,
            Err(e) if !e.is_record_level() => return Err(e),
            Err(Error::Format(msg)) => {
                warn!("Skipping read {} ({}): {}", rec.read_id, rec.cigar, msg);
                stats.malformed += 1;
            }
            Err(Error::UnrecognizedTopology(pattern)) => {
                debug!("Read {} has unrecognized topology {}", rec.read_id, pattern);
                stats.unrecognized_topology += 1;
            }
            Err(_) => stats.missing_cds += 1,
        }
    }

    let file = File::create(output).map_err(|e| Error::io(e, output))?;
    let mut writer = BufWriter::new(file);
    for line in headers.iter().chain(passing.values().flatten()) {
        writeln!(writer, "{line}").map_err(|e| Error::io(e, output))?;
    }
    writer.flush().map_err(|e| Error::io(e, output))?;

    info!(
        "Wrote {} alignments to {}",
        stats.passed,
        output.display()
    );
    Ok(stats)
}
