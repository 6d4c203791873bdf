/// Reference lookup tables: segment allow-list and CDS intervals
use crate::cds::CdsInterval;
use crate::error::Error;
use crate::io::open_text;
use std::collections::{BTreeSet, HashMap};
use std::io::{BufRead, Read};
use std::path::Path;

/// Load the segment allow-list.
///
/// One segment id per line; the id is the text up to the first carriage
/// return or newline, so files with mixed line endings are accepted.
/// Blank lines are ignored.
pub fn load_segments(path: &Path) -> Result<BTreeSet<String>, Error> {
    let mut contents = String::new();
    open_text(path)?
        .read_to_string(&mut contents)
        .map_err(|e| Error::io(e, path))?;

    let segments: BTreeSet<String> = contents
        .split('\n')
        .filter_map(|line| line.split('\r').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    log::info!(
        "Loaded {} segments from {}",
        segments.len(),
        path.display()
    );
    Ok(segments)
}

/// Load CDS intervals.
///
/// Tab-separated columns:
/// 1. segment id
/// 2. CDS start (1-based inclusive)
/// 3. CDS end (1-based inclusive)
///
/// Blank lines and `#` comments are skipped; any other malformed row fails
/// the whole load.
pub fn load_cds_intervals(path: &Path) -> Result<HashMap<String, CdsInterval>, Error> {
    let reader = open_text(path)?;
    let mut intervals = HashMap::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(e, path))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (segment, interval) = parse_cds_line(line).map_err(|msg| {
            Error::Reference(format!("{}:{}: {}", path.display(), line_num + 1, msg))
        })?;

        if intervals.insert(segment.to_string(), interval).is_some() {
            log::warn!(
                "Duplicate CDS interval for {} at line {}; keeping the last one",
                segment,
                line_num + 1
            );
        }
    }

    log::info!(
        "Loaded CDS intervals for {} segments from {}",
        intervals.len(),
        path.display()
    );
    Ok(intervals)
}

fn parse_cds_line(line: &str) -> Result<(&str, CdsInterval), String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    }

    let parse = |field: &str, what: &str| {
        field
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid CDS {what} '{field}': {e}"))
    };
    let min = parse(fields[1], "start")?;
    let max = parse(fields[2], "end")?;

    let interval = CdsInterval::new(min, max).ok_or_else(|| {
        format!("CDS start {min} is greater than end {max}")
    })?;

    Ok((fields[0], interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_segments_mixed_line_endings() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        write!(tmpfile, "CY098877.1\r\nCY098876.1\nCY098875.1\r\n\nCY098874.1").unwrap();
        tmpfile.flush().unwrap();

        let segments = load_segments(tmpfile.path()).unwrap();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        assert_eq!(
            segments,
            vec!["CY098874.1", "CY098875.1", "CY098876.1", "CY098877.1"]
        );
    }

    #[test]
    fn test_load_cds_intervals() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "# segment\tmin\tmax").unwrap();
        writeln!(tmpfile, "AF389115.1\t28\t2307").unwrap();
        writeln!(tmpfile, "AF389116.1\t25\t2298\r").unwrap();
        writeln!(tmpfile).unwrap();
        tmpfile.flush().unwrap();

        let cds = load_cds_intervals(tmpfile.path()).unwrap();
        assert_eq!(cds.len(), 2);
        assert_eq!(cds["AF389115.1"], CdsInterval::new(28, 2307).unwrap());
        assert_eq!(cds["AF389116.1"].max, 2298);
    }

    #[test]
    fn test_load_cds_malformed_row() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "AF389115.1\t28\t2307").unwrap();
        writeln!(tmpfile, "AF389116.1\tstart\t2298").unwrap();
        tmpfile.flush().unwrap();

        let err = load_cds_intervals(tmpfile.path()).unwrap_err();
        assert!(matches!(err, Error::Reference(_)));
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn test_load_cds_inverted_interval() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "AF389115.1\t2307\t28").unwrap();
        tmpfile.flush().unwrap();

        let err = load_cds_intervals(tmpfile.path()).unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_load_cds_too_few_fields() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "AF389115.1\t28").unwrap();
        tmpfile.flush().unwrap();

        assert!(load_cds_intervals(tmpfile.path()).is_err());
    }
}
