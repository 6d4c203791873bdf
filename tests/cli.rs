/// Command-line integration tests for both run modes
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a SAM file with a minimal header
fn create_sam(dir: &TempDir, name: &str, alignments: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "@HD\tVN:1.6\tSO:unsorted").unwrap();
    writeln!(file, "@SQ\tSN:CY1\tLN:2341").unwrap();
    writeln!(file, "@SQ\tSN:CY2\tLN:2341").unwrap();
    for line in alignments {
        writeln!(file, "{line}\t*\t0\t0\t*\t*").unwrap();
    }
    path
}

/// Helper to write the segment allow-list (CRLF line endings, as exported from spreadsheets)
fn create_segments(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("segments.txt");
    fs::write(&path, "CY1\r\nCY2\r\n").unwrap();
    path
}

fn extract_cmd(dir: &TempDir, gaps: &str, files: &[PathBuf]) -> (Command, PathBuf) {
    let output = dir.path().join(format!("junctions_{gaps}N.csv"));
    let mut cmd = Command::cargo_bin("dijunc").unwrap();
    cmd.arg("-r")
        .arg(create_segments(dir))
        .arg("-m")
        .arg("10")
        .arg("-s")
        .arg("3")
        .arg("-g")
        .arg(gaps)
        .arg("-o")
        .arg(&output)
        .arg("--runThreadN")
        .arg("2")
        .args(files);
    (cmd, output)
}

#[test]
fn test_extract_single_junction() {
    let tmpdir = TempDir::new().unwrap();
    let sample = create_sam(
        &tmpdir,
        "S1.sorted.sam",
        &[
            "read1\t0\tCY2\t100\t255\t20M5N30M",
            "read2\t0\tCY1\t1\t255\t10M2D15M5N20M",
            "read3\t0\tCY1\t100\t255\t20M5N5M",
            "read4\t0\tCY1\t100\t255\t2275M",
            "read5\t0\tCY9\t100\t255\t20M5N30M",
        ],
    );

    let (mut cmd, output) = extract_cmd(&tmpdir, "1", &[sample]);
    cmd.assert().success();

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], ",0,1,2,3,4,5,6,7,8");
    assert_eq!(lines[1], "0,S1,CY1,read2,27,33,1D_firstM,[2],,");
    assert_eq!(lines[2], "1,S1,CY2,read1,119,125,,,,");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_extract_header_only_sample() {
    let tmpdir = TempDir::new().unwrap();
    let s1 = create_sam(&tmpdir, "S1.sam", &["read1\t0\tCY1\t100\t255\t20M5N30M"]);
    let s2 = create_sam(&tmpdir, "S2.sam", &[]);

    let (mut cmd, output) = extract_cmd(&tmpdir, "1", &[s1, s2]);
    cmd.assert().success();

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("0,S1,CY1,read1,"));
    assert_eq!(lines[2], format!("1,S2,CY1{}", ",".repeat(7)));
    assert_eq!(lines[3], format!("2,S2,CY2{}", ",".repeat(7)));
}

#[test]
fn test_extract_skips_malformed_record() {
    let tmpdir = TempDir::new().unwrap();
    let sample = create_sam(
        &tmpdir,
        "S3.sam",
        &[
            "bad\t0\tCY1\t1\t255\t10X5M",
            "good\t0\tCY1\t100\t255\t20M5N30M",
        ],
    );

    let (mut cmd, output) = extract_cmd(&tmpdir, "1", &[sample]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("10X5M"));

    let contents = fs::read_to_string(&output).unwrap();
    assert!(!contents.contains("bad"));
    assert!(contents.contains("0,S3,CY1,good,119,125"));
}

#[test]
fn test_extract_two_junctions() {
    let tmpdir = TempDir::new().unwrap();
    let sample = create_sam(
        &tmpdir,
        "S4.sam",
        &[
            "a\t0\tCY1\t1\t255\t10M200N15M300N25M",
            "b\t0\tCY1\t1\t255\t10M1D10M200N15M300N25M3I10M",
            "c\t0\tCY1\t100\t255\t20M5N30M",
        ],
    );

    let (mut cmd, output) = extract_cmd(&tmpdir, "2", &[sample]);
    cmd.assert().success();

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], ",0,1,2,3,4,5,6,7,8,9,10");
    assert_eq!(lines[1], "0,S4,CY1,a,10,211,225,526,,,,");
    assert_eq!(lines[2], "1,S4,CY1,b,21,222,236,537,1D_firstM,[1],1I_thirdM,[3]");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_extract_four_junctions() {
    let tmpdir = TempDir::new().unwrap();
    let sample = create_sam(
        &tmpdir,
        "S5.sam",
        &["a\t0\tCY2\t1000\t255\t5S30M10N30M20N30M30N30M40N30M"],
    );

    let (mut cmd, output) = extract_cmd(&tmpdir, "4", &[sample]);
    cmd.assert().success();

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents.lines().nth(1),
        Some("0,S5,CY2,a,1029,1040,1069,1090,1119,1150,1179,1220,,,,")
    );
}

#[test]
fn test_extract_missing_input_fails() {
    let tmpdir = TempDir::new().unwrap();
    let missing = tmpdir.path().join("missing.sam");

    let (mut cmd, output) = extract_cmd(&tmpdir, "1", &[missing]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.sam"));
    assert!(!output.exists());
}

#[test]
fn test_extract_requires_thresholds() {
    let tmpdir = TempDir::new().unwrap();
    let sample = create_sam(&tmpdir, "S1.sam", &[]);

    Command::cargo_bin("dijunc")
        .unwrap()
        .arg("-r")
        .arg(create_segments(&tmpdir))
        .arg("-o")
        .arg(tmpdir.path().join("out.csv"))
        .arg(sample)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_length"));
}

#[test]
fn test_filter_cds() {
    let tmpdir = TempDir::new().unwrap();
    let input = create_sam(
        &tmpdir,
        "in.sam",
        &[
            "a\t0\tCY2\t30\t255\t100M200N100M",
            "b\t0\tCY1\t30\t255\t100M200N100M",
            "c\t0\tCY2\t10\t255\t100M200N100M",
            "d\t0\tCY2\t30\t255\t2275M",
            "e\t0\tCY3\t30\t255\t100M200N100M",
        ],
    );
    let cds = tmpdir.path().join("cds.tsv");
    fs::write(&cds, "CY1\t28\t2307\nCY2\t20\t2300\n").unwrap();
    let output = tmpdir.path().join("out.sam");

    Command::cargo_bin("dijunc")
        .unwrap()
        .arg("--runMode")
        .arg("filterCds")
        .arg("--ref_CDS_position")
        .arg(&cds)
        .arg("--input_sam_file")
        .arg(&input)
        .arg("--output_sam_file")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("CDS Filter Summary"));

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[..3].iter().all(|l| l.starts_with('@')));
    assert!(lines[3].starts_with("b\t0\tCY1\t30\t"));
    assert!(lines[4].starts_with("a\t0\tCY2\t30\t"));
}

#[test]
fn test_filter_cds_bad_table() {
    let tmpdir = TempDir::new().unwrap();
    let input = create_sam(&tmpdir, "in.sam", &[]);
    let cds = tmpdir.path().join("cds.tsv");
    fs::write(&cds, "CY1\tstart\t2307\n").unwrap();

    Command::cargo_bin("dijunc")
        .unwrap()
        .arg("--runMode")
        .arg("filterCds")
        .arg("--ref_CDS_position")
        .arg(&cds)
        .arg("--input_sam_file")
        .arg(&input)
        .arg("--output_sam_file")
        .arg(tmpdir.path().join("out.sam"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference table error"));
}
