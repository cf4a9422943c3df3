//! End-to-end tests of the `barcode-clusters` binary.

use std::collections::HashSet;
use std::path::Path;

use assert_cmd::Command;
use barcode_clusters::pipeline::metrics::RunMetrics;
use predicates::prelude::*;

const HEADER: &str = "@HD\tVN:1.6\tSO:unsorted
@SQ\tSN:chr1\tLN:10000
@SQ\tSN:chr2\tLN:10000
";

/// Build a SAM record; `pos` is the 1-based SAM POS column
fn sam_record(name: &str, chrom: &str, pos: u32) -> String {
    format!("{name}\t0\t{chrom}\t{pos}\t60\t4M\t*\t0\t0\tACGT\tIIII\n")
}

fn write_sam(path: &Path, records: &[String]) {
    let mut text = HEADER.to_string();
    for record in records {
        text.push_str(record);
    }
    std::fs::write(path, text).expect("Failed to write SAM");
}

fn read_lines(path: &Path) -> HashSet<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(ToString::to_string)
        .collect()
}

fn cmd() -> Command {
    Command::cargo_bin("barcode-clusters").expect("binary should build")
}

#[test]
fn test_cluster_collapses_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.sam");
    let output = dir.path().join("clusters.txt");

    write_sam(
        &input,
        &[
            sam_record("r1::[AA][BB]", "chr1", 101),
            sam_record("r2::[AA][BB]", "chr1", 101),
            sam_record("r3::[CC][DD]", "chr2", 51),
        ],
    );

    cmd()
        .arg("cluster")
        .arg(&input)
        .arg(&output)
        .args(["-n", "2"])
        .assert()
        .success();

    let expected: HashSet<String> = ["AA.BB\tchr1:100", "CC.DD\tchr2:50"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(read_lines(&output), expected);
}

#[test]
fn test_cluster_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.sam");
    write_sam(&input, &[sam_record("r1::[AAA][BBB][CCC]", "chr2", 1)]);

    cmd()
        .arg("cluster")
        .arg(&input)
        .arg("-")
        .args(["--num-barcodes", "3"])
        .assert()
        .success()
        .stdout("AAA.BBB.CCC\tchr2:0\n");
}

#[test]
fn test_cluster_from_stdin() {
    let mut text = HEADER.to_string();
    text.push_str(&sam_record("r1::[X]", "chr1", 5));
    text.push_str(&sam_record("r2::[X]", "chr1", 9));

    let assert = cmd()
        .args(["cluster", "-", "-", "-n", "1", "--input-format", "sam"])
        .write_stdin(text)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let line = stdout.trim_end();
    let mut fields: Vec<&str> = line.split('\t').collect();
    assert_eq!(fields.remove(0), "X");
    fields.sort_unstable();
    assert_eq!(fields, vec!["chr1:4", "chr1:8"]);
}

#[test]
fn test_malformed_name_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.sam");
    let output = dir.path().join("clusters.txt");

    write_sam(
        &input,
        &[
            sam_record("r1::[AA][BB]", "chr1", 101),
            sam_record("r2::[AA]", "chr1", 201),
        ],
    );

    cmd()
        .arg("cluster")
        .arg(&input)
        .arg(&output)
        .args(["-n", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("r2::[AA]"))
        .stderr(predicate::str::contains("Record 2"));

    assert!(!output.exists());
}

#[test]
fn test_malformed_name_skip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.sam");
    let output = dir.path().join("clusters.txt");
    let metrics = dir.path().join("metrics.json");

    write_sam(
        &input,
        &[
            sam_record("r1::[AA][BB]", "chr1", 101),
            sam_record("r2", "chr1", 201),
            sam_record("r3::[AA][BB]", "chr1", 101),
        ],
    );

    cmd()
        .arg("cluster")
        .arg(&input)
        .arg(&output)
        .args(["-n", "2", "--malformed-names", "skip"])
        .arg("--metrics")
        .arg(&metrics)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));

    let expected: HashSet<String> = std::iter::once("AA.BB\tchr1:100".to_string()).collect();
    assert_eq!(read_lines(&output), expected);

    let metrics: RunMetrics =
        serde_json::from_str(&std::fs::read_to_string(&metrics).unwrap()).unwrap();
    assert_eq!(
        metrics,
        RunMetrics {
            records_read: 3,
            records_malformed: 1,
            clusters: 1,
            positions: 1,
            ..RunMetrics::default()
        }
    );
}

#[test]
fn test_min_positions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.sam");
    let output = dir.path().join("clusters.txt");

    write_sam(
        &input,
        &[
            sam_record("r1::[AA]", "chr1", 1),
            sam_record("r2::[AA]", "chr2", 1),
            sam_record("r3::[BB]", "chr1", 1),
            sam_record("r4::[BB]", "chr1", 1),
        ],
    );

    cmd()
        .arg("cluster")
        .arg(&input)
        .arg(&output)
        .args(["-n", "1", "--min-positions", "2"])
        .assert()
        .success();

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines.iter().all(|line| line.starts_with("AA\t")));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg("cluster")
        .arg(dir.path().join("missing.bam"))
        .arg(dir.path().join("clusters.txt"))
        .args(["-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_zero_barcodes_rejected() {
    cmd()
        .args(["cluster", "in.bam", "out.txt", "-n", "0"])
        .assert()
        .failure();
}

#[test]
fn test_num_barcodes_required() {
    cmd()
        .args(["cluster", "in.bam", "out.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--num-barcodes"));
}
