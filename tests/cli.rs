use grin::config::Config;
use grin::error::GriError;
use grin::startup::run;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Error peak falling into a trough at depth 6, true peak at depth 13
const TYPICAL: [u64; 30] = [
    900, 400, 150, 60, 30, 20, 25, 40, 60, 80, 95, 105, 110, 104, 94, 79, 59, 39, 24, 19, 14, 11,
    9, 7, 6, 5, 4, 3, 2, 1,
];

const PADDED: [(u64, u64); 14] = [
    (1, 5),
    (2, 8),
    (3, 20),
    (4, 25),
    (5, 15),
    (6, 5),
    (7, 2),
    (8, 1),
    (9, 1),
    (10, 2),
    (11, 3),
    (12, 4),
    (13, 3),
    (14, 1),
];

fn write_hist(dir: &Path, name: &str, bins: impl IntoIterator<Item = (u64, u64)>) -> PathBuf {
    let path = dir.join(name);
    let text: String = bins
        .into_iter()
        .map(|(depth, frequency)| format!("{}\t{}\n", depth, frequency))
        .collect();
    fs::write(&path, text).unwrap();
    path
}

fn typical_bins() -> impl Iterator<Item = (u64, u64)> {
    TYPICAL.into_iter().enumerate().map(|(i, f)| (i as u64 + 1, f))
}

fn config(args: &[&str]) -> Config {
    let mut argv = vec!["grin"];
    argv.extend_from_slice(args);
    Config::from_args(argv).unwrap()
}

fn run_to_string(config: &Config) -> (Result<usize, GriError>, String) {
    let mut out = Vec::new();
    let result = run(config, &mut out).map(|reports| reports.len());
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn verbose_auto_estimation() {
    let dir = TempDir::new().unwrap();
    let hist = write_hist(dir.path(), "typical.hist", typical_bins());
    let hist = hist.to_str().unwrap();

    let (result, output) = run_to_string(&config(&["-v", "-f", hist]));
    assert_eq!(result.unwrap(), 1);

    insta::assert_snapshot!(output.replace(hist, "[hist]").trim_end(), @r"
    Started processing [hist]
    Estimating start of repetitive k-mers
    First minimum at position 5, first peak at position 12
    Start of repetitive k-mers 20
    Total number of k-mers 16372
    Number of repetitive k-mers 1851
    GRI = 0.1130588810163694
    Finished processing [hist]
    ");
}

#[test]
fn verbose_manual_cutoff() {
    let dir = TempDir::new().unwrap();
    let hist = write_hist(dir.path(), "padded.hist", PADDED);
    let hist = hist.to_str().unwrap();

    let (result, output) = run_to_string(&config(&["-v", "-c", "4", "-f", hist]));
    assert_eq!(result.unwrap(), 1);

    insta::assert_snapshot!(output.replace(hist, "[hist]").trim_end(), @r"
    Started processing [hist]
    User specified start of repetitive k-mers = 4
    Start of repetitive k-mers 4
    Total number of k-mers 471
    Number of repetitive k-mers 390
    GRI = 0.8280254777070064
    Finished processing [hist]
    ");
}

#[test]
fn mixed_cutoffs_in_file_order() {
    let dir = TempDir::new().unwrap();
    let padded = write_hist(dir.path(), "padded.hist", PADDED);
    let typical = write_hist(dir.path(), "typical.hist", typical_bins());

    let (result, output) = run_to_string(&config(&[
        "-c",
        "4",
        "0",
        "-f",
        padded.to_str().unwrap(),
        typical.to_str().unwrap(),
    ]));

    assert_eq!(result.unwrap(), 2);
    assert_eq!(output, "GRI = 0.8280254777070064\nGRI = 0.1130588810163694\n");
}

#[test]
fn first_failure_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let good = write_hist(dir.path(), "good.hist", PADDED);
    let bad = dir.path().join("bad.hist");
    fs::write(&bad, "1 5\n2 eight\n").unwrap();

    let (result, output) = run_to_string(&config(&[
        "-c",
        "4",
        "4",
        "4",
        "-f",
        good.to_str().unwrap(),
        bad.to_str().unwrap(),
        good.to_str().unwrap(),
    ]));

    assert!(matches!(result, Err(GriError::Parse { line: 2, .. })));
    assert_eq!(output, "GRI = 0.8280254777070064\n");
}

#[test]
fn keep_going_reports_failures_at_the_end() {
    let dir = TempDir::new().unwrap();
    let good = write_hist(dir.path(), "good.hist", PADDED);
    let empty = dir.path().join("empty.hist");
    fs::write(&empty, "").unwrap();
    let json = dir.path().join("report.json");

    let (result, output) = run_to_string(&config(&[
        "--keep-going",
        "--json",
        json.to_str().unwrap(),
        "-c",
        "4",
        "4",
        "4",
        "-f",
        good.to_str().unwrap(),
        empty.to_str().unwrap(),
        good.to_str().unwrap(),
    ]));

    assert!(matches!(result, Err(GriError::Failed { failed: 1, total: 3 })));
    assert_eq!(output, "GRI = 0.8280254777070064\n".repeat(2));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let reports = written.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["file"], good.to_str().unwrap());
    assert_eq!(reports[0]["report"]["repetitive_kmers"], 390);
    assert_eq!(reports[0]["report"]["cutoff"]["kind"], "manual");
}

#[test]
fn empty_histogram_errors() {
    let dir = TempDir::new().unwrap();
    let empty = write_hist(dir.path(), "empty.hist", std::iter::empty());
    let empty = empty.to_str().unwrap();

    let (result, _) = run_to_string(&config(&["-c", "4", "-f", empty]));
    assert!(matches!(result, Err(GriError::DivisionByZero)));

    let (result, _) = run_to_string(&config(&["-f", empty]));
    assert!(matches!(result, Err(GriError::EmptyExtrema)));
}

#[test]
fn json_report_for_estimated_cutoff() {
    let dir = TempDir::new().unwrap();
    let typical = write_hist(dir.path(), "typical.hist", typical_bins());
    let json = dir.path().join("report.json");

    let (result, _) = run_to_string(&config(&[
        "--json",
        json.to_str().unwrap(),
        "-f",
        typical.to_str().unwrap(),
    ]));
    assert_eq!(result.unwrap(), 1);

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let cutoff = &written[0]["report"]["cutoff"];
    assert_eq!(cutoff["kind"], "estimated");
    assert_eq!(cutoff["first_minimum"], 5);
    assert_eq!(cutoff["first_peak"], 12);
    assert_eq!(cutoff["position"], 19);
    assert_eq!(written[0]["report"]["start"], 20);
}

#[test]
fn mismatched_cutoffs_exit_before_opening_files() {
    let dir = TempDir::new().unwrap();
    let missing: Vec<String> = ["a.hist", "b.hist", "c.hist"]
        .iter()
        .map(|name| dir.path().join(name).to_str().unwrap().to_string())
        .collect();

    let mut argv = vec!["grin", "-c", "4", "5", "-f"];
    argv.extend(missing.iter().map(String::as_str));

    let err = Config::from_args(argv.clone()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GriError>(),
        Some(GriError::Usage { files: 3, cutoffs: 2 })
    ));

    let output = Command::new(env!("CARGO_BIN_EXE_grin"))
        .args(&argv[1..])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("need the same number of manual cutoffs as files"));
}

#[test]
fn binary_prints_gri_and_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let padded = write_hist(dir.path(), "padded.hist", PADDED);

    let output = Command::new(env!("CARGO_BIN_EXE_grin"))
        .args(["-c", "4", "-f", padded.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "GRI = 0.8280254777070064\n");

    let output = Command::new(env!("CARGO_BIN_EXE_grin"))
        .args(["-f", dir.path().join("missing.hist").to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
