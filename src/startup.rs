use crate::config::{Config, Job};
use crate::error::GriError;
use crate::gri::{analyze, Cutoff, CutoffSource, GriReport};
use crate::histogram::HistogramTable;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// The report of one histogram file, as written to the JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub report: GriReport,
}

/// Process every histogram file in order, printing the GRI of each to `out`.
///
/// The first failing file stops the run unless `keep_going` is set, in which
/// case failures are logged and [`GriError::Failed`] is returned at the end.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Vec<FileReport>, GriError> {
    let mut reports = Vec::with_capacity(config.jobs.len());
    let mut failed = 0;

    for (idx, job) in config.jobs.iter().enumerate() {
        log::info!(
            "Processing histogram {}/{}: {}",
            idx + 1,
            config.jobs.len(),
            job.path.display()
        );

        match process_file(job, config.verbose, out) {
            Ok(report) => reports.push(report),
            Err(e) if config.keep_going => {
                log::error!("{}: {}", job.path.display(), e);
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(json_path) = &config.json {
        let writer = BufWriter::new(File::create(json_path)?);
        serde_json::to_writer_pretty(writer, &reports)?;
        log::info!("GRI reports saved to: {}", json_path.display());
    }

    if failed > 0 {
        return Err(GriError::Failed {
            failed,
            total: config.jobs.len(),
        });
    }

    Ok(reports)
}

/// Parse one histogram, resolve its cutoff and print the GRI.
/// The file is closed before this returns, whatever the outcome.
fn process_file<W: Write>(job: &Job, verbose: bool, out: &mut W) -> Result<FileReport, GriError> {
    let file = job.path.display().to_string();

    if verbose {
        writeln!(out, "Started processing {}", file)?;
    }

    let table = HistogramTable::from_path(&job.path)?;

    if verbose {
        match job.cutoff {
            Cutoff::Auto => writeln!(out, "Estimating start of repetitive k-mers")?,
            Cutoff::Manual(start) => {
                writeln!(out, "User specified start of repetitive k-mers = {}", start)?
            }
        }
    }

    let report = analyze(&table, job.cutoff)?;

    if verbose {
        if let CutoffSource::Estimated(estimate) = report.cutoff {
            writeln!(
                out,
                "First minimum at position {}, first peak at position {}",
                estimate.first_minimum, estimate.first_peak
            )?;
        }
        writeln!(out, "Start of repetitive k-mers {}", report.start)?;
        writeln!(out, "Total number of k-mers {}", report.total_kmers)?;
        writeln!(out, "Number of repetitive k-mers {}", report.repetitive_kmers)?;
    }

    writeln!(out, "GRI = {}", report.gri)?;

    if verbose {
        writeln!(out, "Finished processing {}", file)?;
    }

    Ok(FileReport { file, report })
}
