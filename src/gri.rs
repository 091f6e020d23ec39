use crate::error::GriError;
use crate::histogram::HistogramTable;
use crate::repeat::{estimate_repeat_start, RepeatStart};
use serde::Serialize;

/// Where the repetitive k-mers of one histogram start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// Depth given by the user
    Manual(u64),
    /// Estimated from the extrema of the histogram
    Auto,
}

impl From<u64> for Cutoff {
    /// `0` on the command line asks for estimation
    fn from(depth: u64) -> Self {
        match depth {
            0 => Cutoff::Auto,
            d => Cutoff::Manual(d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CutoffSource {
    Manual,
    Estimated(RepeatStart),
}

/// Start depth of the repetitive k-mers and how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCutoff {
    pub start: u64,
    pub source: CutoffSource,
}

/// Use a manual cutoff as is, otherwise estimate a position on the curve and
/// turn it into a depth of `table`.
pub fn resolve_cutoff(table: &HistogramTable, cutoff: Cutoff) -> Result<ResolvedCutoff, GriError> {
    match cutoff {
        Cutoff::Manual(start) => Ok(ResolvedCutoff {
            start,
            source: CutoffSource::Manual,
        }),
        Cutoff::Auto => {
            let estimate = estimate_repeat_start(table)?;
            // a non-empty table always maps a position to a depth
            let start = table
                .depth_at_position(estimate.position)
                .ok_or(GriError::EmptyExtrema)?;
            log::debug!(
                "position {} (trough {}, peak {}) is depth {}",
                estimate.position,
                estimate.first_minimum,
                estimate.first_peak,
                start
            );
            Ok(ResolvedCutoff {
                start,
                source: CutoffSource::Estimated(estimate),
            })
        }
    }
}

/// Genome repetitiveness index of one histogram along with the counts behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GriReport {
    pub start: u64,
    pub cutoff: CutoffSource,
    pub total_kmers: u128,
    pub repetitive_kmers: u128,
    pub gri: f64,
}

/// Fraction of all k-mer occurrences coming from k-mers with depth `>= start`.
///
/// # Errors
/// [`GriError::DivisionByZero`] if the histogram holds no occurrences at all.
pub fn calculate_gri(table: &HistogramTable, start: u64) -> Result<(u128, u128, f64), GriError> {
    let total = table.total_occurrences();
    if total == 0 {
        return Err(GriError::DivisionByZero);
    }
    let repetitive = table.occurrences_from(start);

    Ok((total, repetitive, repetitive as f64 / total as f64))
}

/// Resolve the cutoff and compute the GRI for one histogram
pub fn analyze(table: &HistogramTable, cutoff: Cutoff) -> Result<GriReport, GriError> {
    let resolved = resolve_cutoff(table, cutoff)?;
    let (total_kmers, repetitive_kmers, gri) = calculate_gri(table, resolved.start)?;

    Ok(GriReport {
        start: resolved.start,
        cutoff: resolved.source,
        total_kmers,
        repetitive_kmers,
        gri,
    })
}
