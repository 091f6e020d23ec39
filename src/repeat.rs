//! Locating where the repetitive k-mers start on a k-mer histogram.
//!
//! The first local maximum past position 10 is taken to be the true copy-number
//! peak. The repetitive region is assumed to begin as far past that peak as the
//! first trough lies before it.
use crate::error::GriError;
use crate::histogram::HistogramTable;
use ndarray::ArrayView1;
use serde::Serialize;

/// Neighbours compared on each side of a candidate extremum
pub const EXTREMA_ORDER: usize = 1;

/// The first peak has to sit strictly above this position
pub const MIN_PEAK_POSITION: usize = 10;

/// Positions (not depths) found on the depth-sorted frequency curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepeatStart {
    pub first_minimum: usize,
    pub first_peak: usize,
    pub position: usize,
}

/// Indices `i` where `cmp(data[i], data[j])` holds for every `j` within `order`
/// of `i`. Neighbours outside the data are clipped to the nearest end, so the
/// boundary elements are also compared with themselves.
pub fn relative_extrema<T, F>(data: ArrayView1<T>, order: usize, cmp: F) -> Vec<usize>
where
    T: Copy,
    F: Fn(T, T) -> bool,
{
    let len = data.len();
    if len == 0 {
        return Vec::new();
    }

    (0..len)
        .filter(|&i| {
            (1..=order).all(|shift| {
                let plus = (i + shift).min(len - 1);
                let minus = i.saturating_sub(shift);
                cmp(data[i], data[plus]) && cmp(data[i], data[minus])
            })
        })
        .collect()
}

pub fn local_minima(data: ArrayView1<u64>) -> Vec<usize> {
    relative_extrema(data, EXTREMA_ORDER, |a, b| a <= b)
}

pub fn local_maxima(data: ArrayView1<u64>) -> Vec<usize> {
    relative_extrema(data, EXTREMA_ORDER, |a, b| a >= b)
}

/// Estimate the position at which the repetitive k-mers start.
///
/// # Errors
/// * [`GriError::EmptyExtrema`] when the curve has no local minimum (empty histogram)
/// * [`GriError::NoQualifyingPeak`] when no maximum lies after the first minimum and past position 10
pub fn estimate_repeat_start(table: &HistogramTable) -> Result<RepeatStart, GriError> {
    let frequencies = table.frequencies();

    let minima = local_minima(frequencies.view());
    let maxima = local_maxima(frequencies.view());
    log::debug!("local minima at {:?}", minima);
    log::debug!("local maxima at {:?}", maxima);

    let first_minimum = minima.iter().copied().min().ok_or(GriError::EmptyExtrema)?;

    // maxima come out of relative_extrema in ascending order
    let first_peak = maxima
        .iter()
        .copied()
        .find(|&peak| peak > first_minimum && peak > MIN_PEAK_POSITION)
        .ok_or(GriError::NoQualifyingPeak { first_minimum })?;

    Ok(RepeatStart {
        first_minimum,
        first_peak,
        position: 2 * first_peak - first_minimum,
    })
}
