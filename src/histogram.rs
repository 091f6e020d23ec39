use crate::error::GriError;
use itertools::Itertools;
use ndarray::Array1;
use std::{
    collections::{btree_map, BTreeMap},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// A k-mer histogram: depth (occurrences of a k-mer) -> number of distinct k-mers seen at that depth.
///
/// Backed by a `BTreeMap`, so every traversal is in ascending depth order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistogramTable {
    bins: BTreeMap<u64, u64>,
}

impl HistogramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path`, parse it and close it again on every exit path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GriError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GriError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            GriError::Io { source } => GriError::Open {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parse `depth frequency` lines. A depth seen twice keeps its last frequency.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, GriError> {
        let mut table = Self::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let (depth, frequency) = parse_line(&line).ok_or_else(|| GriError::Parse {
                line: idx + 1,
                content: line.clone(),
            })?;
            table.insert(depth, frequency);
        }

        log::debug!("parsed histogram with {} bins", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, depth: u64, frequency: u64) -> Option<u64> {
        self.bins.insert(depth, frequency)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u64, u64> {
        self.bins.iter()
    }

    pub fn depths(&self) -> Vec<u64> {
        self.bins.keys().copied().collect()
    }

    /// Frequencies in ascending depth order, the curve the extrema are searched on
    pub fn frequencies(&self) -> Array1<u64> {
        self.bins.values().copied().collect()
    }

    /// Map a position in the depth-sorted sequence back to a depth.
    ///
    /// Positions past the last bin advance one depth per position beyond the
    /// largest depth, so a dense table starting at `d0` maps `q` to `d0 + q`.
    /// Returns `None` only for an empty table.
    pub fn depth_at_position(&self, position: usize) -> Option<u64> {
        if let Some(depth) = self.bins.keys().nth(position) {
            return Some(*depth);
        }
        let last = *self.bins.keys().next_back()?;
        let beyond = (position - (self.len() - 1)) as u64;
        Some(last.saturating_add(beyond))
    }

    /// Sum of `depth * frequency` over every bin
    pub fn total_occurrences(&self) -> u128 {
        self.occurrences_from(0)
    }

    /// Sum of `depth * frequency` over the bins with `depth >= start`
    pub fn occurrences_from(&self, start: u64) -> u128 {
        self.bins
            .range(start..)
            .map(|(&depth, &frequency)| depth as u128 * frequency as u128)
            .sum()
    }
}

impl FromIterator<(u64, u64)> for HistogramTable {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        Self {
            bins: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HistogramTable {
    type Item = (&'a u64, &'a u64);
    type IntoIter = btree_map::Iter<'a, u64, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Exactly two whitespace separated integers, anything else is rejected
fn parse_line(line: &str) -> Option<(u64, u64)> {
    let (depth, frequency) = line.split_whitespace().collect_tuple()?;
    Some((depth.parse().ok()?, frequency.parse().ok()?))
}
