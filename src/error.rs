use std::io;

custom_error::custom_error! { pub GriError
    Usage{files: usize, cutoffs: usize} = "need the same number of manual cutoffs as files (got {cutoffs} cutoffs for {files} files)",
    Open{path: String, source: io::Error} = "could not read histogram file {path}",
    Parse{line: usize, content: String} = "line {line}: expected two non-negative integers `depth frequency`, found {content:?}",
    EmptyExtrema = "no local minima in the histogram, cannot estimate the start of repetitive k-mers",
    NoQualifyingPeak{first_minimum: usize} = "no local maximum after position {first_minimum} and above position 10, cannot estimate the start of repetitive k-mers",
    DivisionByZero = "histogram holds no k-mer occurrences, GRI is undefined",
    Io{source: io::Error} = "i/o error",
    Json{source: serde_json::Error} = "could not write JSON report",
    Failed{failed: usize, total: usize} = "{failed} of {total} histogram files could not be processed",
}
