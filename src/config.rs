use crate::error::GriError;
use crate::gri::Cutoff;
use clap::Parser;
use std::path::PathBuf;

/// Estimate the genome repetitiveness index (GRI) from k-mer histograms
#[derive(Parser, Debug)]
#[command(name = "grin")]
#[command(about = "Estimate the genome repetitiveness index from k-mer histograms", long_about = None)]
pub struct Args {
    /// Print intermediate values and per-file progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Manual start of the repetitive k-mers, one per file (0 estimates it for that file)
    #[arg(short, long, num_args = 1..)]
    pub cutoffs: Option<Vec<u64>>,

    /// K-mer histogram files with `depth frequency` lines
    #[arg(short, long = "file", num_args = 1.., required = true)]
    pub files: Vec<PathBuf>,

    /// Also write every per-file report to this JSON file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Carry on with the remaining files when one fails
    #[arg(long)]
    pub keep_going: bool,
}

/// One histogram file and the cutoff to apply to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub path: PathBuf,
    pub cutoff: Cutoff,
}

/// Validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub jobs: Vec<Job>,
    pub json: Option<PathBuf>,
    pub keep_going: bool,
}

impl Config {
    /// Pair files with their cutoffs; without cutoffs every file is estimated
    pub fn new(args: Args) -> Result<Config, GriError> {
        let cutoffs = match args.cutoffs {
            Some(cutoffs) if cutoffs.len() != args.files.len() => {
                return Err(GriError::Usage {
                    files: args.files.len(),
                    cutoffs: cutoffs.len(),
                })
            }
            Some(cutoffs) => cutoffs.into_iter().map(Cutoff::from).collect(),
            None => vec![Cutoff::Auto; args.files.len()],
        };

        let jobs = args
            .files
            .into_iter()
            .zip(cutoffs)
            .map(|(path, cutoff)| Job { path, cutoff })
            .collect();

        Ok(Config {
            verbose: args.verbose,
            jobs,
            json: args.json,
            keep_going: args.keep_going,
        })
    }

    /// Parse and validate an argument list, program name first
    pub fn from_args<I, T>(args: I) -> Result<Config, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;
        Ok(Config::new(args)?)
    }
}
