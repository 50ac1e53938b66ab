//! Command-line configuration.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PROGRAM: &str = "patient-stats";

/// Wrong number of command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\nUsage: {program} <inputfile>")]
pub struct UsageError {
    pub program: String,
}

/// Input file named on the command line could not be opened.
#[derive(Debug, Error)]
#[error("CANNOT OPEN INPUT FILE: {}", .path.display())]
pub struct OpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Patient records file.
    pub input: PathBuf,
}

impl Config {
    /// Build from a full argument vector, program name first.
    pub fn from_args<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        match (args.next(), args.next()) {
            (Some(input), None) => Ok(Config {
                input: PathBuf::from(input),
            }),
            _ => Err(UsageError { program }),
        }
    }

    /// Open the input file for reading.
    pub fn open_input(&self) -> Result<File, OpenError> {
        File::open(&self.input).map_err(|source| OpenError {
            path: self.input.clone(),
            source,
        })
    }
}
