//! Prime-list file loading.
//!
//! The prime lists are plain text, one decimal integer per line, strictly
//! increasing from 2. They are bulk-loaded once per run; every failure mode
//! is a fatal condition for the run, so the error type distinguishes them
//! for the caller's report.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from loading an input file (prime list or residue table).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {path} at line {line}: {text:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("invalid residue table {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path} holds {have} entries but the run requires {need}")]
    TooShort {
        path: PathBuf,
        have: usize,
        need: usize,
    },
}

/// Load at least `required` primes from a newline-delimited file.
///
/// Reads exactly `required` lines (the caller includes its lookahead buffer
/// in the count) and stops early, so a 100M-line file costs only what the
/// run needs. A file with fewer lines than `required` is a fatal
/// precondition failure, not a partial run.
pub fn load_primes(path: &Path, required: usize) -> Result<Vec<u64>, LoadError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let reader = BufReader::new(file);
    let mut primes = Vec::with_capacity(required);

    for (i, line) in reader.lines().enumerate() {
        if primes.len() >= required {
            break;
        }
        let line = line.map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value: u64 = text.parse().map_err(|_| LoadError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            text: text.to_string(),
        })?;
        primes.push(value);
    }

    if primes.len() < required {
        return Err(LoadError::TooShort {
            path: path.to_path_buf(),
            have: primes.len(),
            need: required,
        });
    }

    Ok(primes)
}
