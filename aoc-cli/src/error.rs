//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Failure to read a puzzle input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("no input file at {}", .0.display())]
    Missing(PathBuf),

    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input unavailable for a day; every requested part of it fails
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Solver creation or execution failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Result receiver hung up
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side that is
    /// already a `Multiple` and keeping `first`'s errors ahead of `second`'s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for err in [first, second] {
            match err.inner() {
                ExecutorError::Multiple(nested) => errors.extend(nested.iter().cloned()),
                _ => errors.push(err),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Number of leaf errors
    pub fn count(&self) -> usize {
        match self.inner() {
            ExecutorError::Multiple(nested) => nested.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_error(n: usize) -> ArcExecutorError {
        ExecutorError::ThreadPool(n.to_string()).into()
    }

    fn messages(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(nested) => nested.iter().flat_map(messages).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_flattens_and_keeps_order() {
        let left = ArcExecutorError::combine(pool_error(1), pool_error(2));
        let right = ArcExecutorError::combine(pool_error(3), pool_error(4));
        let all = ArcExecutorError::combine(left, right);
        assert_eq!(all.count(), 4);
        assert_eq!(
            messages(&all),
            (1..=4)
                .map(|n| format!("Thread pool creation failed: {n}"))
                .collect::<Vec<_>>()
        );
        assert_eq!(all.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn test_combine_opt() {
        let single = ArcExecutorError::combine_opt(None, pool_error(1));
        assert_eq!(single.count(), 1);
        let pair = ArcExecutorError::combine_opt(Some(single), ExecutorError::ChannelSend.into());
        assert_eq!(pair.count(), 2);
    }

    #[test]
    fn test_input_error_message() {
        let err = ExecutorError::Input {
            year: 2020,
            day: 4,
            source: InputError::Missing(PathBuf::from("inputs/2020_day04.txt")),
        };
        assert_eq!(
            err.to_string(),
            "Input unavailable for 2020/04: no input file at inputs/2020_day04.txt"
        );
    }
}
