use std::path::PathBuf;

use thiserror::Error;

/// Which side of a matchup a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no plus-minus rows for team {team:?}")]
    NoDataForTeam { team: String },

    #[error("home and away are both {team:?}; select two different teams")]
    IdenticalTeamsRequested { team: String },

    #[error("{side} average plus-minus must be finite, got {value}")]
    InvalidAverageInput { side: Side, value: f64 },

    #[error("no files ending in {suffix:?} under {}", dir.display())]
    NoDataFiles { dir: PathBuf, suffix: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid model config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        match err {
            Error::Io { .. } => pyo3::exceptions::PyIOError::new_err(err.to_string()),
            _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
        }
    }
}
