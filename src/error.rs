use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the `pagerank` binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("graph has no pages")]
    EmptyGraph,

    #[error("damping factor must lie in [0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    #[error("convergence threshold must be a positive finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("iteration bound must be at least 1, got {0}")]
    InvalidIterationBound(usize),

    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("page {page} links to {target}, which is not in the graph")]
    DanglingLink { page: String, target: String },

    #[error("page {0} links to itself")]
    SelfLink(String),

    #[error("no convergence within {updates} updates at threshold {threshold}")]
    NotConverged { updates: usize, threshold: f64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk corpus directory: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDamping(_)
            | Self::InvalidSampleCount(_)
            | Self::InvalidThreshold(_)
            | Self::InvalidIterationBound(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidDamping(damping))
    }
}
