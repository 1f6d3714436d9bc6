//! Error types shared by the solver, the transports, and the CLI.

use crate::transport::Tag;
use thiserror::Error;

/// Failure of a point-to-point or collective call.
/// All of these are fatal for the rank that observes them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer endpoint is gone, usually because that rank already failed.
    #[error("link to rank {peer} is disconnected")]
    Disconnected { peer: usize },

    /// The next message on the channel does not belong to this protocol step.
    #[error("rank {peer} sent {found:?} while {expected:?} was expected")]
    UnexpectedTag {
        peer: usize,
        expected: Tag,
        found: Tag,
    },

    #[error("rank {peer} sent {found} values, {expected} expected")]
    LengthMismatch {
        peer: usize,
        expected: usize,
        found: usize,
    },

    #[error("rank {rank} does not exist in a ring of {size}")]
    InvalidRank { rank: usize, size: usize },
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("decomposition failed: {0}")]
    Decomposition(String),

    #[error("transport failure on rank {rank}: {source}")]
    Transport {
        rank: usize,
        #[source]
        source: TransportError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("rank {0} panicked")]
    RankPanicked(usize),
}

impl SolverError {
    pub fn transport(rank: usize) -> impl FnOnce(TransportError) -> Self {
        move |source| SolverError::Transport { rank, source }
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;
