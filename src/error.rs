//! Error type shared by every stage of a solve.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("distance from location {from} to location {to} failed: {reason}")]
    DistanceComputation {
        from: usize,
        to: usize,
        reason: String,
    },
    #[error("distance provider failed: {0}")]
    DistanceProvider(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{locations} locations exceed the exact solver limit of {limit}")]
    OversizeInput { locations: usize, limit: usize },
    #[error("degenerate topology: {0}")]
    DegenerateTopology(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateTopology(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::DistanceProvider(message.into())
    }
}
