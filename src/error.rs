//! Error type for the planner.

use thiserror::Error;

/// Failures surfaced to callers.
///
/// Missing data (stops without coordinates, too few stops for the requested
/// route count) is never an error; only contract violations and HTTP client
/// setup are.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
