//! Results engine error types.
//!
//! Errors are tagged by kind so the calling layer can map them to distinct
//! outcomes (bad source data vs. unavailable collaborators) without string
//! matching.

use thiserror::Error;

/// Errors produced while compiling or serving a student's results.
///
/// `Clone` so that a single failed computation can be handed to every caller
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultsError {
    /// Input data broke the engine's contract (negative units, score out of
    /// range, inconsistent semester metadata).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A collaborator (enrollment source or cache store) failed.
    #[error("computation failed: {0}")]
    ComputationFailed(String),
}

/// Coarse classification of a [`ResultsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Contract,
    Computation,
}

impl ResultsError {
    pub fn contract(message: impl Into<String>) -> Self {
        ResultsError::ContractViolation(message.into())
    }

    /// Wrap a collaborator failure, keeping the full context chain.
    pub fn computation(error: &anyhow::Error) -> Self {
        ResultsError::ComputationFailed(format!("{error:#}"))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResultsError::ContractViolation(_) => ErrorKind::Contract,
            ResultsError::ComputationFailed(_) => ErrorKind::Computation,
        }
    }

    /// Returns `true` if the failure was caused by the data handed to the
    /// engine rather than by infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ResultsError::ContractViolation(_))
    }
}
