// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Mutation Engine Error Types
 * Error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use thiserror::Error;
use std::time::Duration;

use crate::fuzzer::mutant::MutantKind;

/// Errors raised by the mutation engine.
///
/// "Nothing to mutate" is never an error: strategies return empty vectors.
/// These variants only describe broken invariants or unusable input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    /// A strategy was invoked on a request that lacks the surface it needs
    #[error("Mutation invariant violated: {reason}")]
    InvariantViolation {
        reason: String,
    },

    /// The captured request could not be turned into a fuzzable request
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        reason: String,
    },

    /// A mutant kind was assembled through the wrong assembly routine
    #[error("{kind} mutants cannot be assembled from a data container")]
    UnsupportedAssembly {
        kind: MutantKind,
    },
}

/// Main scanner error type for the probe consumers
#[derive(Error, Debug)]
pub enum ScannerError {
    /// A run-once plugin was asked to run a second time
    #[error("Plugin {plugin} already executed in this scan")]
    AlreadyExecuted {
        plugin: String,
    },

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Operation timed out after {duration:?}")]
    Timeout {
        duration: Duration,
    },

    /// Mutation engine errors
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// General errors
    #[error("Scanner error: {0}")]
    General(String),
}

impl MutationError {
    pub fn invariant(reason: impl Into<String>) -> Self {
        MutationError::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        MutationError::InvalidRequest {
            reason: reason.into(),
        }
    }
}

impl ScannerError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScannerError::Network(_) | ScannerError::Timeout { .. })
    }
}

/// Convert reqwest errors to our error types
impl From<reqwest::Error> for ScannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScannerError::Timeout {
                duration: Duration::from_secs(30),
            }
        } else if err.is_connect() || err.is_request() {
            ScannerError::Network(err.to_string())
        } else {
            ScannerError::General(err.to_string())
        }
    }
}

/// Result type for mutation engine operations
pub type MutationResult<T> = Result<T, MutationError>;

/// Result type for scanner operations
pub type ScannerResult<T> = Result<T, ScannerError>;
