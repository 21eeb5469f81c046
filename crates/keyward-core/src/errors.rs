//! Unified error type for the Keyward analyzer
//!
//! Every failure the analyzer can report is fatal for the attribute being
//! rated: either the policy data was authored incorrectly, or an internal
//! invariant was broken. Callers report them as errors, never as a passing
//! or failing verdict.

use serde::{Deserialize, Serialize};

/// Unified error type for all analyzer operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum KeywardError {
    /// Policy data is malformed (duplicate guardians, impossible thresholds)
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// What is wrong with the policy
        message: String,
    },

    /// A state proven unreachable was reached
    #[error("Inconsistent analysis state: {message}")]
    Inconsistent {
        /// Description of the violated invariant
        message: String,
    },

    /// Two generated scenarios collapsed to the same identifier
    #[error("Duplicate scenario: {id}")]
    DuplicateScenario {
        /// The colliding scenario identifier
        id: String,
    },

    /// Expansion produced no scenario for a policy that has guardians
    #[error("Got no scenarios for guardian policy: {policy}")]
    NoScenarios {
        /// Description of the offending policy
        policy: String,
    },

    /// The policy kind has no evaluator yet
    #[error("Unsupported: {message}")]
    Unsupported {
        /// What is not supported
        message: String,
    },

    /// A reducer or helper was called with unusable input
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the input problem
        message: String,
    },
}

impl KeywardError {
    /// Create an invalid policy error
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    /// Create an internal consistency error
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }

    /// Create a duplicate scenario error
    pub fn duplicate_scenario(id: impl Into<String>) -> Self {
        Self::DuplicateScenario { id: id.into() }
    }

    /// Create a no-scenarios error
    pub fn no_scenarios(policy: impl Into<String>) -> Self {
        Self::NoScenarios {
            policy: policy.into(),
        }
    }

    /// Create an unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether this error means "cannot currently rate" rather than a bug.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Standard Result type for analyzer operations
pub type Result<T> = std::result::Result<T, KeywardError>;
