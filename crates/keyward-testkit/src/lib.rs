//! Keyward Testing Infrastructure
//!
//! Common fixtures for the analyzer test suites: the example entities used
//! throughout the rating documentation, canonical guardian policies, a
//! policy builder, and proptest strategies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! keyward-testkit = { path = "../keyward-testkit" }
//! ```
//!
//! ```rust
//! use keyward_testkit::*;
//!
//! let policy = SecretSplitPolicyBuilder::new()
//!     .optional(Guardian::user_external_account(example_cex(), ""))
//!     .optional(Guardian::user_external_account(example_security_auditor(), ""))
//!     .threshold(2, 1)
//!     .build();
//! assert!(policy.validate().is_ok());
//! ```

pub mod builders;
pub mod fixtures;
pub mod strategies;

pub use builders::*;
pub use fixtures::*;

// Re-export commonly used model types for convenience
pub use keyward_core::{
    AccountRecovery, Entity, Guardian, GuardianPolicy, KeyGenerationLocation, KeysHandling,
    MultiPartyKeyReconstruction, ResolvedFeatures, SecretReconstitution, SecretSplitPolicy,
};
