//! # Keyward Core - Guardian and Policy Model
//!
//! Data model shared by every Keyward crate:
//!
//! - [`Entity`]: an organization or service that may control guardians
//! - [`Guardian`]: one party or factor holding partial recovery authority
//! - [`GuardianPolicy`]: how guardians combine into a recovery mechanism
//! - [`features`]: the wallet features the security attributes read
//! - [`KeywardError`]: the single error type of the analyzer
//!
//! ## What Does NOT Belong Here
//!
//! - Scenario generation and evaluation (belong in keyward-recovery)
//! - Ratings and attribute reduction (belong in keyward-attributes)
//! - File loading, configuration, rendering (belong in keyward-cli)
//!
//! Everything in this crate is a plain value: no I/O, no shared state.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod content;
pub mod entity;
pub mod errors;
pub mod features;
pub mod guardian;
pub mod policy;

pub use content::{Markdown, Sentence, WALLET_NAME_PLACEHOLDER};
pub use entity::{entities_include, Entity, EntityId};
pub use errors::{KeywardError, Result};
pub use features::{
    AccountRecovery, GuardianRecovery, KeyGenerationLocation, KeysHandling,
    MultiPartyKeyReconstruction, ResolvedFeatures, SecurityFeatures, Support,
};
pub use guardian::{
    find_duplicate_guardian, guardians_include, guardians_with_entities, guardians_with_entity,
    Guardian, GuardianId, GuardianKind,
};
pub use policy::{
    GuardianPolicy, GuardianPolicyKind, KOfNTimelockPolicy, SecretReconstitution,
    SecretSplitPolicy,
};
