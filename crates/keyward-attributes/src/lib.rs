//! # Keyward Attributes - Security Ratings
//!
//! Turns guardian scenario outcomes and key handling facts into per-wallet
//! ratings for two security attributes:
//!
//! - **Account recovery**: can the user recover their account in every
//!   likely catastrophic scenario?
//! - **Account unruggability**: can anyone other than the user take the
//!   account over?
//!
//! Every verdict carries a stable id for localization lookup, and every
//! explanation keeps the `{{WALLET_NAME}}` placeholder for the presentation
//! layer to fill in.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

pub mod account_recovery;
pub mod account_unruggability;
pub mod attribute;
pub mod rating;

pub use account_recovery::{
    account_recovery_verdict, evaluate_account_recovery, AccountRecoveryAttribute,
};
pub use account_unruggability::{
    account_unruggability_verdict, guardian_policy_unruggability_verdict,
    AccountUnruggabilityAttribute,
};
pub use attribute::{unrated, Attribute};
pub use rating::{
    pick_worst_rating, AttributeValue, Details, DetailsComponent, Evaluation, Rating,
};

/// Every attribute the analyzer rates, in display order.
pub fn all_attributes() -> Vec<Box<dyn Attribute>> {
    vec![
        Box::new(AccountRecoveryAttribute),
        Box::new(AccountUnruggabilityAttribute),
    ]
}
