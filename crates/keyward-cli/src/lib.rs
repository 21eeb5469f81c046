//! Batch rating CLI for Keyward
//!
//! Loads wallet feature files, rates every attribute per variant, and prints
//! text or JSON reports. The binary in `main.rs` is a thin wrapper over this
//! library.

#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod report;
pub mod wallet;

pub use config::{KeywardConfig, OutputFormat};
pub use wallet::{load_wallet, WalletFile};
