//! Wallet feature files.
//!
//! A wallet file names the wallet and maps each variant (mobile, browser,
//! ...) to its resolved features. TOML and JSON are accepted, picked by
//! file extension.

use anyhow::{Context, Result};
use keyward_core::ResolvedFeatures;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum WalletFileError {
    #[error("unsupported wallet file extension for {path} (expected .toml or .json)")]
    UnsupportedExtension { path: String },
    #[error("wallet {wallet} has no variants")]
    NoVariants { wallet: String },
    #[error("wallet {wallet} has no variant named {variant}")]
    UnknownVariant { wallet: String, variant: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFile {
    pub name: String,
    pub variants: BTreeMap<String, ResolvedFeatures>,
}

impl WalletFile {
    /// Look up one variant, or the first one when `name` is `None`.
    pub fn variant(
        &self,
        name: Option<&str>,
    ) -> Result<(&str, &ResolvedFeatures), WalletFileError> {
        match name {
            Some(name) => self
                .variants
                .get_key_value(name)
                .map(|(key, features)| (key.as_str(), features))
                .ok_or_else(|| WalletFileError::UnknownVariant {
                    wallet: self.name.clone(),
                    variant: name.to_string(),
                }),
            None => self
                .variants
                .iter()
                .next()
                .map(|(key, features)| (key.as_str(), features))
                .ok_or_else(|| WalletFileError::NoVariants {
                    wallet: self.name.clone(),
                }),
        }
    }
}

/// Read and parse a wallet file.
pub fn load_wallet(path: &Path) -> Result<WalletFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read wallet file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    let wallet: WalletFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse wallet file {}", path.display()))?,
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse wallet file {}", path.display()))?,
        _ => {
            return Err(WalletFileError::UnsupportedExtension {
                path: path.display().to_string(),
            }
            .into())
        }
    };

    if wallet.variants.is_empty() {
        return Err(WalletFileError::NoVariants {
            wallet: wallet.name,
        }
        .into());
    }

    tracing::debug!(
        wallet = %wallet.name,
        variants = wallet.variants.len(),
        path = %path.display(),
        "Loaded wallet file"
    );
    Ok(wallet)
}
