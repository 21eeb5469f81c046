//! End-to-end tests of wallet file loading, rating and rendering.

#![allow(clippy::unwrap_used)]

use keyward_attributes::Rating;
use keyward_cli::commands::rate::{rate_wallet, reports_failed};
use keyward_cli::commands::scenarios::scenario_report;
use keyward_cli::report::{render_scenario_report, render_wallet_reports, AttributeOutcome};
use keyward_cli::{load_wallet, KeywardConfig, OutputFormat, WalletFile};
use keyward_testkit::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

const TWO_OF_THREE_TOML: &str = r#"
name = "Example Wallet"

[variants.mobile.security.keys_handling]
key_generation = "FULLY_ON_USER_DEVICE"
multiparty_key_reconstruction = "NON_MULTIPARTY"

[variants.mobile.security.account_recovery.guardian_recovery]
support = "supported"

[variants.mobile.security.account_recovery.guardian_recovery.minimum_guardian_policy]
type = "SECRET_SPLIT_ACROSS_GUARDIANS"
description = "Any two of three services"
optional_min_configurable = 3
optional_min_needed_for_recovery = 2
secret_reconstitution = "CLIENT_SIDE"

[[variants.mobile.security.account_recovery.guardian_recovery.minimum_guardian_policy.optional_guardians]]
type = "WALLET_PROVIDER"
entity = { id = "dev", name = "Wallet Dev" }
description = "Wallet developer storage cloud"

[[variants.mobile.security.account_recovery.guardian_recovery.minimum_guardian_policy.optional_guardians]]
type = "USER_EXTERNAL_ACCOUNT"
entity = { id = "cex", name = "Exchange" }

[[variants.mobile.security.account_recovery.guardian_recovery.minimum_guardian_policy.optional_guardians]]
type = "USER_EXTERNAL_ACCOUNT"
entity = { id = "auditor", name = "Auditor" }
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_json(dir: &TempDir, name: &str, wallet: &WalletFile) -> PathBuf {
    write(dir, name, &serde_json::to_string_pretty(wallet).unwrap())
}

fn wallet(name: &str, variants: Vec<(&str, ResolvedFeatures)>) -> WalletFile {
    WalletFile {
        name: name.to_string(),
        variants: variants
            .into_iter()
            .map(|(variant, features)| (variant.to_string(), features))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn rating_of(outcome: &AttributeOutcome) -> Option<Rating> {
    match outcome {
        AttributeOutcome::Rated { aggregate, .. } => Some(aggregate.rating()),
        AttributeOutcome::Error { .. } => None,
    }
}

#[test]
fn toml_wallet_rates_pass_on_both_attributes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "example.toml", TWO_OF_THREE_TOML);

    let wallet = load_wallet(&path).unwrap();
    assert_eq!(wallet.name, "Example Wallet");

    let report = rate_wallet(&wallet);
    assert_eq!(report.attributes.len(), 2);
    for attribute in &report.attributes {
        assert_eq!(rating_of(&attribute.outcome), Some(Rating::Pass));
    }
    assert!(!reports_failed(&[report], &KeywardConfig::default()));
}

#[test]
fn json_wallet_aggregates_worst_variant() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "variants.json",
        &wallet(
            "Split Wallet",
            vec![
                (
                    "browser",
                    features(
                        keys_on_device(),
                        AccountRecovery::with_policy(two_of_three_client_side()),
                    ),
                ),
                ("mobile", features(keys_off_device(), AccountRecovery::not_supported())),
            ],
        ),
    );

    let report = rate_wallet(&load_wallet(&path).unwrap());
    for attribute in &report.attributes {
        assert_eq!(rating_of(&attribute.outcome), Some(Rating::Fail));
        match &attribute.outcome {
            AttributeOutcome::Rated { variants, .. } => assert_eq!(variants.len(), 2),
            AttributeOutcome::Error { .. } => unreachable!(),
        }
    }
}

#[test]
fn analysis_errors_are_reported_not_rated() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "timelock.json",
        &wallet(
            "Timelock Wallet",
            vec![(
                "mobile",
                features(keys_on_device(), AccountRecovery::with_policy(timelock_policy())),
            )],
        ),
    );

    let report = rate_wallet(&load_wallet(&path).unwrap());
    assert!(report.has_errors());
    assert!(reports_failed(&[report.clone()], &KeywardConfig::default()));

    let text = render_wallet_reports(&[report], &KeywardConfig::default()).unwrap();
    assert!(text.contains("Account recovery: error"));
    assert!(text.contains("not implemented yet"));
}

#[test]
fn unrated_fails_only_when_configured() {
    let report = rate_wallet(&wallet("Unknown Wallet", vec![("mobile", unknown_features())]));
    assert!(report.has_unrated());

    let lenient = KeywardConfig::default();
    let strict = KeywardConfig {
        fail_on_unrated: true,
        ..KeywardConfig::default()
    };
    assert!(!reports_failed(&[report.clone()], &lenient));
    assert!(reports_failed(&[report], &strict));
}

#[test]
fn text_report_substitutes_wallet_name() {
    let report = rate_wallet(&wallet(
        "Acme Wallet",
        vec![("mobile", features(keys_on_device(), AccountRecovery::not_supported()))],
    ));
    let text = render_wallet_reports(&[report], &KeywardConfig::default()).unwrap();
    assert!(text.starts_with("Acme Wallet\n"));
    assert!(text.contains("Account recovery: FAIL (no_guardian_recovery)"));
    assert!(text.contains("Acme Wallet does not implement guardian-based account recovery."));
    assert!(!text.contains("{{WALLET_NAME}}"));
}

#[test]
fn json_report_keeps_placeholder_and_status() {
    let report = rate_wallet(&wallet(
        "Acme Wallet",
        vec![("mobile", features(keys_on_device(), AccountRecovery::not_supported()))],
    ));
    let config = KeywardConfig {
        output: OutputFormat::Json,
        ..KeywardConfig::default()
    };
    let json: serde_json::Value =
        serde_json::from_str(&render_wallet_reports(&[report], &config).unwrap()).unwrap();
    let recovery = &json[0]["attributes"][0];
    assert_eq!(recovery["attribute"], "accountRecovery");
    assert_eq!(recovery["status"], "rated");
    assert_eq!(recovery["aggregate"]["value"]["rating"], "FAIL");
}

#[test]
fn scenarios_are_listed_for_a_variant() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "example.toml", TWO_OF_THREE_TOML);
    let wallet = load_wallet(&path).unwrap();

    let report = scenario_report(&wallet, Some("mobile")).unwrap();
    // Three single losses and three entities.
    assert_eq!(report.outcomes.len(), 6);
    assert!(report.outcomes.iter().all(|outcome| outcome.is_fully_safe()));

    let text = render_scenario_report(&report, &KeywardConfig::default()).unwrap();
    assert!(text.contains("entity_turns_evil:cex"));
    assert!(text.contains("takeover: not possible"));

    assert!(scenario_report(&wallet, Some("desktop")).is_err());
}

#[test]
fn scenarios_require_a_guardian_policy() {
    let wallet = wallet(
        "No Recovery",
        vec![("mobile", features(keys_on_device(), AccountRecovery::not_supported()))],
    );
    let err = scenario_report(&wallet, None).unwrap_err();
    assert!(err.to_string().contains("has no guardian recovery policy"));
}

#[test]
fn rejects_unknown_extensions_and_empty_wallets() {
    let dir = TempDir::new().unwrap();
    let yaml = write(&dir, "wallet.yaml", "name: nope");
    assert!(load_wallet(&yaml).is_err());

    let empty = write(&dir, "empty.json", r#"{"name": "Empty", "variants": {}}"#);
    let err = load_wallet(&empty).unwrap_err();
    assert!(err.to_string().contains("has no variants"));
}

#[test]
fn explicit_config_path_is_loaded_and_must_exist() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "keyward.toml", "output = \"json\"\n");

    let (config, source) = KeywardConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(source, Some(path));

    assert!(KeywardConfig::load(Some(dir.path().join("missing.toml").as_path())).is_err());

    let invalid = write(&dir, "invalid.toml", "log_filter = \"\"\n");
    assert!(KeywardConfig::load(Some(invalid.as_path())).is_err());
}

#[test]
fn text_from_loaded_config_has_no_raw_placeholders() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "keyward.toml",
        "output = \"text\"\nlog_filter = \"warn\"\nwallet_name_placeholder = \"$WALLET\"\n",
    );
    let (config, _) = KeywardConfig::load(Some(path.as_path())).unwrap();

    let report = rate_wallet(&wallet(
        "Acme Wallet",
        vec![
            ("mobile", features(keys_on_device(), AccountRecovery::not_supported())),
            (
                "web",
                features(
                    keys_on_device(),
                    AccountRecovery::with_policy(developer_custodied_backup()),
                ),
            ),
        ],
    ));
    let text = render_wallet_reports(&[report], &config).unwrap();
    assert!(text.contains("Acme Wallet does not implement guardian-based account recovery."));
    assert!(!text.contains("{{"));

    let recovery = AccountRecovery::with_policy(developer_custodied_backup());
    let scenarios = scenario_report(
        &wallet("Acme Wallet", vec![("web", features(keys_on_device(), recovery))]),
        None,
    )
    .unwrap();
    let text = render_scenario_report(&scenarios, &config).unwrap();
    assert!(text.contains("improve: Acme Wallet"));
    assert!(!text.contains("{{"));
}

#[test]
fn gate_failures_print_their_details() {
    let report = rate_wallet(&wallet(
        "Cloud Wallet",
        vec![("web", features(keys_off_device(), AccountRecovery::not_supported()))],
    ));
    let text = render_wallet_reports(&[report], &KeywardConfig::default()).unwrap();
    assert!(text.contains("Account unruggability: FAIL (key_off_device)"));
    assert!(text.contains("    | Key generation with Cloud Wallet occurs off-device."));
}
