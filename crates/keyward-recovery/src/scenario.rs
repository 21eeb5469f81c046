//! Scenario shapes and per-scenario outcomes.

use keyward_core::{Entity, Guardian, KeywardError, Result, Sentence};
use serde::Serialize;
use std::fmt;

/// Kind of adversarial or failure condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardianScenarioKind {
    DataLoss,
    EntityTurnsEvil,
}

impl GuardianScenarioKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GuardianScenarioKind::DataLoss => "data_loss",
            GuardianScenarioKind::EntityTurnsEvil => "entity_turns_evil",
        }
    }
}

impl fmt::Display for GuardianScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of guardians that become unavailable at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataLossScenario {
    pub guardians_with_data_loss: Vec<Guardian>,
    pub description: Sentence,
}

/// A set of entities that turn adversarial (or are compromised) together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTurnsEvilScenario {
    pub turns_evil: Vec<Entity>,
    pub description: Sentence,
}

/// A scenario tested against a guardian policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardianScenario {
    DataLoss(DataLossScenario),
    EntityTurnsEvil(EntityTurnsEvilScenario),
}

impl GuardianScenario {
    pub fn kind(&self) -> GuardianScenarioKind {
        match self {
            GuardianScenario::DataLoss(_) => GuardianScenarioKind::DataLoss,
            GuardianScenario::EntityTurnsEvil(_) => GuardianScenarioKind::EntityTurnsEvil,
        }
    }

    pub fn description(&self) -> &Sentence {
        match self {
            GuardianScenario::DataLoss(scenario) => &scenario.description,
            GuardianScenario::EntityTurnsEvil(scenario) => &scenario.description,
        }
    }

    /// Order-independent identifier of the scenario within its kind.
    pub fn id(&self) -> ScenarioId {
        let mut keys: Vec<String> = match self {
            GuardianScenario::DataLoss(scenario) => scenario
                .guardians_with_data_loss
                .iter()
                .map(|guardian| guardian.id().to_string())
                .collect(),
            GuardianScenario::EntityTurnsEvil(scenario) => scenario
                .turns_evil
                .iter()
                .map(|entity| entity.id.to_string())
                .collect(),
        };
        keys.sort();
        ScenarioId(format!("{}:{}", self.kind(), keys.join("&")))
    }
}

impl From<DataLossScenario> for GuardianScenario {
    fn from(scenario: DataLossScenario) -> Self {
        GuardianScenario::DataLoss(scenario)
    }
}

impl From<EntityTurnsEvilScenario> for GuardianScenario {
    fn from(scenario: EntityTurnsEvilScenario) -> Self {
        GuardianScenario::EntityTurnsEvil(scenario)
    }
}

/// Sorted, `&`-joined guardian or entity keys, prefixed with the kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Can the legitimate user still recover the account?
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryOutcome {
    CanRecover,
    CannotRecover { reason: Sentence },
}

impl RecoveryOutcome {
    pub fn cannot_recover(reason: impl Into<Sentence>) -> Self {
        RecoveryOutcome::CannotRecover {
            reason: reason.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecoveryOutcome::CanRecover)
    }

    pub fn reason(&self) -> Option<&Sentence> {
        match self {
            RecoveryOutcome::CanRecover => None,
            RecoveryOutcome::CannotRecover { reason } => Some(reason),
        }
    }
}

/// Can an adversary seize the account without the user's consent?
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TakeoverOutcome {
    CannotBeTakenOver,
    CanBeTakenOver { reason: Sentence },
}

impl TakeoverOutcome {
    pub fn can_be_taken_over(reason: impl Into<Sentence>) -> Self {
        TakeoverOutcome::CanBeTakenOver {
            reason: reason.into(),
        }
    }

    pub fn is_takeover_possible(&self) -> bool {
        matches!(self, TakeoverOutcome::CanBeTakenOver { .. })
    }

    pub fn reason(&self) -> Option<&Sentence> {
        match self {
            TakeoverOutcome::CannotBeTakenOver => None,
            TakeoverOutcome::CanBeTakenOver { reason } => Some(reason),
        }
    }
}

/// Verdict for one (policy, scenario) pair.
///
/// Either the account is recoverable and cannot be taken over, or the
/// outcome carries a sentence on how the wallet could do better. The
/// constructors enforce this, so fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardianScenarioOutcome {
    scenario: GuardianScenario,
    outcome_id: &'static str,
    recovery: RecoveryOutcome,
    takeover: TakeoverOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    how_to_improve: Option<Sentence>,
}

impl GuardianScenarioOutcome {
    /// Recoverable and not takeoverable.
    pub fn fully_safe(scenario: impl Into<GuardianScenario>, outcome_id: &'static str) -> Self {
        Self {
            scenario: scenario.into(),
            outcome_id,
            recovery: RecoveryOutcome::CanRecover,
            takeover: TakeoverOutcome::CannotBeTakenOver,
            how_to_improve: None,
        }
    }

    /// Non-recoverable and/or takeoverable, with improvement guidance.
    pub fn at_risk(
        scenario: impl Into<GuardianScenario>,
        outcome_id: &'static str,
        recovery: RecoveryOutcome,
        takeover: TakeoverOutcome,
        how_to_improve: impl Into<Sentence>,
    ) -> Result<Self> {
        if recovery.is_recoverable() && !takeover.is_takeover_possible() {
            return Err(KeywardError::inconsistent(format!(
                "outcome {outcome_id} is fully safe but was flagged at risk"
            )));
        }
        let how_to_improve = how_to_improve.into();
        if how_to_improve.is_empty() {
            return Err(KeywardError::inconsistent(format!(
                "outcome {outcome_id} is at risk but has no improvement guidance"
            )));
        }
        Ok(Self {
            scenario: scenario.into(),
            outcome_id,
            recovery,
            takeover,
            how_to_improve: Some(how_to_improve),
        })
    }

    pub fn scenario(&self) -> &GuardianScenario {
        &self.scenario
    }

    /// Stable identifier of the reasoning branch taken.
    pub fn outcome_id(&self) -> &'static str {
        self.outcome_id
    }

    pub fn recovery(&self) -> &RecoveryOutcome {
        &self.recovery
    }

    pub fn takeover(&self) -> &TakeoverOutcome {
        &self.takeover
    }

    pub fn how_to_improve(&self) -> Option<&Sentence> {
        self.how_to_improve.as_ref()
    }

    pub fn is_fully_safe(&self) -> bool {
        self.recovery.is_recoverable() && !self.takeover.is_takeover_possible()
    }
}
